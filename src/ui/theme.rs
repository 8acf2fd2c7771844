use ratatui::style::{Color, Modifier, Style};

use crate::report::BudgetLevel;

pub(crate) const BAR_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const BORDER: Color = Color::Rgb(69, 71, 90);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(BAR_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(BAR_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(BAR_BG)
}

pub(crate) fn income_color() -> Color {
    GREEN
}

pub(crate) fn expense_color() -> Color {
    RED
}

pub(crate) fn profit_color(profit_is_negative: bool) -> Color {
    if profit_is_negative {
        YELLOW
    } else {
        ACCENT
    }
}

pub(crate) fn budget_color(level: BudgetLevel) -> Color {
    match level {
        BudgetLevel::OnTrack => GREEN,
        BudgetLevel::Warning => YELLOW,
        BudgetLevel::Over => RED,
    }
}

pub(crate) mod add;
pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod reports;
pub(crate) mod transactions;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

pub(crate) fn titled_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(title, theme::title_style()))
}

/// A bordered card with one big figure and an optional caption under it.
pub(crate) fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    figure: String,
    color: Color,
    caption: Option<String>,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            figure,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(caption.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(titled_block(format!(" {title} ")));
    f.render_widget(text, area);
}

pub(crate) fn render_empty(f: &mut Frame, area: Rect, title: String, lines: &[&str]) {
    let mut text = vec![Line::from("")];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            text.push(Line::from(""));
        }
        text.push(Line::from(Span::styled(line.to_string(), theme::dim_style())));
    }
    f.render_widget(Paragraph::new(text).centered().block(titled_block(title)), area);
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, EditTarget, InputMode, Screen};
use super::commands;
use super::screens;
use super::theme;
use crate::ledger::Books;

pub(crate) fn render(f: &mut Frame, app: &App, books: &Books) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app, books);
    render_status_bar(f, chunks[2], app, books);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = i + 1;
            let label = if *s == Screen::Add && app.edit_mode.is_editing() {
                "Edit".to_string()
            } else {
                s.to_string()
            };
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), theme::dim_style()),
                    Span::styled(
                        label,
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{label}"), theme::dim_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::BORDER)))
        .style(Style::default().bg(theme::BAR_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App, books: &Books) {
    match app.screen {
        Screen::Dashboard => screens::dashboard::render(f, area, app, books),
        Screen::Add => screens::add::render(f, area, app),
        Screen::Transactions => screens::transactions::render(f, area, app, books),
        Screen::Reports => screens::reports::render(f, area, app, books),
        Screen::Budget => screens::budgets::render(f, area, app, books),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, books: &Books) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::BAR_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} | {} txns",
        app.screen,
        app.selected_month,
        books.transactions.len()
    );

    let right = match app.screen {
        Screen::Dashboard => " 2 add | ? help ",
        Screen::Add => " j/k field | Enter type | s save | Esc cancel ",
        Screen::Transactions => " e edit | D delete | ? help ",
        Screen::Reports => " H/L month | :export | ? help ",
        Screen::Budget => " Enter set | H/L month | :budget ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Editing => {
            let hint = match app.edit_target {
                EditTarget::Form => format!("editing {}", app.form_field.label()),
                EditTarget::BudgetAmount => "budget ceiling in UGX".to_string(),
            };
            (
                Line::from(vec![
                    Span::styled(" edit> ", Style::default().fg(theme::GREEN)),
                    Span::styled(hint, theme::dim_style()),
                    Span::styled("  Enter done · Esc done", theme::dim_style()),
                ]),
                None,
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(theme::command_bar_style());
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " Bakebook Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Navigation"),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-5        Switch tabs",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  H/L              Prev/Next month       Ctrl-q     Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        section("Actions"),
        Line::from(Span::styled(
            "  e (Transactions) Edit transaction      D          Delete transaction",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Enter (Add)      Type into field       Space/+/-  Change type/category",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  s (Add)          Save the form         Esc        Cancel/Clear",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Enter (Budget)   Set ceiling for row   :          Command mode",
            theme::normal_style(),
        )),
        Line::from(""),
        section("Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    let mut names: Vec<&&str> = commands::COMMANDS.keys().collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));
    for name in names {
        if let Some(cmd) = commands::COMMANDS.get(*name) {
            if seen.insert(cmd.description) {
                cmd_lines.push((*name, cmd.description));
            }
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::BAR_BG)),
    );
    f.render_widget(help, popup_area);
}

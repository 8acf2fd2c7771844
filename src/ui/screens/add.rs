use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::titled_block;
use crate::models::{catalog, TransactionType};
use crate::ui::app::{App, EditTarget, FormField, InputMode};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(f, chunks[0], app);
    render_catalog(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.edit_mode.is_editing() {
        " Edit Transaction "
    } else {
        " Add Transaction "
    };
    let typing = app.input_mode == InputMode::Editing && app.edit_target == EditTarget::Form;

    let mut lines = vec![Line::from("")];
    for field in FormField::all() {
        let focused = *field == app.form_field;
        let value = match field {
            FormField::Type => format!("‹ {} ›", app.form.kind),
            FormField::Category => match catalog::section_of(&app.form.category) {
                Some(section) if !typing => format!("{}  ({section})", app.form.category),
                _ => app.form.category.clone(),
            },
            FormField::Amount => app.form.amount.clone(),
            FormField::Description => app.form.description.clone(),
            FormField::Date => app.form.date.clone(),
        };
        let value = if focused && typing {
            format!("{value}▏")
        } else {
            value
        };
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        let value_style = if focused {
            theme::selected_style()
        } else {
            theme::normal_style()
        };
        let marker = if focused { "▶ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<14}", field.label()), label_style),
            Span::styled(format!(" {value} "), value_style),
        ]));
        lines.push(Line::from(""));
    }

    let action = if app.edit_mode.is_editing() {
        "  s save changes · Esc cancel edit"
    } else {
        "  s add transaction · Esc clear"
    };
    lines.push(Line::from(Span::styled(
        "  j/k field · Enter type into field · Space/+/- change type or category",
        theme::dim_style(),
    )));
    lines.push(Line::from(Span::styled(action, theme::dim_style())));

    f.render_widget(
        Paragraph::new(lines).block(titled_block(title.into())),
        area,
    );
}

fn render_catalog(f: &mut Frame, area: Rect, app: &App) {
    let highlight = |name: &str| {
        if name == app.form.category {
            theme::selected_style()
        } else {
            theme::normal_style()
        }
    };

    let mut items: Vec<ListItem> = Vec::new();
    match app.form.kind {
        TransactionType::Income => {
            for name in catalog::INCOME_CATEGORIES {
                items.push(ListItem::new(Span::styled(format!("  {name}"), highlight(name))));
            }
        }
        TransactionType::Expense => {
            for section in catalog::expense_sections() {
                items.push(ListItem::new(Span::styled(
                    section.name,
                    Style::default()
                        .fg(theme::YELLOW)
                        .add_modifier(Modifier::BOLD),
                )));
                for name in section.categories {
                    items.push(ListItem::new(Span::styled(format!("  {name}"), highlight(name))));
                }
            }
        }
    }

    let list = List::new(items).block(titled_block(format!(" {} categories ", app.form.kind)));
    f.render_widget(list, area);
}

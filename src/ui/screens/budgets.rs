use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use super::titled_block;
use crate::ledger::Books;
use crate::report::{self, BudgetStatus};
use crate::ui::app::{budget_categories, App, EditTarget, InputMode};
use crate::ui::theme;
use crate::ui::util::{format_ugx, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, books: &Books) {
    let month = app.selected_month;
    let list = books.transactions.all();
    let categories = budget_categories(books, month);
    let page = area.height.saturating_sub(2) as usize;
    let scroll = app.budget_index.saturating_sub(page.saturating_sub(1));

    let items: Vec<ListItem> = categories
        .iter()
        .enumerate()
        .skip(scroll)
        .take(page)
        .map(|(i, category)| {
            let is_cursor = i == app.budget_index;
            let name_style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let name = Span::styled(format!("{:<24}", truncate(category, 23)), name_style);

            if is_cursor
                && app.input_mode == InputMode::Editing
                && app.edit_target == EditTarget::BudgetAmount
            {
                return ListItem::new(Line::from(vec![
                    name,
                    Span::styled(" ceiling: ", theme::dim_style()),
                    Span::styled(format!("{}▏", app.budget_input), theme::normal_style()),
                ]));
            }

            match report::budget_status(list, &books.budgets, month, category) {
                Some(status) => ListItem::new(status_line(name, &status)),
                None => ListItem::new(Line::from(vec![
                    name,
                    Span::styled(" no budget", theme::dim_style()),
                ])),
            }
        })
        .collect();

    let list = List::new(items).block(titled_block(format!(
        " Budget Tracking · {month}  (Enter set · H/L month) "
    )));
    f.render_widget(list, area);
}

fn status_line<'a>(name: Span<'a>, status: &BudgetStatus) -> Line<'a> {
    let color = theme::budget_color(status.level());
    let percentage = status.percentage.to_f64().unwrap_or(0.0);
    let remaining = if status.is_over() {
        format!("Over by {}", format_ugx(status.remaining.abs()))
    } else {
        format!("Remaining: {}", format_ugx(status.remaining))
    };

    Line::from(vec![
        name,
        Span::styled(
            format!(
                " {} / {} ",
                format_ugx(status.spent),
                format_ugx(status.ceiling)
            ),
            Style::default().fg(color),
        ),
        Span::styled(progress_bar(percentage, 20), Style::default().fg(color)),
        Span::styled(
            format!(" {percentage:.1}% used  "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            remaining,
            Style::default().fg(if status.is_over() {
                theme::expense_color()
            } else {
                theme::income_color()
            }),
        ),
    ])
}

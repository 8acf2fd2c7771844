use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

use super::{render_empty, titled_block};
use crate::form::EditMode;
use crate::ledger::Books;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_ugx, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, books: &Books) {
    let list = books.transactions.all();
    if list.is_empty() {
        render_empty(
            f,
            area,
            " Transactions (0) ".into(),
            &["No transactions yet", "Add one with :add or press 2"],
        );
        return;
    }

    let header_cells = ["Date", "Type", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = list
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let is_cursor = i == app.transaction_index;
            let being_edited = app.edit_mode == EditMode::Editing(txn.id);

            let amount_style = Style::default().fg(if txn.is_income() {
                theme::income_color()
            } else {
                theme::expense_color()
            });
            let amount_str = if txn.is_income() {
                format!("+{}", format_ugx(txn.amount))
            } else {
                format_ugx(txn.signed_amount())
            };

            let date_cell = if being_edited {
                format!("\u{270E} {}", txn.date)
            } else {
                format!("  {}", txn.date)
            };

            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(date_cell),
                Cell::from(txn.kind.as_str()),
                Cell::from(truncate(&txn.category, 22)),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(22),
        Constraint::Min(16),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!(" Transactions ({}) ", list.len())));

    f.render_widget(table, area);
}

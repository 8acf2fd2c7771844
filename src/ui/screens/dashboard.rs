use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use super::{render_card, render_empty, titled_block};
use crate::ledger::Books;
use crate::models::Month;
use crate::report;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_ugx, truncate};

const RECENT_COUNT: usize = 10;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, books: &Books) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(5),    // Recent transactions
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app, books);
    render_recent(f, chunks[1], books);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, books: &Books) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let month = Month::of(app.today);
    let this_month = report::filter_month(books.transactions.all(), month);
    let totals = report::totals(this_month.iter().copied());
    let income_count = this_month.iter().filter(|t| t.is_income()).count();
    let expense_count = this_month.iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        &format!("Income {month}"),
        format_ugx(totals.income),
        theme::income_color(),
        Some(format!("{income_count} txns")),
    );
    render_card(
        f,
        cards[1],
        &format!("Expenses {month}"),
        format_ugx(totals.expenses),
        theme::expense_color(),
        Some(format!("{expense_count} txns")),
    );
    render_card(
        f,
        cards[2],
        "Profit",
        format_ugx(totals.profit),
        theme::profit_color(totals.profit < Decimal::ZERO),
        None,
    );
}

fn render_recent(f: &mut Frame, area: Rect, books: &Books) {
    let list = report::recent(books.transactions.all(), RECENT_COUNT);
    if list.is_empty() {
        render_empty(
            f,
            area,
            " Recent Transactions ".into(),
            &["Nothing recorded yet", "Press 2 or :add to record a transaction"],
        );
        return;
    }

    let rows: Vec<Row> = list
        .iter()
        .enumerate()
        .map(|(i, txn)| {
            let (sign, color) = if txn.is_income() {
                ("+", theme::income_color())
            } else {
                ("-", theme::expense_color())
            };
            let detail = if txn.description.is_empty() {
                String::new()
            } else {
                truncate(&txn.description, 40)
            };
            Row::new(vec![
                Cell::from(txn.date.to_string()),
                Cell::from(txn.category.clone()),
                Cell::from(detail),
                Cell::from(Span::styled(
                    format!("{sign}{}", format_ugx(txn.amount)),
                    Style::default().fg(color),
                )),
            ])
            .style(if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            })
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(22),
        Constraint::Min(10),
        Constraint::Length(18),
    ];
    let table = Table::new(rows, widths).block(titled_block(" Recent Transactions ".into()));
    f.render_widget(table, area);
}

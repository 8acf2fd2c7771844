use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};
use rust_decimal::Decimal;

use super::{render_card, titled_block};
use crate::ledger::Books;
use crate::report;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_ugx, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, books: &Books) {
    let report = report::monthly_report(books.transactions.all(), app.selected_month);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(chunks[0]);

    render_card(
        f,
        cards[0],
        "Total Income",
        format_ugx(report.totals.income),
        theme::income_color(),
        None,
    );
    render_card(
        f,
        cards[1],
        "Total Expenses",
        format_ugx(report.totals.expenses),
        theme::expense_color(),
        None,
    );
    render_card(
        f,
        cards[2],
        "Net Profit",
        format_ugx(report.totals.profit),
        theme::profit_color(report.totals.profit < Decimal::ZERO),
        None,
    );
    render_card(
        f,
        cards[3],
        "Transactions",
        report.transaction_count.to_string(),
        theme::TEXT,
        Some(format!("{}", report.month)),
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_breakdown(
        f,
        columns[0],
        &format!(" Income Breakdown · {} ", report.month),
        &report.income_by_category,
        theme::income_color(),
    );
    render_breakdown(
        f,
        columns[1],
        &format!(" Expense Breakdown · {} ", report.month),
        &report.expenses_by_category,
        theme::expense_color(),
    );
}

fn render_breakdown(
    f: &mut Frame,
    area: Rect,
    title: &str,
    by_category: &BTreeMap<String, Decimal>,
    color: Color,
) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = if by_category.is_empty() {
        vec![ListItem::new(Span::styled(
            "  nothing recorded",
            theme::dim_style(),
        ))]
    } else {
        by_category
            .iter()
            .map(|(category, amount)| {
                let figure = format_ugx(*amount);
                let name_width = width.saturating_sub(figure.chars().count() + 1);
                let name = truncate(category, name_width);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{name:<name_width$} "), theme::normal_style()),
                    Span::styled(
                        figure,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect()
    };

    f.render_widget(List::new(items).block(titled_block(title.to_string())), area);
}

use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, Screen};
use crate::error::Rejection;
use crate::export;
use crate::models::{catalog, Month, TransactionType};
use crate::session::Session;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("a", "Go to the Add form", cmd_add, r);
    register_command!("add", "Go to the Add form", cmd_add, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("r", "Go to Reports", cmd_reports, r);
    register_command!("reports", "Go to Reports", cmd_reports, r);
    register_command!(
        "b",
        "Budget screen, or set one (e.g. :b Gas 80000)",
        cmd_budget,
        r
    );
    register_command!(
        "budget",
        "Budget screen, or set one (e.g. :budget Ingredients 500000)",
        cmd_budget,
        r
    );
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("m", "Set month (e.g. :m 2024-05)", cmd_month, r);
    register_command!("month", "Set month (e.g. :month 2024-05)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "export",
        "Export all transactions to CSV (e.g. :export ~/may.csv)",
        cmd_export,
        r
    );
    register_command!("edit", "Edit selected transaction", cmd_edit, r);
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!("new", "Start a blank transaction", cmd_new, r);
    register_command!("submit", "Save the form", cmd_submit, r);
    register_command!("cancel", "Discard the form / stop editing", cmd_cancel, r);
    register_command!("income", "Form type: income", cmd_income, r);
    register_command!("expense", "Form type: expense", cmd_expense, r);
    register_command!(
        "category",
        "Form category (e.g. :category Cake Orders)",
        cmd_category,
        r
    );
    register_command!("amount", "Form amount (e.g. :amount 45000)", cmd_amount, r);
    register_command!("date", "Form date (e.g. :date 2024-05-14)", cmd_date, r);
    register_command!("desc", "Form description", cmd_desc, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, session)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Add;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_reports(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Reports;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Month: {}", app.selected_month));
        return Ok(());
    }
    match Month::parse(args) {
        Some(month) => {
            app.selected_month = month;
            app.budget_index = 0;
            app.set_status(format!("Month: {month}"));
        }
        None => app.set_status(Rejection::InvalidMonth(args.to_string()).to_string()),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.shift_month(true);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.shift_month(false);
    Ok(())
}

// ── Budget / export ──────────────────────────────────────────

fn cmd_budget(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.screen = Screen::Budget;
        return Ok(());
    }
    // Category names contain spaces; the amount is the last word.
    let Some((category, amount)) = args.rsplit_once(' ') else {
        app.set_status("Usage: :budget <category> <amount>");
        return Ok(());
    };
    app.set_budget(session, category.trim(), amount)?;
    app.screen = Screen::Budget;
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let requested = (!args.is_empty()).then_some(args);
    let path = session
        .config
        .export_path(requested, &export::default_file_name(app.today));

    match export::export_to_path(session.books.transactions.all(), &path) {
        Ok(0) => app.set_status(format!("Wrote an empty export to {}", path.display())),
        Ok(count) => app.set_status(format!(
            "Exported {count} transactions to {}",
            path.display()
        )),
        Err(e) => {
            tracing::error!(path = %path.display(), "export failed: {e:#}");
            app.set_status(format!("Export failed: {e:#}"));
        }
    }
    Ok(())
}

// ── Transactions ─────────────────────────────────────────────

fn cmd_edit(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    match app.selected_transaction(&session.books).cloned() {
        Some(txn) => app.begin_edit(&txn),
        None => app.set_status("No transaction selected"),
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.request_delete(&session.books);
    Ok(())
}

// ── Form ─────────────────────────────────────────────────────

fn cmd_new(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.reset_form();
    app.screen = Screen::Add;
    Ok(())
}

fn cmd_submit(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.submit_form(session)
}

fn cmd_cancel(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.cancel_edit();
    app.input_mode = InputMode::Normal;
    Ok(())
}

fn cmd_income(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.set_kind(TransactionType::Income);
    app.screen = Screen::Add;
    Ok(())
}

fn cmd_expense(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.set_kind(TransactionType::Expense);
    app.screen = Screen::Add;
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        let options = catalog::categories_for(app.form.kind).join(", ");
        app.set_status(format!("{} categories: {options}", app.form.kind));
        return Ok(());
    }
    app.form.category = catalog::find(app.form.kind, args)
        .map(str::to_string)
        .unwrap_or_else(|| args.to_string());
    app.screen = Screen::Add;
    Ok(())
}

fn cmd_amount(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.form.amount = args.to_string();
    app.screen = Screen::Add;
    Ok(())
}

fn cmd_date(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.form.date = if args.is_empty() {
        app.today.format("%Y-%m-%d").to_string()
    } else {
        args.to_string()
    };
    app.screen = Screen::Add;
    Ok(())
}

fn cmd_desc(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.form.description = args.to_string();
    app.screen = Screen::Add;
    Ok(())
}

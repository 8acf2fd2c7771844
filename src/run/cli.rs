use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::io::{self, Write};

use crate::error::Rejection;
use crate::export;
use crate::form::{BudgetForm, EditMode, Submitted, TransactionForm};
use crate::models::{catalog, Month, Transaction, TransactionId, TransactionType};
use crate::report;
use crate::session::Session;
use crate::ui::util::format_ugx;

pub(crate) fn as_cli(args: &[String], session: &mut Session) -> Result<()> {
    let today = Local::now().date_naive();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&args[1..], session, today, &mut out)
}

pub(crate) fn execute(
    args: &[String],
    session: &mut Session,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[1..];
    match command.as_str() {
        "add" => cli_add(rest, session, today, out),
        "edit" => cli_edit(rest, session, out),
        "delete" | "rm" => cli_delete(rest, session, out),
        "list" | "ls" => cli_list(rest, session, out),
        "report" | "summary" | "s" => cli_report(rest, session, today, out),
        "budget" => cli_budget(rest, session, out),
        "budgets" => cli_budgets(rest, session, today, out),
        "categories" => cli_categories(out),
        "export" => cli_export(rest, session, today, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "bakebook {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    writeln!(out, "bakebook - bakery income, expenses and budgets")?;
    writeln!(out)?;
    writeln!(out, "Usage: bakebook [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none)                                  Launch interactive TUI")?;
    writeln!(out, "  add <income|expense> <category> <amount>")?;
    writeln!(out, "      [--date YYYY-MM-DD] [--desc TEXT]   Record a transaction")?;
    writeln!(out, "  edit <id> <income|expense> <category> <amount>")?;
    writeln!(out, "      [--date YYYY-MM-DD] [--desc TEXT]   Replace a transaction")?;
    writeln!(out, "  delete <id>                             Delete a transaction")?;
    writeln!(out, "  list [YYYY-MM]                          List transactions, newest first")?;
    writeln!(out, "  report [YYYY-MM]                        Monthly report (default: this month)")?;
    writeln!(out, "  budget <YYYY-MM> <category> <amount>    Set a monthly spending ceiling")?;
    writeln!(out, "  budgets [YYYY-MM]                       Budget adherence for a month")?;
    writeln!(out, "  categories                              Show the category catalog")?;
    writeln!(out, "  export [path]                           Export all transactions to CSV")?;
    writeln!(out, "  --help, -h                              Show this help")?;
    writeln!(out, "  --version, -V                           Show version")?;
    Ok(())
}

// ── Argument helpers ─────────────────────────────────────────

/// Positional arguments plus the `--date` / `--desc` flags.
struct EntryArgs<'a> {
    positional: Vec<&'a str>,
    date: Option<&'a str>,
    desc: Option<&'a str>,
}

impl<'a> EntryArgs<'a> {
    fn parse(args: &'a [String]) -> Result<Self> {
        let mut parsed = Self {
            positional: Vec::new(),
            date: None,
            desc: None,
        };
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--date" => {
                    parsed.date = Some(
                        iter.next()
                            .context("--date needs a value (YYYY-MM-DD)")?
                            .as_str(),
                    );
                }
                "--desc" => {
                    parsed.desc = Some(iter.next().context("--desc needs a value")?.as_str());
                }
                other => parsed.positional.push(other),
            }
        }
        Ok(parsed)
    }

    /// `<type> <category...> <amount>`; the category may span several words.
    fn form(&self, defaults: TransactionForm) -> Result<TransactionForm> {
        let [kind, middle @ .., amount] = self.positional.as_slice() else {
            anyhow::bail!("Expected <income|expense> <category> <amount>");
        };
        if middle.is_empty() {
            anyhow::bail!("Expected <income|expense> <category> <amount>");
        }
        let kind =
            TransactionType::parse(kind).ok_or_else(|| Rejection::UnknownType(kind.to_string()))?;
        let raw_category = middle.join(" ");
        let category = catalog::find(kind, &raw_category)
            .map(str::to_string)
            .unwrap_or(raw_category);

        Ok(TransactionForm {
            kind,
            category,
            amount: amount.to_string(),
            description: self
                .desc
                .map(str::to_string)
                .unwrap_or(defaults.description),
            date: self.date.map(str::to_string).unwrap_or(defaults.date),
        })
    }
}

fn parse_id(raw: Option<&String>) -> Result<TransactionId> {
    let raw = raw.context("Missing transaction id")?;
    raw.parse()
        .with_context(|| format!("'{raw}' is not a transaction id"))
}

fn parse_month_arg(raw: Option<&String>, today: NaiveDate) -> Result<Month> {
    match raw {
        Some(raw) => Ok(Month::parse(raw).ok_or_else(|| Rejection::InvalidMonth(raw.clone()))?),
        None => Ok(Month::of(today)),
    }
}

fn write_row(out: &mut impl Write, txn: &Transaction) -> Result<()> {
    writeln!(
        out,
        "{:<14} {} {:<8} {:<22} {:>16}  {}",
        txn.id,
        txn.date,
        txn.kind.as_str(),
        txn.category,
        format_ugx(txn.signed_amount()),
        txn.description
    )?;
    Ok(())
}

// ── Transactions ─────────────────────────────────────────────

fn cli_add(
    args: &[String],
    session: &mut Session,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    let form = EntryArgs::parse(args)?.form(TransactionForm::blank(today))?;
    let Submitted::Added(id) = EditMode::Idle.submit(&form, &mut session.books.transactions)?
    else {
        anyhow::bail!("Transaction was not added");
    };
    session.commit()?;

    if let Some(txn) = session.books.transactions.get(id) {
        write!(out, "Added: ")?;
        write_row(out, txn)?;
    }
    Ok(())
}

fn cli_edit(args: &[String], session: &mut Session, out: &mut impl Write) -> Result<()> {
    let id = parse_id(args.first())?;
    let existing = session
        .books
        .transactions
        .get(id)
        .with_context(|| format!("No transaction with id {id}"))?;
    let form = EntryArgs::parse(&args[1..])?.form(TransactionForm::from_transaction(existing))?;

    let mut mode = EditMode::Editing(id);
    match mode.submit(&form, &mut session.books.transactions)? {
        Submitted::Updated(id) => {
            session.commit()?;
            if let Some(txn) = session.books.transactions.get(id) {
                write!(out, "Updated: ")?;
                write_row(out, txn)?;
            }
            Ok(())
        }
        Submitted::Added(_) | Submitted::Missing(_) => {
            anyhow::bail!("No transaction with id {id}")
        }
    }
}

fn cli_delete(args: &[String], session: &mut Session, out: &mut impl Write) -> Result<()> {
    let id = parse_id(args.first())?;
    if !session.books.transactions.remove(id) {
        anyhow::bail!("No transaction with id {id}");
    }
    session.commit()?;
    writeln!(out, "Deleted transaction {id}")?;
    Ok(())
}

fn cli_list(args: &[String], session: &Session, out: &mut impl Write) -> Result<()> {
    let all = session.books.transactions.all();
    let list: Vec<&Transaction> = match args.first() {
        Some(raw) => {
            let month = Month::parse(raw).ok_or_else(|| Rejection::InvalidMonth(raw.clone()))?;
            report::filter_month(all, month)
        }
        None => all.iter().collect(),
    };

    if list.is_empty() {
        writeln!(out, "No transactions")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<14} {:<10} {:<8} {:<22} {:>16}  Description",
        "ID", "Date", "Type", "Category", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(90))?;
    for txn in list {
        write_row(out, txn)?;
    }
    Ok(())
}

// ── Reports ──────────────────────────────────────────────────

fn cli_report(
    args: &[String],
    session: &Session,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    let month = parse_month_arg(args.first(), today)?;
    let report = report::monthly_report(session.books.transactions.all(), month);

    writeln!(out, "Bakebook - {}", report.month)?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Income:       {}", format_ugx(report.totals.income))?;
    writeln!(out, "  Expenses:     {}", format_ugx(report.totals.expenses))?;
    writeln!(out, "  Net Profit:   {}", format_ugx(report.totals.profit))?;
    writeln!(out, "  Transactions: {}", report.transaction_count)?;

    for (title, breakdown) in [
        ("Income Breakdown:", &report.income_by_category),
        ("Expense Breakdown:", &report.expenses_by_category),
    ] {
        if breakdown.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{title}")?;
        for (name, amount) in breakdown {
            writeln!(out, "  {name:<24} {}", format_ugx(*amount))?;
        }
    }
    Ok(())
}

fn cli_budget(args: &[String], session: &mut Session, out: &mut impl Write) -> Result<()> {
    let [month, middle @ .., amount] = args else {
        anyhow::bail!("Usage: bakebook budget <YYYY-MM> <category> <amount>");
    };
    if middle.is_empty() {
        anyhow::bail!("Usage: bakebook budget <YYYY-MM> <category> <amount>");
    }
    let raw_category = middle.join(" ");
    let form = BudgetForm {
        month: month.clone(),
        category: catalog::find(TransactionType::Expense, &raw_category)
            .map(str::to_string)
            .unwrap_or(raw_category),
        amount: amount.clone(),
    };
    let (month, category, amount) = form.parse()?;
    session.books.budgets.set(month, &category, amount)?;
    session.commit()?;
    writeln!(out, "Budget for {category} in {month}: {}", format_ugx(amount))?;
    Ok(())
}

fn cli_budgets(
    args: &[String],
    session: &Session,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    let month = parse_month_arg(args.first(), today)?;
    let rows = report::budget_overview(
        session.books.transactions.all(),
        &session.books.budgets,
        month,
    );
    if rows.is_empty() {
        writeln!(out, "No budgets set for {month}")?;
        return Ok(());
    }

    writeln!(out, "Budget Tracking - {month}")?;
    writeln!(out, "{}", "─".repeat(72))?;
    for (category, status) in &rows {
        let remaining = if status.is_over() {
            format!("Over by {}", format_ugx(status.remaining.abs()))
        } else {
            format!("Remaining: {}", format_ugx(status.remaining))
        };
        writeln!(
            out,
            "  {category:<24} {} / {}  {:.1}% used  {remaining}",
            format_ugx(status.spent),
            format_ugx(status.ceiling),
            status.percentage,
        )?;
    }
    Ok(())
}

fn cli_categories(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Income")?;
    for name in catalog::INCOME_CATEGORIES {
        writeln!(out, "  {name}")?;
    }
    for section in catalog::expense_sections() {
        writeln!(out)?;
        writeln!(out, "Expense: {}", section.name)?;
        for name in section.categories {
            writeln!(out, "  {name}")?;
        }
    }
    Ok(())
}

fn cli_export(
    args: &[String],
    session: &Session,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    let requested = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(String::as_str);
    let path = session
        .config
        .export_path(requested, &export::default_file_name(today));

    let count = export::export_to_path(session.books.transactions.all(), &path)?;
    writeln!(out, "Exported {count} transactions to {}", path.display())?;
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

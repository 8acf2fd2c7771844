#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, Screen};
use super::commands::{handle_command, COMMANDS};
use crate::form::EditMode;
use crate::models::{Month, TransactionFields, TransactionType};
use crate::session::Session;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
}

fn setup() -> (tempfile::TempDir, App, Session) {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::in_memory(dir.path().to_path_buf());
    (dir, App::new(today()), session)
}

fn seed(session: &mut Session) -> i64 {
    let id = session
        .books
        .transactions
        .add_at(
            TransactionFields {
                kind: TransactionType::Expense,
                category: "Fuel".into(),
                amount: dec!(45000),
                description: "generator".into(),
                date: today(),
            },
            7,
        )
        .unwrap();
    session.commit().unwrap();
    id
}

#[test]
fn test_every_command_has_description() {
    for (name, cmd) in COMMANDS.iter() {
        assert!(!cmd.description.is_empty(), ":{name} has no description");
    }
}

#[test]
fn test_unknown_command_suggests_closest() {
    let (_dir, mut app, mut session) = setup();
    handle_command("reprots", &mut app, &mut session).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :reprots. Did you mean :reports?"
    );
}

#[test]
fn test_screen_commands() {
    let (_dir, mut app, mut session) = setup();
    for (cmd, screen) in [
        ("a", Screen::Add),
        ("t", Screen::Transactions),
        ("reports", Screen::Reports),
        ("budget", Screen::Budget),
        ("dashboard", Screen::Dashboard),
    ] {
        handle_command(cmd, &mut app, &mut session).unwrap();
        assert_eq!(app.screen, screen, ":{cmd}");
    }
}

#[test]
fn test_month_command() {
    let (_dir, mut app, mut session) = setup();
    handle_command("m 2024-1", &mut app, &mut session).unwrap();
    assert_eq!(app.selected_month, Month::new(2024, 1).unwrap());

    handle_command("month January", &mut app, &mut session).unwrap();
    assert_eq!(app.selected_month, Month::new(2024, 1).unwrap());
    assert_eq!(
        app.status_message,
        "'January' is not a month (use YYYY-MM)"
    );

    handle_command("prev-month", &mut app, &mut session).unwrap();
    assert_eq!(app.selected_month.to_string(), "2023-12");
}

#[test]
fn test_budget_command_sets_ceiling_for_selected_month() {
    let (_dir, mut app, mut session) = setup();
    handle_command("budget mobile money charges 25,000", &mut app, &mut session).unwrap();

    let may = Month::of(today());
    assert_eq!(
        session.books.budgets.get(may, "Mobile Money Charges"),
        Some(dec!(25000))
    );
    assert_eq!(app.screen, Screen::Budget);
    assert_eq!(session.reload().unwrap(), session.books);
}

#[test]
fn test_budget_command_rejects_bad_amount() {
    let (_dir, mut app, mut session) = setup();
    handle_command("budget Gas -5", &mut app, &mut session).unwrap();
    assert!(session.books.budgets.is_empty());
    assert_eq!(app.status_message, "amount cannot be negative (-5)");

    handle_command("budget Gas", &mut app, &mut session).unwrap();
    assert!(session.books.budgets.is_empty());
}

#[test]
fn test_form_commands_fill_and_submit() {
    let (_dir, mut app, mut session) = setup();
    for cmd in [
        "expense",
        "category oven maintenance",
        "amount 120000",
        "desc new thermostat",
        "date 2024-05-01",
        "submit",
    ] {
        handle_command(cmd, &mut app, &mut session).unwrap();
    }

    let txn = &session.books.transactions.all()[0];
    assert_eq!(txn.kind, TransactionType::Expense);
    assert_eq!(txn.category, "Oven Maintenance");
    assert_eq!(txn.amount, dec!(120000));
    assert_eq!(txn.description, "new thermostat");
    assert_eq!(txn.date.to_string(), "2024-05-01");
}

#[test]
fn test_switching_type_clears_foreign_category() {
    let (_dir, mut app, mut session) = setup();
    handle_command("category Cake Orders", &mut app, &mut session).unwrap();
    assert_eq!(app.form.category, "Cake Orders");
    handle_command("expense", &mut app, &mut session).unwrap();
    assert!(app.form.category.is_empty());

    handle_command("category Piping Bags", &mut app, &mut session).unwrap();
    handle_command("income", &mut app, &mut session).unwrap();
    assert_eq!(app.form.category, "Piping Bags");
}

#[test]
fn test_edit_then_cancel() {
    let (_dir, mut app, mut session) = setup();
    let id = seed(&mut session);

    handle_command("edit", &mut app, &mut session).unwrap();
    assert_eq!(app.edit_mode, EditMode::Editing(id));
    assert_eq!(app.form.category, "Fuel");
    assert_eq!(app.screen, Screen::Add);

    handle_command("cancel", &mut app, &mut session).unwrap();
    assert_eq!(app.edit_mode, EditMode::Idle);
    assert!(app.form.category.is_empty());
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_submit_after_record_vanished() {
    let (_dir, mut app, mut session) = setup();
    let id = seed(&mut session);
    handle_command("edit", &mut app, &mut session).unwrap();

    session.books.transactions.remove(id);
    handle_command("submit", &mut app, &mut session).unwrap();

    assert!(session.books.transactions.is_empty());
    assert_eq!(app.edit_mode, EditMode::Idle);
    assert_eq!(
        app.status_message,
        "That transaction no longer exists; nothing saved"
    );
}

#[test]
fn test_edit_without_selection() {
    let (_dir, mut app, mut session) = setup();
    handle_command("edit", &mut app, &mut session).unwrap();
    assert_eq!(app.edit_mode, EditMode::Idle);
    assert_eq!(app.status_message, "No transaction selected");
}

#[test]
fn test_delete_command_asks_first() {
    let (_dir, mut app, mut session) = setup();
    seed(&mut session);
    handle_command("delete-txn", &mut app, &mut session).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(
        app.confirm_message,
        "Delete Fuel UGX 45,000 (2024-05-14)?"
    );
    assert_eq!(session.books.transactions.len(), 1);

    app.confirm_pending(&mut session).unwrap();
    assert!(session.books.transactions.is_empty());
    assert_eq!(app.status_message, "Deleted: Fuel UGX 45,000 (2024-05-14)");
}

#[test]
fn test_export_command_writes_file() {
    let (dir, mut app, mut session) = setup();
    seed(&mut session);

    handle_command("export may.csv", &mut app, &mut session).unwrap();
    let csv = std::fs::read_to_string(dir.path().join("may.csv")).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("2024-05-14,expense,Fuel,45000,generator"));
    assert!(app.status_message.starts_with("Exported 1 transactions"));

    handle_command("export", &mut app, &mut session).unwrap();
    assert!(dir
        .path()
        .join("bakery-transactions-2024-05-14.csv")
        .exists());
}

#[test]
fn test_quit() {
    let (_dir, mut app, mut session) = setup();
    handle_command("q", &mut app, &mut session).unwrap();
    assert!(!app.running);
}

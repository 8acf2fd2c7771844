#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_decimal_macros::dec;

use super::handle_key;
use crate::form::EditMode;
use crate::models::{Month, TransactionFields, TransactionType};
use crate::session::Session;
use crate::ui::app::{App, FormField, InputMode, Screen};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
}

fn setup() -> (tempfile::TempDir, App, Session) {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::in_memory(dir.path().to_path_buf());
    (dir, App::new(today()), session)
}

fn press(app: &mut App, session: &mut Session, code: KeyCode) {
    handle_key(KeyEvent::new(code, KeyModifiers::NONE), app, session).unwrap();
}

fn type_str(app: &mut App, session: &mut Session, text: &str) {
    for c in text.chars() {
        press(app, session, KeyCode::Char(c));
    }
}

fn seed(session: &mut Session, amount: rust_decimal::Decimal) -> i64 {
    let id = session
        .books
        .transactions
        .add_at(
            TransactionFields {
                kind: TransactionType::Income,
                category: "Classes".into(),
                amount,
                description: String::new(),
                date: today(),
            },
            1,
        )
        .unwrap();
    session.commit().unwrap();
    id
}

#[test]
fn test_enter_expense_through_the_form() {
    let (_dir, mut app, mut session) = setup();

    press(&mut app, &mut session, KeyCode::Char('2'));
    assert_eq!(app.screen, Screen::Add);

    press(&mut app, &mut session, KeyCode::Char(' ')); // type -> expense
    press(&mut app, &mut session, KeyCode::Char('j'));
    press(&mut app, &mut session, KeyCode::Char(' ')); // first expense category
    assert_eq!(app.form.category, "Electricity");

    press(&mut app, &mut session, KeyCode::Char('j'));
    assert_eq!(app.form_field, FormField::Amount);
    press(&mut app, &mut session, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Editing);
    type_str(&mut app, &mut session, "45,000");
    press(&mut app, &mut session, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.form_field, FormField::Description);

    press(&mut app, &mut session, KeyCode::Char('s'));

    let all = session.books.transactions.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].kind, TransactionType::Expense);
    assert_eq!(all[0].category, "Electricity");
    assert_eq!(all[0].amount, dec!(45000));
    assert_eq!(all[0].date, today());
    assert_eq!(session.reload().unwrap(), session.books);
    assert!(app.form.amount.is_empty());
    assert_eq!(app.status_message, "Added expense: UGX 45,000");
}

#[test]
fn test_rejected_form_keeps_books_and_input() {
    let (_dir, mut app, mut session) = setup();
    press(&mut app, &mut session, KeyCode::Char('2'));
    app.form.amount = "500".into();

    press(&mut app, &mut session, KeyCode::Char('s'));

    assert!(session.books.transactions.is_empty());
    assert_eq!(app.status_message, "choose a category");
    assert_eq!(app.form.amount, "500");
}

#[test]
fn test_edit_selected_transaction() {
    let (_dir, mut app, mut session) = setup();
    let id = seed(&mut session, dec!(300));

    press(&mut app, &mut session, KeyCode::Char('3'));
    press(&mut app, &mut session, KeyCode::Char('e'));
    assert_eq!(app.screen, Screen::Add);
    assert_eq!(app.edit_mode, EditMode::Editing(id));
    assert_eq!(app.form.amount, "300");

    press(&mut app, &mut session, KeyCode::Char('j'));
    press(&mut app, &mut session, KeyCode::Char('j'));
    press(&mut app, &mut session, KeyCode::Enter);
    for _ in 0..3 {
        press(&mut app, &mut session, KeyCode::Backspace);
    }
    type_str(&mut app, &mut session, "350");
    press(&mut app, &mut session, KeyCode::Esc);
    press(&mut app, &mut session, KeyCode::Char('s'));

    assert_eq!(app.edit_mode, EditMode::Idle);
    assert_eq!(app.screen, Screen::Transactions);
    assert_eq!(session.books.transactions.len(), 1);
    assert_eq!(session.books.transactions.get(id).unwrap().amount, dec!(350));
    assert_eq!(session.reload().unwrap(), session.books);
}

#[test]
fn test_escape_cancels_edit() {
    let (_dir, mut app, mut session) = setup();
    seed(&mut session, dec!(300));

    press(&mut app, &mut session, KeyCode::Char('3'));
    press(&mut app, &mut session, KeyCode::Char('e'));
    press(&mut app, &mut session, KeyCode::Esc);

    assert_eq!(app.edit_mode, EditMode::Idle);
    assert!(app.form.category.is_empty());
    assert_eq!(session.books.transactions.all()[0].amount, dec!(300));
}

#[test]
fn test_delete_needs_confirmation() {
    let (_dir, mut app, mut session) = setup();
    seed(&mut session, dec!(300));
    press(&mut app, &mut session, KeyCode::Char('3'));

    press(&mut app, &mut session, KeyCode::Char('D'));
    assert_eq!(app.input_mode, InputMode::Confirm);
    press(&mut app, &mut session, KeyCode::Char('n'));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(session.books.transactions.len(), 1);

    press(&mut app, &mut session, KeyCode::Char('D'));
    press(&mut app, &mut session, KeyCode::Char('y'));
    assert!(session.books.transactions.is_empty());
    assert!(session.reload().unwrap().transactions.is_empty());
    assert_eq!(app.transaction_index, 0);
}

#[test]
fn test_set_budget_from_budget_screen() {
    let (_dir, mut app, mut session) = setup();
    press(&mut app, &mut session, KeyCode::Char('5'));
    press(&mut app, &mut session, KeyCode::Char('j'));
    press(&mut app, &mut session, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Editing);
    type_str(&mut app, &mut session, "80000");
    press(&mut app, &mut session, KeyCode::Enter);

    let may = Month::of(today());
    // Second row of the catalog.
    assert_eq!(
        session.books.budgets.get(may, "Gas"),
        Some(dec!(80000))
    );
    assert_eq!(session.reload().unwrap().budgets.len(), 1);
}

#[test]
fn test_rejected_budget_amount() {
    let (_dir, mut app, mut session) = setup();
    press(&mut app, &mut session, KeyCode::Char('5'));
    press(&mut app, &mut session, KeyCode::Enter);
    type_str(&mut app, &mut session, "lots");
    press(&mut app, &mut session, KeyCode::Enter);

    assert!(session.books.budgets.is_empty());
    assert_eq!(app.status_message, "'lots' is not a number");
}

#[test]
fn test_month_keys_step_selected_month() {
    let (_dir, mut app, mut session) = setup();
    press(&mut app, &mut session, KeyCode::Char('4'));
    press(&mut app, &mut session, KeyCode::Char('L'));
    assert_eq!(app.selected_month.to_string(), "2024-06");
    press(&mut app, &mut session, KeyCode::Char('H'));
    press(&mut app, &mut session, KeyCode::Char('H'));
    assert_eq!(app.selected_month.to_string(), "2024-04");
}

#[test]
fn test_command_mode_runs_command() {
    let (_dir, mut app, mut session) = setup();
    press(&mut app, &mut session, KeyCode::Char(':'));
    type_str(&mut app, &mut session, "month 2023-12");
    press(&mut app, &mut session, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.selected_month.to_string(), "2023-12");
}

#[test]
fn test_help_closes_on_any_key() {
    let (_dir, mut app, mut session) = setup();
    press(&mut app, &mut session, KeyCode::Char('?'));
    assert!(app.show_help);
    press(&mut app, &mut session, KeyCode::Char('3'));
    assert!(!app.show_help);
    assert_eq!(app.screen, Screen::Dashboard);
}

#[test]
fn test_ctrl_q_quits() {
    let (_dir, mut app, mut session) = setup();
    handle_key(
        KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        &mut app,
        &mut session,
    )
    .unwrap();
    assert!(!app.running);
}

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;
use crate::error::Rejection;
use crate::models::{Month, TransactionFields, TransactionType};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn month(s: &str) -> Month {
    Month::parse(s).unwrap()
}

fn fields(kind: TransactionType, category: &str, amount: Decimal, on: &str) -> TransactionFields {
    TransactionFields {
        kind,
        category: category.into(),
        amount,
        description: String::new(),
        date: date(on),
    }
}

fn income(amount: Decimal) -> TransactionFields {
    fields(TransactionType::Income, "Cake Orders", amount, "2024-05-03")
}

fn expense(amount: Decimal) -> TransactionFields {
    fields(TransactionType::Expense, "Ingredients", amount, "2024-05-04")
}

// ── TransactionStore::add ─────────────────────────────────────

#[test]
fn test_add_prepends_and_assigns_id() {
    let mut store = TransactionStore::new();
    let first = store.add_at(income(dec!(1000)), 100).unwrap();
    let second = store.add_at(expense(dec!(400)), 200).unwrap();

    assert_eq!(first, 100);
    assert_eq!(second, 200);
    let ids: Vec<i64> = store.all().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![200, 100]);
}

#[test]
fn test_add_rejects_amounts_out_of_range() {
    let mut store = TransactionStore::new();
    let huge = dec!(50000000000000000000000000000);
    assert_eq!(
        store.add_at(income(huge), 1),
        Err(Rejection::AmountTooLarge(huge))
    );
    assert_eq!(
        store.add_at(income(dec!(0.001)), 2),
        Err(Rejection::TooManyDecimals(dec!(0.001)))
    );
    assert!(store.is_empty());

    store.add_at(income(MAX_AMOUNT), 3).unwrap();
    store.add_at(income(dec!(12.50)), 4).unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn test_add_after_largest_possible_id() {
    let mut store = TransactionStore::new();
    store.add_at(income(dec!(1)), 5).unwrap();
    let top = store.add_at(income(dec!(2)), i64::MAX).unwrap();
    assert_eq!(top, i64::MAX);

    let next = store.add_at(income(dec!(3)), 10).unwrap();
    assert_eq!(next, 4);
    let ids: Vec<i64> = store.all().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![4, i64::MAX, 5]);
}

#[test]
fn test_add_record_matches_fields() {
    let mut store = TransactionStore::new();
    store.add_at(income(dec!(250)), 1).unwrap();
    let f = expense(dec!(75.5));
    let id = store.add_at(f.clone(), 2).unwrap();

    let matching: Vec<_> = store.all().iter().filter(|t| t.fields() == f).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, id);
    assert_eq!(store.all()[0].id, id);
}

#[test]
fn test_add_with_repeated_clock_keeps_ids_unique() {
    let mut store = TransactionStore::new();
    let a = store.add_at(income(dec!(1)), 500).unwrap();
    let b = store.add_at(income(dec!(2)), 500).unwrap();
    let c = store.add_at(income(dec!(3)), 400).unwrap();
    assert_eq!(a, 500);
    assert_eq!(b, 501);
    assert_eq!(c, 502);
}

#[test]
fn test_add_uses_clock() {
    let mut store = TransactionStore::new();
    let id = store.add(income(dec!(10))).unwrap();
    assert!(id > 0);
    assert_eq!(store.get(id).unwrap().amount, dec!(10));
}

#[test]
fn test_add_rejects_empty_category() {
    let mut store = TransactionStore::new();
    store.add_at(income(dec!(5)), 1).unwrap();
    let before = store.clone();

    let mut f = expense(dec!(10));
    f.category = "   ".into();
    assert_eq!(store.add_at(f, 2), Err(Rejection::MissingCategory));
    assert_eq!(store, before);
}

#[test]
fn test_add_rejects_negative_amount() {
    let mut store = TransactionStore::new();
    assert_eq!(
        store.add_at(expense(dec!(-1)), 1),
        Err(Rejection::NegativeAmount(dec!(-1)))
    );
    assert!(store.is_empty());
}

#[test]
fn test_add_accepts_zero_amount() {
    let mut store = TransactionStore::new();
    assert!(store.add_at(expense(Decimal::ZERO), 1).is_ok());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_add_trims_category() {
    let mut store = TransactionStore::new();
    let mut f = expense(dec!(10));
    f.category = "  Gas ".into();
    let id = store.add_at(f, 1).unwrap();
    assert_eq!(store.get(id).unwrap().category, "Gas");
}

// ── TransactionStore::update ──────────────────────────────────

#[test]
fn test_update_replaces_fields_keeps_id_and_position() {
    let mut store = TransactionStore::new();
    let target = store.add_at(income(dec!(100)), 1).unwrap();
    store.add_at(expense(dec!(50)), 2).unwrap();

    let replacement = fields(TransactionType::Expense, "Fuel", dec!(30), "2024-06-01");
    assert_eq!(store.update(target, replacement.clone()), Ok(true));

    let updated = store.get(target).unwrap();
    assert_eq!(updated.id, target);
    assert_eq!(updated.fields(), replacement);
    assert_eq!(store.all()[1].id, target);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_update_missing_id_is_noop() {
    let mut store = TransactionStore::new();
    store.add_at(income(dec!(100)), 1).unwrap();
    let before = store.clone();

    assert_eq!(store.update(999, expense(dec!(1))), Ok(false));
    assert_eq!(store, before);
}

#[test]
fn test_update_rejects_invalid_fields() {
    let mut store = TransactionStore::new();
    let id = store.add_at(income(dec!(100)), 1).unwrap();
    let before = store.clone();

    let mut bad = income(dec!(100));
    bad.category.clear();
    assert_eq!(store.update(id, bad), Err(Rejection::MissingCategory));
    assert_eq!(store, before);
}

// ── TransactionStore::remove ──────────────────────────────────

#[test]
fn test_remove_then_lookup_misses() {
    let mut store = TransactionStore::new();
    let keep = store.add_at(income(dec!(1)), 1).unwrap();
    let gone = store.add_at(income(dec!(2)), 2).unwrap();

    assert!(store.remove(gone));
    assert!(store.get(gone).is_none());
    assert!(store.get(keep).is_some());
}

#[test]
fn test_remove_twice_is_idempotent() {
    let mut store = TransactionStore::new();
    let id = store.add_at(income(dec!(1)), 1).unwrap();
    assert!(store.remove(id));
    let after_first = store.clone();
    assert!(!store.remove(id));
    assert_eq!(store, after_first);
}

// ── BudgetStore ───────────────────────────────────────────────

#[test]
fn test_budget_set_and_get() {
    let mut budgets = BudgetStore::new();
    budgets.set(month("2024-05"), "Ingredients", dec!(1000)).unwrap();
    assert_eq!(
        budgets.get(month("2024-05"), "Ingredients"),
        Some(dec!(1000))
    );
    assert_eq!(budgets.get(month("2024-06"), "Ingredients"), None);
    assert_eq!(budgets.get(month("2024-05"), "Gas"), None);
}

#[test]
fn test_budget_later_set_overwrites() {
    let mut budgets = BudgetStore::new();
    budgets.set(month("2024-05"), "Gas", dec!(100)).unwrap();
    budgets.set(month("2024-05"), "Gas", dec!(150)).unwrap();
    assert_eq!(budgets.get(month("2024-05"), "Gas"), Some(dec!(150)));
    assert_eq!(budgets.len(), 1);
}

#[test]
fn test_budget_rejects_invalid_input() {
    let mut budgets = BudgetStore::new();
    assert_eq!(
        budgets.set(month("2024-05"), "", dec!(100)),
        Err(Rejection::MissingCategory)
    );
    assert_eq!(
        budgets.set(month("2024-05"), "Gas", dec!(-5)),
        Err(Rejection::NegativeAmount(dec!(-5)))
    );
    assert_eq!(
        budgets.set(month("2024-05"), "Gas", dec!(0.00000000000000000001)),
        Err(Rejection::TooManyDecimals(dec!(0.00000000000000000001)))
    );
    assert_eq!(
        budgets.set(month("2024-05"), "Gas", dec!(1000000000000.01)),
        Err(Rejection::AmountTooLarge(dec!(1000000000000.01)))
    );
    assert!(budgets.is_empty());
}

#[test]
fn test_budget_category_is_trimmed_on_both_sides() {
    let mut budgets = BudgetStore::new();
    budgets.set(month("2024-05"), " Gas ", dec!(100)).unwrap();
    assert_eq!(budgets.get(month("2024-05"), "Gas"), Some(dec!(100)));
    assert_eq!(budgets.get(month("2024-05"), " Gas "), Some(dec!(100)));
}

#[test]
fn test_budget_for_month() {
    let mut budgets = BudgetStore::new();
    budgets.set(month("2024-05"), "Gas", dec!(100)).unwrap();
    budgets.set(month("2024-05"), "Electricity", dec!(200)).unwrap();
    budgets.set(month("2024-06"), "Gas", dec!(300)).unwrap();

    let may: Vec<(&str, Decimal)> = budgets.for_month(month("2024-05")).collect();
    assert_eq!(may, vec![("Electricity", dec!(200)), ("Gas", dec!(100))]);
}

// ── Books load/save ───────────────────────────────────────────

fn sample_books() -> Books {
    let mut books = Books::new();
    books.transactions.add_at(income(dec!(1000)), 1).unwrap();
    let mut f = expense(dec!(12.5));
    f.description = "flour, sugar".into();
    books.transactions.add_at(f, 2).unwrap();
    books
        .budgets
        .set(month("2024-05"), "Ingredients", dec!(1000))
        .unwrap();
    books
        .budgets
        .set(month("2024-06"), "Mobile Money Charges", dec!(25))
        .unwrap();
    books
}

#[test]
fn test_load_empty_store_gives_empty_books() {
    let db = Database::open_in_memory().unwrap();
    let books = Books::load(&db).unwrap();
    assert!(books.transactions.is_empty());
    assert!(books.budgets.is_empty());
}

#[test]
fn test_save_then_load_roundtrip() {
    let mut db = Database::open_in_memory().unwrap();
    let books = sample_books();
    books.save(&mut db).unwrap();

    let loaded = Books::load(&db).unwrap();
    assert_eq!(loaded, books);
    let ids: Vec<i64> = loaded.transactions.all().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_roundtrip_keeps_exact_amounts() {
    let mut books = sample_books();
    for (i, amount) in [dec!(999999999999.99), dec!(0.01), dec!(12345678901.23)]
        .into_iter()
        .enumerate()
    {
        books.transactions.add_at(expense(amount), 10 + i as i64).unwrap();
    }
    books
        .budgets
        .set(month("2024-07"), "Gas", dec!(987654321098.76))
        .unwrap();

    let mut db = Database::open_in_memory().unwrap();
    books.save(&mut db).unwrap();
    let loaded = Books::load(&db).unwrap();

    assert_eq!(loaded, books);
    assert_eq!(loaded.transactions.all()[0].amount, dec!(12345678901.23));
    assert_eq!(
        loaded.budgets.get(month("2024-07"), "Gas"),
        Some(dec!(987654321098.76))
    );
}

#[test]
fn test_save_writes_original_layout() {
    let mut store: BTreeMap<String, String> = BTreeMap::new();
    sample_books().save(&mut store).unwrap();

    let budgets: serde_json::Value =
        serde_json::from_str(store.get(BUDGETS_KEY).unwrap()).unwrap();
    assert_eq!(budgets["2024-05-Ingredients"].as_f64(), Some(1000.0));
    assert_eq!(budgets["2024-06-Mobile Money Charges"].as_f64(), Some(25.0));

    let txns: serde_json::Value =
        serde_json::from_str(store.get(TRANSACTIONS_KEY).unwrap()).unwrap();
    assert_eq!(txns.as_array().unwrap().len(), 2);
    assert_eq!(txns[0]["type"], "expense");
}

#[test]
fn test_load_reads_hand_written_state() {
    let mut store = BTreeMap::new();
    store.insert(
        TRANSACTIONS_KEY.to_string(),
        r#"[{"id":1715000000000,"type":"income","category":"Classes","amount":50000,"description":"","date":"2024-05-06"}]"#
            .to_string(),
    );
    store.insert(
        BUDGETS_KEY.to_string(),
        r#"{"2024-05-Gas":80000,"not a key":5}"#.to_string(),
    );

    let books = Books::load(&store).unwrap();
    assert_eq!(books.transactions.len(), 1);
    assert_eq!(books.transactions.all()[0].amount, dec!(50000));
    assert_eq!(books.budgets.len(), 1);
    assert_eq!(books.budgets.get(month("2024-05"), "Gas"), Some(dec!(80000)));
}

#[test]
fn test_load_only_one_entry_present() {
    let mut store = BTreeMap::new();
    store.insert(BUDGETS_KEY.to_string(), r#"{"2024-05-Gas":10}"#.to_string());
    let books = Books::load(&store).unwrap();
    assert!(books.transactions.is_empty());
    assert_eq!(books.budgets.len(), 1);
}

#[test]
fn test_load_corrupt_entry_is_error() {
    let mut store = BTreeMap::new();
    store.insert(TRANSACTIONS_KEY.to_string(), "{not json".to_string());
    let err = Books::load(&store).unwrap_err();
    assert!(err.to_string().contains(TRANSACTIONS_KEY));
}

//! Derived views over the transaction list. Everything here is a pure
//! function of its inputs and is recomputed on every render.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::ledger::BudgetStore;
use crate::models::{catalog, Month, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) profit: Decimal,
}

pub(crate) fn totals<'a>(list: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let (income, expenses) = list
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.kind {
            TransactionType::Income => (inc.saturating_add(t.amount), exp),
            TransactionType::Expense => (inc, exp.saturating_add(t.amount)),
        });
    Totals {
        income,
        expenses,
        profit: income.saturating_sub(expenses),
    }
}

/// Sum of amounts per category for records of `kind`.
pub(crate) fn by_category<'a>(
    list: impl IntoIterator<Item = &'a Transaction>,
    kind: TransactionType,
) -> BTreeMap<String, Decimal> {
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in list.into_iter().filter(|t| t.kind == kind) {
        let sum = sums.entry(t.category.clone()).or_default();
        *sum = sum.saturating_add(t.amount);
    }
    sums
}

/// Records dated within `month`, in list order.
pub(crate) fn filter_month(list: &[Transaction], month: Month) -> Vec<&Transaction> {
    list.iter().filter(|t| month.contains(t.date)).collect()
}

/// The first `n` records: the newest entries.
pub(crate) fn recent(list: &[Transaction], n: usize) -> &[Transaction] {
    &list[..n.min(list.len())]
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyReport {
    pub(crate) month: Month,
    pub(crate) totals: Totals,
    pub(crate) income_by_category: BTreeMap<String, Decimal>,
    pub(crate) expenses_by_category: BTreeMap<String, Decimal>,
    pub(crate) transaction_count: usize,
}

pub(crate) fn monthly_report(list: &[Transaction], month: Month) -> MonthlyReport {
    let in_month = filter_month(list, month);
    MonthlyReport {
        month,
        totals: totals(in_month.iter().copied()),
        income_by_category: by_category(in_month.iter().copied(), TransactionType::Income),
        expenses_by_category: by_category(in_month.iter().copied(), TransactionType::Expense),
        transaction_count: in_month.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetLevel {
    OnTrack,
    Warning,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetStatus {
    pub(crate) ceiling: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) percentage: Decimal,
    pub(crate) remaining: Decimal,
}

impl BudgetStatus {
    /// Over 100% is over budget, over 80% is a warning.
    pub(crate) fn level(&self) -> BudgetLevel {
        if self.percentage > Decimal::ONE_HUNDRED {
            BudgetLevel::Over
        } else if self.percentage > Decimal::from(80) {
            BudgetLevel::Warning
        } else {
            BudgetLevel::OnTrack
        }
    }

    pub(crate) fn is_over(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

/// How much of the `category` ceiling for `month` has been spent.
///
/// `None` when no ceiling is set. A ceiling of zero also reads as unset.
pub(crate) fn budget_status(
    list: &[Transaction],
    budgets: &BudgetStore,
    month: Month,
    category: &str,
) -> Option<BudgetStatus> {
    let ceiling = budgets.get(month, category).filter(|c| !c.is_zero())?;
    let spent: Decimal = list
        .iter()
        .filter(|t| t.is_expense() && t.category == category && month.contains(t.date))
        .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.amount));
    // Stored amounts are not re-checked on load; overflow saturates.
    let percentage = spent
        .checked_div(ceiling)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX);
    Some(BudgetStatus {
        ceiling,
        spent,
        percentage,
        remaining: ceiling.saturating_sub(spent),
    })
}

/// Status of every ceiling set for `month`: catalog expense categories first
/// in catalog order, then any other categories by name.
pub(crate) fn budget_overview(
    list: &[Transaction],
    budgets: &BudgetStore,
    month: Month,
) -> Vec<(String, BudgetStatus)> {
    let catalog_order = catalog::all_expense_categories();
    let mut rows: Vec<(String, BudgetStatus)> = catalog_order
        .iter()
        .filter_map(|c| budget_status(list, budgets, month, c).map(|s| (c.to_string(), s)))
        .collect();

    for (category, _) in budgets.for_month(month) {
        if catalog_order.contains(&category) {
            continue;
        }
        if let Some(status) = budget_status(list, budgets, month, category) {
            rows.push((category.to_string(), status));
        }
    }
    rows
}

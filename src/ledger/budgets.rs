use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::check_amount;
use crate::error::Rejection;
use crate::models::{BudgetKey, Month};

/// Spending ceilings, at most one per month and category.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct BudgetStore {
    ceilings: BTreeMap<BudgetKey, Decimal>,
}

impl BudgetStore {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_map(ceilings: BTreeMap<BudgetKey, Decimal>) -> Self {
        Self { ceilings }
    }

    /// Set or replace the ceiling for `category` in `month`.
    pub(crate) fn set(
        &mut self,
        month: Month,
        category: &str,
        amount: Decimal,
    ) -> Result<(), Rejection> {
        let category = category.trim();
        if category.is_empty() {
            return Err(Rejection::MissingCategory);
        }
        check_amount(amount)?;
        tracing::info!(%month, category, %amount, "Set budget");
        self.ceilings.insert(BudgetKey::new(month, category), amount);
        Ok(())
    }

    pub(crate) fn get(&self, month: Month, category: &str) -> Option<Decimal> {
        self.ceilings
            .get(&BudgetKey::new(month, category.trim()))
            .copied()
    }

    /// Ceilings set for `month`, ordered by category name.
    pub(crate) fn for_month(&self, month: Month) -> impl Iterator<Item = (&str, Decimal)> {
        self.ceilings
            .iter()
            .filter(move |(key, _)| key.month == month)
            .map(|(key, amount)| (key.category.as_str(), *amount))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&BudgetKey, &Decimal)> {
        self.ceilings.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.ceilings.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ceilings.is_empty()
    }
}

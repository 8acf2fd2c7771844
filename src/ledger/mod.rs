//! The books: every transaction and budget ceiling, held in memory and
//! loaded from / saved to a [`KeyValueStore`] explicitly.

mod budgets;
mod transactions;

pub(crate) use budgets::BudgetStore;
pub(crate) use transactions::TransactionStore;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::db::{KeyValueStore, BUDGETS_KEY, TRANSACTIONS_KEY};
use crate::error::Rejection;
use crate::models::{BudgetKey, Transaction};

/// Largest amount a transaction or budget ceiling may hold: 1,000,000,000,000.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);
pub(crate) const MAX_DECIMALS: u32 = 2;

/// Accept a non-negative amount within [`MAX_AMOUNT`] and [`MAX_DECIMALS`].
/// Keeps the sums and ratios in `report` far from `Decimal`'s range.
pub(crate) fn check_amount(amount: Decimal) -> Result<Decimal, Rejection> {
    if amount < Decimal::ZERO {
        return Err(Rejection::NegativeAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(Rejection::AmountTooLarge(amount));
    }
    if amount.normalize().scale() > MAX_DECIMALS {
        return Err(Rejection::TooManyDecimals(amount));
    }
    Ok(amount)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Books {
    pub(crate) transactions: TransactionStore,
    pub(crate) budgets: BudgetStore,
}

/// A budget ceiling as it sits in storage: a plain JSON number.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct StoredAmount(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

impl Books {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Read both collections. A missing entry is an empty collection.
    pub(crate) fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let transactions: Vec<Transaction> = match store.get(TRANSACTIONS_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("Stored entry '{TRANSACTIONS_KEY}' is corrupt"))?,
            None => Vec::new(),
        };

        let stored: BTreeMap<String, StoredAmount> = match store.get(BUDGETS_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("Stored entry '{BUDGETS_KEY}' is corrupt"))?,
            None => BTreeMap::new(),
        };

        let mut ceilings = BTreeMap::new();
        for (raw_key, StoredAmount(amount)) in stored {
            match BudgetKey::from_storage_key(&raw_key) {
                Some(key) => {
                    ceilings.insert(key, amount);
                }
                None => tracing::warn!(key = %raw_key, "Skipping unreadable budget key"),
            }
        }

        tracing::debug!(
            transactions = transactions.len(),
            budgets = ceilings.len(),
            "Loaded books"
        );

        Ok(Self {
            transactions: TransactionStore::from_vec(transactions),
            budgets: BudgetStore::from_map(ceilings),
        })
    }

    /// Write both collections in full.
    pub(crate) fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let transactions = serde_json::to_string(self.transactions.all())
            .context("Failed to serialize transactions")?;

        let budgets: BTreeMap<String, StoredAmount> = self
            .budgets
            .iter()
            .map(|(key, amount)| (key.to_storage_key(), StoredAmount(*amount)))
            .collect();
        let budgets = serde_json::to_string(&budgets).context("Failed to serialize budgets")?;

        store.set(TRANSACTIONS_KEY, &transactions)?;
        store.set(BUDGETS_KEY, &budgets)?;
        tracing::debug!(
            transactions = self.transactions.len(),
            budgets = self.budgets.len(),
            "Saved books"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests;

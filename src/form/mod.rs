//! Input forms and the edit-mode state machine that decides whether the
//! next submit creates a record or updates one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::Rejection;
use crate::ledger::{check_amount, TransactionStore};
use crate::models::{Month, Transaction, TransactionFields, TransactionId, TransactionType};

/// Raw transaction form contents, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionForm {
    pub(crate) kind: TransactionType,
    pub(crate) category: String,
    pub(crate) amount: String,
    pub(crate) description: String,
    pub(crate) date: String,
}

impl TransactionForm {
    /// An empty income form dated `today`.
    pub(crate) fn blank(today: NaiveDate) -> Self {
        Self {
            kind: TransactionType::Income,
            category: String::new(),
            amount: String::new(),
            description: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub(crate) fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            category: txn.category.clone(),
            amount: txn.amount.to_string(),
            description: txn.description.clone(),
            date: txn.date.format("%Y-%m-%d").to_string(),
        }
    }

    pub(crate) fn parse(&self) -> Result<TransactionFields, Rejection> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(Rejection::MissingCategory);
        }
        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;
        Ok(TransactionFields {
            kind: self.kind,
            category: category.to_string(),
            amount,
            description: self.description.trim().to_string(),
            date,
        })
    }
}

/// Raw budget form contents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetForm {
    pub(crate) month: String,
    pub(crate) category: String,
    pub(crate) amount: String,
}

impl BudgetForm {
    pub(crate) fn parse(&self) -> Result<(Month, String, Decimal), Rejection> {
        let month = Month::parse(&self.month)
            .ok_or_else(|| Rejection::InvalidMonth(self.month.trim().to_string()))?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(Rejection::MissingCategory);
        }
        let amount = parse_amount(&self.amount)?;
        Ok((month, category.to_string(), amount))
    }
}

/// Parse an amount the books will accept. Thousands separators are allowed.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, Rejection> {
    let cleaned = raw.trim().replace([',', '_'], "");
    if cleaned.is_empty() {
        return Err(Rejection::MissingAmount);
    }
    let amount = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| Rejection::InvalidAmount(raw.trim().to_string()))?;
    check_amount(amount)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, Rejection> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| Rejection::InvalidDate(raw.trim().to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EditMode {
    /// The next submit creates a new record.
    #[default]
    Idle,
    /// The next submit replaces this record.
    Editing(TransactionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Submitted {
    Added(TransactionId),
    Updated(TransactionId),
    /// The record being edited no longer exists; nothing was written.
    Missing(TransactionId),
}

impl EditMode {
    pub(crate) fn begin_edit(&mut self, id: TransactionId) {
        *self = Self::Editing(id);
    }

    pub(crate) fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub(crate) fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Apply `form` to `store`. On rejection the mode is left as it was.
    pub(crate) fn submit(
        &mut self,
        form: &TransactionForm,
        store: &mut TransactionStore,
    ) -> Result<Submitted, Rejection> {
        let fields = form.parse()?;
        match *self {
            Self::Idle => store.add(fields).map(Submitted::Added),
            Self::Editing(id) => {
                let found = store.update(id, fields)?;
                *self = Self::Idle;
                Ok(if found {
                    Submitted::Updated(id)
                } else {
                    Submitted::Missing(id)
                })
            }
        }
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub(crate) type TransactionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "i" => Some(Self::Income),
            "expense" | "expenses" | "out" | "e" => Some(Self::Expense),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense]
    }

    pub(crate) fn toggled(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The user-supplied part of a transaction. Everything except the id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionFields {
    pub(crate) kind: TransactionType,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub(crate) id: TransactionId,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionType,
    pub(crate) category: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub(crate) amount: Decimal,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
}

impl Transaction {
    pub(crate) fn from_fields(id: TransactionId, fields: TransactionFields) -> Self {
        Self {
            id,
            kind: fields.kind,
            category: fields.category,
            amount: fields.amount,
            description: fields.description,
            date: fields.date,
        }
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> TransactionFields {
        TransactionFields {
            kind: self.kind,
            category: self.category.clone(),
            amount: self.amount,
            description: self.description.clone(),
            date: self.date,
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign it has on the books: expenses negative.
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

mod budget;
pub(crate) mod catalog;
mod month;
mod transaction;

pub(crate) use budget::BudgetKey;
pub(crate) use month::Month;
pub(crate) use transaction::{Transaction, TransactionFields, TransactionId, TransactionType};

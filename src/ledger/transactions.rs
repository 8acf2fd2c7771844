use super::check_amount;
use crate::error::Rejection;
use crate::models::{Transaction, TransactionFields, TransactionId};

/// Transactions in insertion order, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TransactionStore {
    items: Vec<Transaction>,
}

impl TransactionStore {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-ordered list, e.g. one read back from storage.
    pub(crate) fn from_vec(items: Vec<Transaction>) -> Self {
        Self { items }
    }

    /// Record a new transaction stamped with the current clock.
    pub(crate) fn add(&mut self, fields: TransactionFields) -> Result<TransactionId, Rejection> {
        self.add_at(fields, chrono::Utc::now().timestamp_millis())
    }

    /// Record a new transaction using `clock_millis` as the id candidate.
    ///
    /// The id is bumped past the largest existing id when the clock has not
    /// moved on, so ids stay unique within the list.
    pub(crate) fn add_at(
        &mut self,
        fields: TransactionFields,
        clock_millis: i64,
    ) -> Result<TransactionId, Rejection> {
        let fields = validate(fields)?;
        let id = self.next_id(clock_millis);
        tracing::info!(
            id,
            kind = %fields.kind,
            category = %fields.category,
            amount = %fields.amount,
            "Added transaction"
        );
        self.items.insert(0, Transaction::from_fields(id, fields));
        Ok(id)
    }

    fn next_id(&self, clock_millis: i64) -> TransactionId {
        let Some(max) = self.items.iter().map(|t| t.id).max() else {
            return clock_millis;
        };
        if clock_millis > max {
            return clock_millis;
        }
        // Ids already reach i64::MAX: go below the smallest instead.
        max.checked_add(1).unwrap_or_else(|| {
            let min = self.items.iter().map(|t| t.id).min().unwrap_or(max);
            min.saturating_sub(1)
        })
    }

    /// Replace the record with `id`, keeping its id and position.
    ///
    /// Returns `Ok(false)` without touching anything when `id` is absent.
    pub(crate) fn update(
        &mut self,
        id: TransactionId,
        fields: TransactionFields,
    ) -> Result<bool, Rejection> {
        let fields = validate(fields)?;
        match self.items.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = Transaction::from_fields(id, fields);
                tracing::info!(id, "Updated transaction");
                Ok(true)
            }
            None => {
                tracing::debug!(id, "Update skipped, no such transaction");
                Ok(false)
            }
        }
    }

    /// Delete the record with `id`. Returns `false` when there was none.
    pub(crate) fn remove(&mut self, id: TransactionId) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::info!(id, "Removed transaction");
        }
        removed
    }

    pub(crate) fn all(&self) -> &[Transaction] {
        &self.items
    }

    pub(crate) fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn validate(mut fields: TransactionFields) -> Result<TransactionFields, Rejection> {
    fields.category = fields.category.trim().to_string();
    if fields.category.is_empty() {
        return Err(Rejection::MissingCategory);
    }
    check_amount(fields.amount)?;
    Ok(fields)
}

//! CSV export of the full transaction list.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

pub(crate) const HEADER: [&str; 5] = ["Date", "Type", "Category", "Amount", "Description"];

/// Write the header and one row per transaction, in list order.
/// Returns the number of rows written.
pub(crate) fn write_csv<W: Write>(list: &[Transaction], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for txn in list {
        let date = txn.date.format("%Y-%m-%d").to_string();
        let amount = txn.amount.normalize().to_string();
        wtr.write_record([
            date.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            amount.as_str(),
            txn.description.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(list.len())
}

pub(crate) fn export_to_path(list: &[Transaction], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(list, file)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    tracing::info!(rows = count, path = %path.display(), "Exported transactions");
    Ok(count)
}

pub(crate) fn default_file_name(today: NaiveDate) -> String {
    format!("bakery-transactions-{}.csv", today.format("%Y-%m-%d"))
}

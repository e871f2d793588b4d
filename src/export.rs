use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Transaction;

/// Write transactions as `id,type,amount,description` rows. Returns the row count.
pub(crate) fn export_transactions(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(["id", "type", "amount", "description"])?;
    for txn in transactions {
        let amount = format!("{:.2}", txn.amount);
        wtr.write_record([
            txn.id.as_str(),
            txn.kind.as_str(),
            amount.as_str(),
            txn.description.as_str(),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(transactions.len())
}

pub(crate) fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = directories::UserDirs::new()
            .map(|d| d.home_dir().display().to_string())
            .unwrap_or_else(|| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// `~/mywallet-transactions.csv` unless a path is given.
pub(crate) fn default_export_path() -> String {
    expand_home("~/mywallet-transactions.csv")
}

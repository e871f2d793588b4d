//! In-memory stores that write their full state back after every mutation.
//!
//! Nothing in here returns an error to the caller. A read that fails or finds
//! garbage yields an empty store ([`LoadOutcome::RecoveredDefault`]); a write
//! that fails is logged and reported as [`SaveStatus::Failed`] while the
//! in-memory state stays authoritative.

mod budgets;
mod ids;
mod transactions;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::storage::Storage;

pub(crate) use budgets::BudgetStore;
pub(crate) use transactions::TransactionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    Ok,
    RecoveredDefault(Recovery),
}

impl LoadOutcome {
    /// True when persisted data existed but could not be used.
    pub(crate) fn lost_data(&self) -> bool {
        matches!(
            self,
            Self::RecoveredDefault(Recovery::Malformed(_) | Recovery::Unreadable(_))
        )
    }

    /// Why persisted data was discarded, if it was.
    pub(crate) fn reason(&self) -> Option<&str> {
        match self {
            Self::RecoveredDefault(Recovery::Malformed(r) | Recovery::Unreadable(r)) => Some(r),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Recovery {
    /// Nothing stored under the key yet.
    Missing,
    /// Stored value is not a `{ "items": [...] }` document.
    Malformed(String),
    /// The storage itself failed to read.
    Unreadable(String),
}

/// Result of the write that follows a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SaveStatus {
    Saved,
    /// Write attempted and rejected; the change lives only in memory.
    Failed,
    /// Lookup missed, nothing changed, nothing written.
    Skipped,
}

#[derive(Deserialize)]
struct Items<T> {
    items: Vec<T>,
}

#[derive(Serialize)]
struct ItemsRef<'a, T> {
    items: &'a [T],
}

fn load_items<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> (Vec<T>, LoadOutcome) {
    let raw = match storage.load(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            tracing::debug!(key, "nothing persisted, starting empty");
            return (Vec::new(), LoadOutcome::RecoveredDefault(Recovery::Missing));
        }
        Err(e) => {
            tracing::warn!(key, "failed to read persisted state, starting empty: {e:#}");
            return (
                Vec::new(),
                LoadOutcome::RecoveredDefault(Recovery::Unreadable(format!("{e:#}"))),
            );
        }
    };

    match serde_json::from_str::<Items<T>>(&raw) {
        Ok(doc) => {
            tracing::debug!(key, items = doc.items.len(), "loaded persisted state");
            (doc.items, LoadOutcome::Ok)
        }
        Err(e) => {
            tracing::warn!(key, "persisted state is malformed, starting empty: {e}");
            (
                Vec::new(),
                LoadOutcome::RecoveredDefault(Recovery::Malformed(e.to_string())),
            )
        }
    }
}

fn save_items<T: Serialize>(storage: &mut dyn Storage, key: &str, items: &[T]) -> SaveStatus {
    let value = match serde_json::to_string(&ItemsRef { items }) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, "failed to serialize state: {e}");
            return SaveStatus::Failed;
        }
    };

    match storage.save(key, &value) {
        Ok(()) => {
            tracing::debug!(key, items = items.len(), "persisted state");
            SaveStatus::Saved
        }
        Err(e) => {
            tracing::warn!(key, "failed to persist state, keeping it in memory: {e:#}");
            SaveStatus::Failed
        }
    }
}

#[cfg(test)]
mod tests;

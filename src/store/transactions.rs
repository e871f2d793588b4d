use rust_decimal::Decimal;

use super::ids::IdGenerator;
use super::{load_items, save_items, LoadOutcome, SaveStatus};
use crate::models::{Transaction, TransactionKind};
use crate::storage::Storage;

pub(crate) struct TransactionStore {
    items: Vec<Transaction>,
    ids: IdGenerator,
}

impl TransactionStore {
    pub(crate) const KEY: &'static str = "transactions";

    pub(crate) fn load(storage: &dyn Storage) -> (Self, LoadOutcome) {
        let (items, outcome) = load_items::<Transaction>(storage, Self::KEY);
        let ids = IdGenerator::seeded(items.iter().map(|t| t.id.as_str()));
        (Self { items, ids }, outcome)
    }

    pub(crate) fn items(&self) -> &[Transaction] {
        &self.items
    }

    /// Appends a transaction and persists. The store does not validate its
    /// inputs; callers check presence first.
    pub(crate) fn add_transaction(
        &mut self,
        storage: &mut dyn Storage,
        kind: TransactionKind,
        amount: Decimal,
        description: String,
    ) -> (String, SaveStatus) {
        let id = self.ids.next_id();
        self.items.push(Transaction::new(id.clone(), kind, amount, description));
        (id, save_items(storage, Self::KEY, &self.items))
    }
}

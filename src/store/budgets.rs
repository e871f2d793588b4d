use rust_decimal::Decimal;

use super::ids::IdGenerator;
use super::{load_items, save_items, LoadOutcome, SaveStatus};
use crate::models::{Budget, BudgetPatch, Saving};
use crate::storage::Storage;

pub(crate) struct BudgetStore {
    items: Vec<Budget>,
    ids: IdGenerator,
}

impl BudgetStore {
    pub(crate) const KEY: &'static str = "budgets";

    pub(crate) fn load(storage: &dyn Storage) -> (Self, LoadOutcome) {
        let (items, outcome) = load_items::<Budget>(storage, Self::KEY);
        let ids = IdGenerator::seeded(items.iter().map(|b| b.id.as_str()));
        (Self { items, ids }, outcome)
    }

    pub(crate) fn items(&self) -> &[Budget] {
        &self.items
    }

    pub(crate) fn add_budget(
        &mut self,
        storage: &mut dyn Storage,
        name: String,
        target: Decimal,
        color: Option<String>,
    ) -> (String, SaveStatus) {
        let id = self.ids.next_id();
        self.items.push(Budget::new(id.clone(), name, target, color));
        (id, self.persist(storage))
    }

    pub(crate) fn add_saving(
        &mut self,
        storage: &mut dyn Storage,
        budget_id: &str,
        month: String,
        amount: Decimal,
    ) -> SaveStatus {
        let Some(budget) = self.find_mut(budget_id) else {
            return SaveStatus::Skipped;
        };
        budget.savings.push(Saving::new(month, amount));
        self.persist(storage)
    }

    pub(crate) fn edit_budget(
        &mut self,
        storage: &mut dyn Storage,
        id: &str,
        patch: BudgetPatch,
    ) -> SaveStatus {
        let Some(budget) = self.find_mut(id) else {
            return SaveStatus::Skipped;
        };
        patch.apply(budget);
        self.persist(storage)
    }

    /// Drops the budget and its savings. Persists even when no budget matched.
    pub(crate) fn remove_budget(&mut self, storage: &mut dyn Storage, id: &str) -> SaveStatus {
        self.items.retain(|b| b.id != id);
        self.persist(storage)
    }

    /// Removes every saving recorded for `month`, not just the first.
    pub(crate) fn remove_saving(
        &mut self,
        storage: &mut dyn Storage,
        budget_id: &str,
        month: &str,
    ) -> SaveStatus {
        let Some(budget) = self.find_mut(budget_id) else {
            return SaveStatus::Skipped;
        };
        budget.savings.retain(|s| s.month != month);
        self.persist(storage)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Budget> {
        self.items.iter_mut().find(|b| b.id == id)
    }

    fn persist(&self, storage: &mut dyn Storage) -> SaveStatus {
        save_items(storage, Self::KEY, &self.items)
    }
}

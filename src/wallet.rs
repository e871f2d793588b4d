use rust_decimal::Decimal;

use crate::models::{Budget, BudgetPatch, Transaction, TransactionKind};
use crate::storage::Storage;
use crate::store::{BudgetStore, LoadOutcome, SaveStatus, TransactionStore};

/// How each store came up at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadReport {
    pub(crate) transactions: LoadOutcome,
    pub(crate) budgets: LoadOutcome,
}

/// Application state root: both stores plus the storage they write to.
pub(crate) struct Wallet {
    storage: Box<dyn Storage>,
    transactions: TransactionStore,
    budgets: BudgetStore,
    load_report: LoadReport,
}

impl Wallet {
    pub(crate) fn open(storage: Box<dyn Storage>) -> Self {
        let (transactions, txn_outcome) = TransactionStore::load(&*storage);
        let (budgets, budget_outcome) = BudgetStore::load(&*storage);
        tracing::info!(
            transactions = transactions.items().len(),
            budgets = budgets.items().len(),
            "wallet loaded"
        );
        Self {
            storage,
            transactions,
            budgets,
            load_report: LoadReport {
                transactions: txn_outcome,
                budgets: budget_outcome,
            },
        }
    }

    pub(crate) fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    // ── Queries ───────────────────────────────────────────────

    pub(crate) fn transactions(&self) -> &[Transaction] {
        self.transactions.items()
    }

    pub(crate) fn budgets(&self) -> &[Budget] {
        self.budgets.items()
    }

    pub(crate) fn budget(&self, id: &str) -> Option<&Budget> {
        Budget::find_by_id(self.budgets.items(), id)
    }

    // ── Commands ──────────────────────────────────────────────

    pub(crate) fn add_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        description: String,
    ) -> (String, SaveStatus) {
        self.transactions.add_transaction(&mut *self.storage, kind, amount, description)
    }

    pub(crate) fn add_budget(
        &mut self,
        name: String,
        target: Decimal,
        color: Option<String>,
    ) -> (String, SaveStatus) {
        self.budgets.add_budget(&mut *self.storage, name, target, color)
    }

    pub(crate) fn add_saving(
        &mut self,
        budget_id: &str,
        month: String,
        amount: Decimal,
    ) -> SaveStatus {
        self.budgets.add_saving(&mut *self.storage, budget_id, month, amount)
    }

    pub(crate) fn edit_budget(&mut self, id: &str, patch: BudgetPatch) -> SaveStatus {
        self.budgets.edit_budget(&mut *self.storage, id, patch)
    }

    pub(crate) fn remove_budget(&mut self, id: &str) -> SaveStatus {
        self.budgets.remove_budget(&mut *self.storage, id)
    }

    pub(crate) fn remove_saving(&mut self, budget_id: &str, month: &str) -> SaveStatus {
        self.budgets.remove_saving(&mut *self.storage, budget_id, month)
    }
}

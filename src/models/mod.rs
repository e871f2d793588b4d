mod budget;
mod transaction;

pub use budget::{Budget, BudgetPatch, BudgetProgress, Saving};
pub use transaction::{Transaction, TransactionKind};

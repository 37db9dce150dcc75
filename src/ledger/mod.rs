//! Expense records, budget table, and the ledger that owns them.

pub mod budget;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use budget::BudgetTable;
pub use expense::Expense;
pub use ledger::{Ledger, LedgerState};

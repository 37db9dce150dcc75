//! Persistence gateway for ledger state.

pub mod json_backend;

use crate::{
    errors::{LedgerError, StoreKind},
    ledger::LedgerState,
};

pub use json_backend::{JsonStorage, BUDGETS_FILE, EXPENSES_FILE, STORE_SCHEMA_VERSION};

/// Outcome of reading both stores. Unreadable stores load as empty and leave a warning.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub state: LedgerState,
    pub warnings: Vec<LedgerError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Outcome of writing both stores. Failures never affect the in-memory ledger.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub written: Vec<StoreKind>,
    pub failures: Vec<LedgerError>,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Abstraction over backends able to persist the expense and budget stores.
pub trait LedgerStore: Send + Sync {
    fn load(&self) -> LoadReport;
    fn save(&self, state: &LedgerState) -> SaveReport;
}

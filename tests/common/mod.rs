#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use expense_tracker::{
    core::LedgerManager, currency::ConversionRates, errors::LedgerError, storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_root() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn storage_in(root: &Path) -> JsonStorage {
    JsonStorage::new(root.join("data")).expect("create json storage backend")
}

/// Opens a manager over an isolated data directory, returning it with the load warnings.
pub fn open_manager(root: &Path) -> (LedgerManager, Vec<LedgerError>) {
    LedgerManager::open(Box::new(storage_in(root)), ConversionRates::default())
}

/// Records the three-expense scenario used throughout the suite.
pub fn record_sample_expenses(manager: &mut LedgerManager) {
    manager.record_expense(12.50, "Food", "Lunch");
    manager.record_expense(7.25, "Food", "Snack");
    manager.record_expense(40.00, "Transport", "Taxi");
}

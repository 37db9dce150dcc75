use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    errors::{LedgerError, StoreKind},
    ledger::{BudgetTable, Expense, LedgerState},
};

use super::{LedgerStore, LoadReport, SaveReport};

pub const EXPENSES_FILE: &str = "expenses.json";
pub const BUDGETS_FILE: &str = "budgets.json";
pub const STORE_SCHEMA_VERSION: u32 = 1;
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Serialize, Deserialize)]
struct ExpenseDocument {
    schema_version: u32,
    #[serde(default)]
    expenses: Vec<Expense>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BudgetDocument {
    schema_version: u32,
    #[serde(default)]
    budgets: BTreeMap<String, f64>,
}

/// Filesystem-backed JSON persistence writing expenses and budgets to separate files.
///
/// Each file is replaced via a temporary sibling and a rename, but the pair is not
/// written atomically: a crash between the two writes leaves one store stale.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self, LedgerError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn store_path(&self, store: StoreKind) -> PathBuf {
        match store {
            StoreKind::Expenses => self.root.join(EXPENSES_FILE),
            StoreKind::Budgets => self.root.join(BUDGETS_FILE),
        }
    }

    pub fn load_expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        let document: ExpenseDocument = read_document(&self.store_path(StoreKind::Expenses))
            .map_err(|err| LedgerError::unavailable(StoreKind::Expenses, err))?;
        check_schema(StoreKind::Expenses, document.schema_version)?;
        Ok(document.expenses)
    }

    pub fn load_budgets(&self) -> Result<BudgetTable, LedgerError> {
        let document: BudgetDocument = read_document(&self.store_path(StoreKind::Budgets))
            .map_err(|err| LedgerError::unavailable(StoreKind::Budgets, err))?;
        check_schema(StoreKind::Budgets, document.schema_version)?;
        let mut table = BudgetTable::new();
        for (category, amount) in document.budgets {
            table
                .set(&category, amount)
                .map_err(|err| LedgerError::unavailable(StoreKind::Budgets, err))?;
        }
        Ok(table)
    }

    /// Refuses non-finite amounts, which JSON cannot represent, leaving the previous file in place.
    pub fn save_expenses(&self, expenses: &[Expense]) -> Result<(), LedgerError> {
        if let Some(bad) = expenses.iter().find(|expense| !expense.amount().is_finite()) {
            return Err(LedgerError::write_failed(
                StoreKind::Expenses,
                format!(
                    "amount {} for `{}` cannot be stored",
                    bad.amount(),
                    bad.category()
                ),
            ));
        }
        let document = ExpenseDocument {
            schema_version: STORE_SCHEMA_VERSION,
            expenses: expenses.to_vec(),
        };
        write_document(&self.store_path(StoreKind::Expenses), &document)
            .map_err(|err| LedgerError::write_failed(StoreKind::Expenses, err))
    }

    pub fn save_budgets(&self, budgets: &BudgetTable) -> Result<(), LedgerError> {
        let document = BudgetDocument {
            schema_version: STORE_SCHEMA_VERSION,
            budgets: budgets.snapshot(),
        };
        write_document(&self.store_path(StoreKind::Budgets), &document)
            .map_err(|err| LedgerError::write_failed(StoreKind::Budgets, err))
    }
}

impl LedgerStore for JsonStorage {
    fn load(&self) -> LoadReport {
        let mut report = LoadReport::default();
        match self.load_expenses() {
            Ok(expenses) => report.state.expenses = expenses,
            Err(err) => {
                warn!(error = %err, "starting with an empty expense list");
                report.warnings.push(err);
            }
        }
        match self.load_budgets() {
            Ok(budgets) => report.state.budgets = budgets,
            Err(err) => {
                warn!(error = %err, "starting with an empty budget table");
                report.warnings.push(err);
            }
        }
        info!(
            expenses = report.state.expenses.len(),
            budgets = report.state.budgets.len(),
            dir = %self.root.display(),
            "ledger loaded"
        );
        report
    }

    fn save(&self, state: &LedgerState) -> SaveReport {
        let mut report = SaveReport::default();
        let results = [
            (StoreKind::Expenses, self.save_expenses(&state.expenses)),
            (StoreKind::Budgets, self.save_budgets(&state.budgets)),
        ];
        for (store, result) in results {
            match result {
                Ok(()) => report.written.push(store),
                Err(err) => {
                    warn!(error = %err, "store not saved");
                    report.failures.push(err);
                }
            }
        }
        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "ledger saved"
        );
        report
    }
}

fn check_schema(store: StoreKind, version: u32) -> Result<(), LedgerError> {
    if version > STORE_SCHEMA_VERSION {
        return Err(LedgerError::unavailable(
            store,
            format!(
                "schema version {} is newer than supported version {}",
                version, STORE_SCHEMA_VERSION
            ),
        ));
    }
    Ok(())
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, LedgerError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(LedgerError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("`{}` does not exist", path.display()),
            )))
        }
        Err(err) => return Err(err.into()),
    };
    Ok(serde_json::from_str(&data)?)
}

fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), LedgerError> {
    let json = serde_json::to_string_pretty(document)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("data")).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn missing_files_load_as_empty_with_warnings() {
        let (storage, _guard) = storage_with_temp_dir();
        let report = storage.load();

        assert_eq!(report.state, LedgerState::default());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().all(|warning| matches!(
            warning,
            LedgerError::PersistenceUnavailable { .. }
        )));
    }

    #[test]
    fn save_writes_both_files_without_leftover_tmp() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut state = LedgerState::default();
        state.expenses.push(Expense::new(4.0, "Coffee", "Latte"));
        state.budgets.set("Coffee", 25.0).unwrap();

        let report = storage.save(&state);
        assert!(report.is_clean());
        assert_eq!(report.written, vec![StoreKind::Expenses, StoreKind::Budgets]);
        assert!(storage.store_path(StoreKind::Expenses).exists());
        assert!(storage.store_path(StoreKind::Budgets).exists());
        assert!(!tmp_path(&storage.store_path(StoreKind::Expenses)).exists());
    }

    #[test]
    fn newer_schema_is_reported_unavailable() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(
            storage.store_path(StoreKind::Budgets),
            r#"{"schema_version": 99, "budgets": {"Food": 10.0}}"#,
        )
        .unwrap();

        let err = storage.load_budgets().expect_err("future schema");
        assert!(matches!(
            err,
            LedgerError::PersistenceUnavailable {
                store: StoreKind::Budgets,
                ..
            }
        ));
    }

    #[test]
    fn negative_stored_budget_is_rejected_on_load() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(
            storage.store_path(StoreKind::Budgets),
            r#"{"schema_version": 1, "budgets": {"Food": -1.0}}"#,
        )
        .unwrap();

        assert!(storage.load_budgets().is_err());
    }
}

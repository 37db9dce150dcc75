use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::{
    core::services::{
        CategoryBudgetStatus, ConversionService, ConvertedLine, Summary, SummaryService,
    },
    currency::ConversionRates,
    errors::LedgerError,
    ledger::{Expense, Ledger},
    storage::{LedgerStore, LoadReport, SaveReport},
};

/// Result of a budget change, including the checkpoint save that followed it.
#[derive(Debug)]
pub struct BudgetUpdate {
    pub previous: Option<f64>,
    pub save: SaveReport,
}

/// Facade that owns the session ledger and coordinates it with persistence.
pub struct LedgerManager {
    ledger: Ledger,
    store: Box<dyn LedgerStore>,
    rates: ConversionRates,
}

impl LedgerManager {
    /// Builds a manager from whatever the store can load. Load problems come back as warnings.
    pub fn open(store: Box<dyn LedgerStore>, rates: ConversionRates) -> (Self, Vec<LedgerError>) {
        let report = store.load();
        let manager = Self {
            ledger: Ledger::from_state(report.state),
            store,
            rates,
        };
        (manager, report.warnings)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn rates(&self) -> &ConversionRates {
        &self.rates
    }

    pub fn set_rates(&mut self, rates: ConversionRates) {
        self.rates = rates;
    }

    pub fn record_expense(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> &Expense {
        let expense = self.ledger.record_expense(amount, category, description);
        debug!(amount, category = expense.category(), "expense recorded");
        expense
    }

    pub fn history(&self) -> &[Expense] {
        self.ledger.history()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn summarize(&self) -> Summary {
        SummaryService::summarize(&self.ledger)
    }

    pub fn budget_status(&self) -> Vec<CategoryBudgetStatus> {
        SummaryService::budget_status(&self.ledger)
    }

    pub fn list_budgets(&self) -> BTreeMap<String, f64> {
        self.ledger.list_budgets()
    }

    /// Updates a budget and then saves, since a budget change is a checkpoint.
    pub fn set_budget(&mut self, category: &str, amount: f64) -> Result<BudgetUpdate, LedgerError> {
        let previous = self.ledger.set_budget(category, amount)?;
        debug!(category, amount, ?previous, "budget set");
        let save = self.save();
        Ok(BudgetUpdate { previous, save })
    }

    pub fn convert(&self, target: &str) -> Result<Vec<ConvertedLine>, LedgerError> {
        ConversionService::convert(&self.ledger, target, &self.rates)
    }

    pub fn save(&self) -> SaveReport {
        self.store.save(&self.ledger.to_state())
    }

    /// Replaces the in-memory ledger with what is currently on disk.
    pub fn reload(&mut self) -> LoadReport {
        let report = self.store.load();
        self.ledger = Ledger::from_state(report.state.clone());
        info!(expenses = self.ledger.len(), "ledger reloaded");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreKind;
    use crate::ledger::LedgerState;
    use std::sync::Mutex;

    /// In-memory store that can be told to reject writes.
    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Option<LedgerState>>,
        fail_writes: bool,
    }

    impl LedgerStore for MemoryStore {
        fn load(&self) -> LoadReport {
            let state = self.saved.lock().map(|s| (*s).clone()).unwrap_or_default();
            LoadReport {
                state: state.unwrap_or_default(),
                warnings: Vec::new(),
            }
        }

        fn save(&self, state: &LedgerState) -> SaveReport {
            if self.fail_writes {
                return SaveReport {
                    written: Vec::new(),
                    failures: vec![LedgerError::PersistenceWriteFailed {
                        store: StoreKind::Expenses,
                        reason: "disk full".into(),
                    }],
                };
            }
            if let Ok(mut saved) = self.saved.lock() {
                *saved = Some(state.clone());
            }
            SaveReport {
                written: vec![StoreKind::Expenses, StoreKind::Budgets],
                failures: Vec::new(),
            }
        }
    }

    fn manager_with(store: MemoryStore) -> LedgerManager {
        let (manager, warnings) =
            LedgerManager::open(Box::new(store), ConversionRates::default());
        assert!(warnings.is_empty());
        manager
    }

    #[test]
    fn set_budget_returns_previous_and_checkpoints() {
        let mut manager = manager_with(MemoryStore::default());
        let first = manager.set_budget("Food", 100.0).expect("first budget");
        let second = manager.set_budget("Food", 80.0).expect("second budget");

        assert_eq!(first.previous, None);
        assert_eq!(second.previous, Some(100.0));
        assert!(second.save.is_clean());
        assert_eq!(manager.list_budgets()["Food"], 80.0);
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let mut manager = manager_with(MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        });
        manager.record_expense(5.0, "Food", "Bagel");
        let update = manager.set_budget("Food", 10.0).expect("budget accepted");

        assert!(!update.save.is_clean());
        assert_eq!(manager.history().len(), 1);
        assert_eq!(manager.ledger().budget_for("Food"), Some(10.0));
    }

    #[test]
    fn reload_replaces_unsaved_changes() {
        let mut manager = manager_with(MemoryStore::default());
        manager.record_expense(1.0, "Misc", "kept");
        assert!(manager.save().is_clean());
        manager.record_expense(2.0, "Misc", "dropped");

        let report = manager.reload();
        assert!(report.is_clean());
        assert_eq!(manager.history().len(), 1);
        assert_eq!(manager.history()[0].description(), "kept");
    }

    #[test]
    fn convert_uses_configured_rates() {
        let mut manager = manager_with(MemoryStore::default());
        manager.set_rates(ConversionRates::with_default_rate(2.0));
        manager.record_expense(10.0, "Books", "Novel");

        let lines = manager.convert("EUR").expect("convert");
        assert_eq!(lines[0].converted_amount, 20.0);
    }
}

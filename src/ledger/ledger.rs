use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{budget::BudgetTable, expense::Expense};
use crate::errors::LedgerError;

/// Snapshot of everything that is persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: BudgetTable,
}

/// Session owner of all recorded expenses and category budgets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    expenses: Vec<Expense>,
    budgets: BudgetTable,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: LedgerState) -> Self {
        Self {
            expenses: state.expenses,
            budgets: state.budgets,
        }
    }

    pub fn to_state(&self) -> LedgerState {
        LedgerState {
            expenses: self.expenses.clone(),
            budgets: self.budgets.clone(),
        }
    }

    pub fn record_expense(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> &Expense {
        self.push_expense(Expense::new(amount, category, description))
    }

    /// Appends an already-built expense, keeping recording order.
    pub fn push_expense(&mut self, expense: Expense) -> &Expense {
        self.expenses.push(expense);
        &self.expenses[self.expenses.len() - 1]
    }

    pub fn set_budget(&mut self, category: &str, amount: f64) -> Result<Option<f64>, LedgerError> {
        self.budgets.set(category, amount)
    }

    pub fn budget_for(&self, category: &str) -> Option<f64> {
        self.budgets.get(category)
    }

    pub fn list_budgets(&self) -> BTreeMap<String, f64> {
        self.budgets.snapshot()
    }

    pub fn budgets(&self) -> &BudgetTable {
        &self.budgets
    }

    pub fn history(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_preserves_recording_order() {
        let mut ledger = Ledger::new();
        ledger.record_expense(12.5, "Food", "Lunch");
        ledger.record_expense(40.0, "Transport", "Taxi");
        ledger.record_expense(7.25, "Food", "Snack");

        let descriptions: Vec<_> = ledger.history().iter().map(Expense::description).collect();
        assert_eq!(descriptions, vec!["Lunch", "Taxi", "Snack"]);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn empty_ledger_reports_empty() {
        let mut ledger = Ledger::new();
        assert!(ledger.is_empty());
        ledger.record_expense(0.0, "Misc", "");
        assert!(!ledger.is_empty());
    }

    #[test]
    fn negative_budget_leaves_prior_value() {
        let mut ledger = Ledger::new();
        ledger.set_budget("food", 50.0).unwrap();
        let err = ledger.set_budget("food", -5.0).unwrap_err();

        assert!(matches!(err, LedgerError::InvalidBudget { ref category, .. } if category == "food"));
        assert_eq!(ledger.budget_for("food"), Some(50.0));
    }

    #[test]
    fn repeated_budget_keeps_single_entry() {
        let mut ledger = Ledger::new();
        ledger.set_budget("Food", 80.0).unwrap();
        ledger.set_budget("Food", 80.0).unwrap();

        let budgets = ledger.list_budgets();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets["Food"], 80.0);
    }

    #[test]
    fn state_conversion_is_lossless() {
        let mut ledger = Ledger::new();
        ledger.record_expense(3.5, "Coffee", "Espresso");
        ledger.set_budget("Coffee", 30.0).unwrap();

        let restored = Ledger::from_state(ledger.to_state());
        assert_eq!(restored, ledger);
    }
}

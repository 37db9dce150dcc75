use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Current spending ceiling per category. Categories without an entry are unlimited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTable(BTreeMap<String, f64>);

impl BudgetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `amount` for `category`, returning the value it replaced.
    pub fn set(&mut self, category: &str, amount: f64) -> Result<Option<f64>, LedgerError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::InvalidBudget {
                category: category.to_string(),
                amount,
            });
        }
        Ok(self.0.insert(category.to_string(), amount))
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(category, amount)| (category.as_str(), *amount))
    }

    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.0.clone()
    }
}

impl From<BTreeMap<String, f64>> for BudgetTable {
    fn from(entries: BTreeMap<String, f64>) -> Self {
        Self(entries)
    }
}

use std::fmt;

use thiserror::Error;

/// Identifies one of the two independent persisted stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Expenses,
    Budgets,
}

impl StoreKind {
    pub fn label(self) -> &'static str {
        match self {
            StoreKind::Expenses => "expenses",
            StoreKind::Budgets => "budgets",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error type that captures ledger, aggregation, and persistence failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid budget for `{category}`: {amount} (budgets must be zero or positive)")]
    InvalidBudget { category: String, amount: f64 },
    #[error("Invalid currency code: `{0}`")]
    InvalidCurrencyCode(String),
    #[error("No expenses recorded")]
    EmptyLedger,
    #[error("The {store} store is unavailable: {reason}")]
    PersistenceUnavailable { store: StoreKind, reason: String },
    #[error("Failed to write the {store} store: {reason}")]
    PersistenceWriteFailed { store: StoreKind, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn unavailable(store: StoreKind, reason: impl fmt::Display) -> Self {
        LedgerError::PersistenceUnavailable {
            store,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failed(store: StoreKind, reason: impl fmt::Display) -> Self {
        LedgerError::PersistenceWriteFailed {
            store,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

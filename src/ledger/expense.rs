use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single recorded spending event. Fields are fixed once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    amount: f64,
    category: String,
    #[serde(default)]
    description: String,
    timestamp: DateTime<Utc>,
}

impl Expense {
    /// Creates an expense stamped with the current wall-clock time.
    pub fn new(amount: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_timestamp(amount, category, description, Utc::now())
    }

    /// Rebuilds an expense whose creation instant is already known.
    pub fn with_timestamp(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            timestamp,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {:.2} - {}",
            self.timestamp
                .with_timezone(&Local)
                .format(DISPLAY_TIMESTAMP_FORMAT),
            self.category,
            self.amount,
            self.description
        )
    }
}

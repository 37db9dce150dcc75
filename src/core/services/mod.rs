pub mod conversion_service;
pub mod summary_service;

pub use conversion_service::{ConversionService, ConvertedLine};
pub use summary_service::{BudgetHealth, CategoryBudgetStatus, Summary, SummaryService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, LedgerError>;

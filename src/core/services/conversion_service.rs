use tracing::debug;

use crate::{
    currency::{ConversionRates, CurrencyCode},
    errors::LedgerError,
    ledger::Ledger,
};

use super::ServiceResult;

/// One expense expressed in a target currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedLine {
    pub description: String,
    pub original_amount: f64,
    pub converted_amount: f64,
    pub currency: CurrencyCode,
}

pub struct ConversionService;

impl ConversionService {
    /// Converts every expense, in recording order, into `target`.
    pub fn convert(
        ledger: &Ledger,
        target: &str,
        rates: &ConversionRates,
    ) -> ServiceResult<Vec<ConvertedLine>> {
        if ledger.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        let currency = CurrencyCode::parse(target)?;
        let rate = rates.rate_for(&currency);
        debug!(currency = %currency, rate, "converting ledger");
        Ok(ledger
            .history()
            .iter()
            .map(|expense| ConvertedLine {
                description: expense.description().to_string(),
                original_amount: expense.amount(),
                converted_amount: expense.amount() * rate,
                currency: currency.clone(),
            })
            .collect())
    }
}

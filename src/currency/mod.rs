use std::{collections::BTreeMap, collections::HashSet, fmt};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Multiplier applied to ledger amounts when no per-currency rate is configured.
pub const FIXED_RATE: f64 = 110.70;

/// Active ISO 4217 alphabetic codes accepted as conversion targets.
const ISO_4217_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD",
    "CDF", "CHF", "CLP", "CNY", "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ",
    "GYD", "HKD", "HNL", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD", "JOD",
    "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR",
    "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR", "MVR",
    "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN",
    "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR",
    "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB",
    "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "UYU", "UZS",
    "VES", "VND", "VUV", "WST", "XAF", "XCD", "XOF", "XPF", "YER", "ZAR", "ZMW", "ZWL",
];

static KNOWN_CODES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ISO_4217_CODES.iter().copied().collect());

/// Validated ISO 4217 currency code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Accepts exactly three uppercase ASCII letters that name a known currency.
    pub fn parse(code: &str) -> Result<Self, LedgerError> {
        let well_formed = code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase());
        if well_formed && KNOWN_CODES.contains(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(LedgerError::InvalidCurrencyCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".into())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Static conversion rates from the ledger's base currency.
///
/// Every target uses `default_rate` unless an override is registered for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRates {
    #[serde(default = "ConversionRates::default_rate_value")]
    pub default_rate: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<CurrencyCode, f64>,
}

impl Default for ConversionRates {
    fn default() -> Self {
        Self {
            default_rate: FIXED_RATE,
            overrides: BTreeMap::new(),
        }
    }
}

impl ConversionRates {
    pub fn default_rate_value() -> f64 {
        FIXED_RATE
    }

    pub fn with_default_rate(rate: f64) -> Self {
        Self {
            default_rate: rate,
            overrides: BTreeMap::new(),
        }
    }

    pub fn set_override(&mut self, code: CurrencyCode, rate: f64) -> Option<f64> {
        self.overrides.insert(code, rate)
    }

    pub fn clear_override(&mut self, code: &CurrencyCode) -> Option<f64> {
        self.overrides.remove(code)
    }

    pub fn rate_for(&self, code: &CurrencyCode) -> f64 {
        self.overrides
            .get(code)
            .copied()
            .unwrap_or(self.default_rate)
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" | "OMR" => 3,
        _ => 2,
    }
}

/// Renders an amount in the currency's conventional precision, e.g. `¥1107` or `€12.50`.
pub fn format_currency_value(amount: f64, code: &CurrencyCode) -> String {
    let precision = minor_units_for(code.as_str()) as usize;
    let body = format!("{:.*}", precision, amount.abs());
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol_for(code.as_str()), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_uppercase_codes() {
        assert_eq!(CurrencyCode::parse("JPY").unwrap().as_str(), "JPY");
        assert_eq!(CurrencyCode::parse("EUR").unwrap().to_string(), "EUR");
    }

    #[test]
    fn parse_rejects_malformed_or_unknown_codes() {
        for raw in ["usd", "US", "USDT", "U$D", "", "ABC", " EUR"] {
            let err = CurrencyCode::parse(raw).expect_err(raw);
            assert!(matches!(err, LedgerError::InvalidCurrencyCode(ref code) if code == raw));
        }
    }

    #[test]
    fn rates_fall_back_to_fixed_rate() {
        let mut rates = ConversionRates::default();
        let eur = CurrencyCode::parse("EUR").unwrap();
        let jpy = CurrencyCode::parse("JPY").unwrap();
        assert_eq!(rates.rate_for(&eur), FIXED_RATE);
        assert_eq!(rates.rate_for(&jpy), FIXED_RATE);

        rates.set_override(eur.clone(), 0.92);
        assert_eq!(rates.rate_for(&eur), 0.92);
        assert_eq!(rates.rate_for(&jpy), FIXED_RATE);
        assert_eq!(rates.clear_override(&eur), Some(0.92));
        assert_eq!(rates.rate_for(&eur), FIXED_RATE);
    }

    #[test]
    fn rates_serialize_with_code_keys() {
        let mut rates = ConversionRates::default();
        rates.set_override(CurrencyCode::parse("GBP").unwrap(), 0.79);
        let json = serde_json::to_string(&rates).unwrap();
        assert!(json.contains("\"GBP\":0.79"), "unexpected json: {json}");
        let back: ConversionRates = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rates);
    }

    #[test]
    fn deserializing_unknown_code_fails() {
        let result: Result<CurrencyCode, _> = serde_json::from_str("\"XYZ\"");
        assert!(result.is_err());
    }

    #[test]
    fn formats_with_minor_units() {
        let jpy = CurrencyCode::parse("JPY").unwrap();
        let eur = CurrencyCode::parse("EUR").unwrap();
        assert_eq!(format_currency_value(1107.0, &jpy), "¥1107");
        assert_eq!(format_currency_value(-12.5, &eur), "-€12.50");
    }
}

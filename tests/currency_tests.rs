use expense_tracker::{
    config::{Config, ConfigManager},
    currency::{format_currency_value, ConversionRates, CurrencyCode, FIXED_RATE},
};
use tempfile::tempdir;

#[test]
fn fixed_rate_scenario() {
    let rates = ConversionRates::default();
    let eur = CurrencyCode::parse("EUR").expect("EUR");
    let converted = 10.00 * rates.rate_for(&eur);

    assert!((converted - 1107.00).abs() < 1e-9);
    assert_eq!(format_currency_value(converted, &eur), "€1107.00");
}

#[test]
fn rate_overrides_survive_config_round_trip() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("config manager");

    let mut config = Config::default();
    let gbp = CurrencyCode::parse("GBP").expect("GBP");
    config.conversion.set_override(gbp.clone(), 0.79);
    manager.save(&config).expect("save config");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.conversion.rate_for(&gbp), 0.79);
    assert_eq!(
        loaded
            .conversion
            .rate_for(&CurrencyCode::parse("JPY").expect("JPY")),
        FIXED_RATE
    );
}

#[test]
fn well_formed_but_unknown_codes_are_rejected() {
    assert!(CurrencyCode::parse("QQQ").is_err());
    assert!(CurrencyCode::parse("Eur").is_err());
    assert!(CurrencyCode::parse("JPY").is_ok());
}

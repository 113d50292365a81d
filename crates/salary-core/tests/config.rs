use std::io::Write;

use salary_core::config::{ConversionConfig, DEFAULT_NET_RATIO, KZT_TO_RUB};
use salary_core::error::PipelineError;
use salary_parser::CurrencyCode;

#[test]
fn defaults_carry_fixed_rates() {
    let config = ConversionConfig::default();

    assert_eq!(config.net_ratio, 0.87);
    assert_eq!(config.rate_for(&CurrencyCode::new("USD")), Some(56.2996));
    assert_eq!(config.rate_for(&CurrencyCode::new("EUR")), Some(57.921));
    assert_eq!(
        config.rate_for(&CurrencyCode::new("KZT")),
        Some(100.0 / 13.5040)
    );
    assert_eq!(config.rate_for(&CurrencyCode::base()), None);
    assert_eq!(config.rate_for(&CurrencyCode::new("RUR")), None);
    assert_eq!(config.net_multiplier(true), 0.87);
    assert_eq!(config.net_multiplier(false), 1.0);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_toml_keeps_remaining_defaults() -> Result<(), PipelineError> {
    let only_ratio = ConversionConfig::from_toml_str("net_ratio = 0.9")?;
    assert_eq!(only_ratio.net_ratio, 0.9);
    assert_eq!(only_ratio.rates, ConversionConfig::default().rates);

    let only_rates = ConversionConfig::from_toml_str("[rates]\nKZT = 0.2\nBYN = 25.5\n")?;
    assert_eq!(only_rates.net_ratio, DEFAULT_NET_RATIO);
    assert_eq!(only_rates.rates.len(), 2);
    assert_eq!(only_rates.rate_for(&CurrencyCode::new("BYN")), Some(25.5));
    assert_ne!(
        only_rates.rate_for(&CurrencyCode::new("KZT")),
        Some(KZT_TO_RUB)
    );
    assert_eq!(only_rates.rate_for(&CurrencyCode::new("USD")), None);
    Ok(())
}

#[test]
fn rejects_invalid_values() {
    let err = ConversionConfig::from_toml_str("net_ratio = 1.5").unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));

    let err = ConversionConfig::from_toml_str("net_ratio = 0.0").unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));

    let err = ConversionConfig::from_toml_str("[rates]\nUSD = -1.0\n").unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));

    let err = ConversionConfig::from_toml_str("[rates]\nRUB = 1.0\n").unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));

    let err = ConversionConfig::from_toml_str("tax = 0.13").unwrap_err();
    assert!(matches!(err, PipelineError::Toml(_)));
}

#[test]
fn loads_config_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "net_ratio = 0.87")?;
    writeln!(file, "[rates]")?;
    writeln!(file, "USD = 90.0")?;
    file.flush()?;

    let config = ConversionConfig::load(file.path())?;
    assert_eq!(config.rate_for(&CurrencyCode::new("USD")), Some(90.0));

    let missing = ConversionConfig::load(std::path::Path::new("/definitely/not/here.toml"));
    assert!(matches!(missing, Err(PipelineError::Io(_))));
    Ok(())
}

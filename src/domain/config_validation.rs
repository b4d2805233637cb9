//! Configuration validation.
//!
//! Everything handed to the resolver must be finite and non-negative.
//! Values are checked when the store loads them and again when a single key
//! is edited.

use crate::domain::config::StraterConfig;
use crate::domain::config_keys::*;
use crate::domain::error::StraterError;
use crate::domain::params::{GlobalDefaults, StrategyOverride};

pub fn validate_config(config: &StraterConfig) -> Result<(), StraterError> {
    validate_defaults(&config.defaults)?;
    for strategy in &config.strategies {
        validate_strategy(strategy)?;
    }
    Ok(())
}

pub fn validate_defaults(defaults: &GlobalDefaults) -> Result<(), StraterError> {
    if defaults.capital_start < 0 {
        return Err(StraterError::invalid(
            SECTION_DEFAULTS,
            KEY_CAPITAL_START,
            "capital_start must be non-negative",
        ));
    }
    validate_pct(SECTION_DEFAULTS, KEY_TRADE_REWARD_PCT, defaults.trade_reward_pct)?;
    validate_pct(SECTION_DEFAULTS, KEY_TRADE_RISK_PCT, defaults.trade_risk_pct)?;
    validate_pct(
        SECTION_DEFAULTS,
        KEY_MONTH_PROFIT_TARGET_PCT,
        defaults.month_profit_target_pct,
    )?;
    Ok(())
}

pub fn validate_strategy(strategy: &StrategyOverride) -> Result<(), StraterError> {
    let section = strategy_section(&strategy.name);
    validate_strategy_name(&strategy.name)?;
    parse_text(&section, KEY_DESCRIPTION, &strategy.description)?;
    validate_pct(&section, KEY_TRADE_REWARD_PCT, strategy.trade_reward_pct)?;
    validate_pct(&section, KEY_TRADE_RISK_PCT, strategy.trade_risk_pct)?;
    validate_pct(
        &section,
        KEY_MONTH_PROFIT_TARGET_PCT,
        strategy.month_profit_target_pct,
    )?;
    Ok(())
}

/// Characters that would break a `[strategy.<name>]` section header.
const NAME_FORBIDDEN_CHARS: [char; 7] = ['#', ';', '[', ']', '=', '\n', '\r'];

/// A strategy name must be non-empty, free of INI syntax characters and
/// carry no surrounding whitespace.
pub fn validate_strategy_name(name: &str) -> Result<(), StraterError> {
    let section = strategy_section(name);
    if name.trim().is_empty() {
        return Err(StraterError::invalid(
            &section,
            KEY_NAME,
            "strategy name must not be empty",
        ));
    }
    if name.trim() != name {
        return Err(StraterError::invalid(
            &section,
            KEY_NAME,
            "strategy name must not start or end with whitespace",
        ));
    }
    if let Some(c) = name.chars().find(|c| NAME_FORBIDDEN_CHARS.contains(c)) {
        return Err(StraterError::invalid(
            &section,
            KEY_NAME,
            format!("strategy name must not contain {c:?}"),
        ));
    }
    Ok(())
}

fn validate_pct(section: &str, key: &str, value: Option<f64>) -> Result<(), StraterError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(StraterError::invalid(
            section,
            key,
            format!("{key} must be a non-negative number"),
        )),
        _ => Ok(()),
    }
}

/// Parses a finite, non-negative number.
pub fn parse_number(section: &str, key: &str, raw: &str) -> Result<f64, StraterError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        StraterError::invalid(section, key, format!("{raw} - must be a number"))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(StraterError::invalid(
            section,
            key,
            format!("{key} must be a non-negative number"),
        ));
    }
    Ok(value)
}

/// Accepts free text that fits on one INI line.
pub fn parse_text(section: &str, key: &str, raw: &str) -> Result<String, StraterError> {
    if raw.contains(['\n', '\r']) {
        return Err(StraterError::invalid(
            section,
            key,
            format!("{key} must be a single line"),
        ));
    }
    Ok(raw.to_string())
}

/// Parses a non-negative integer count.
pub fn parse_count(section: &str, key: &str, raw: &str) -> Result<u32, StraterError> {
    raw.trim().parse().map_err(|_| {
        StraterError::invalid(
            section,
            key,
            format!("{raw} - must be a non-negative integer"),
        )
    })
}

/// Parses starting capital. Fractional input is truncated to whole units.
pub fn parse_capital(section: &str, key: &str, raw: &str) -> Result<i64, StraterError> {
    Ok(parse_number(section, key, raw)?.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(strategy: StrategyOverride) -> StraterConfig {
        let mut config = StraterConfig::default();
        config.strategies.push(strategy);
        config
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&StraterConfig::default()).is_ok());
    }

    #[test]
    fn negative_capital_fails() {
        let mut config = StraterConfig::default();
        config.defaults.capital_start = -1;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StraterError::ConfigInvalid { key, .. } if key == "capital_start"));
    }

    #[test]
    fn negative_default_reward_fails() {
        let mut config = StraterConfig::default();
        config.defaults.trade_reward_pct = Some(-0.01);
        let err = validate_config(&config).unwrap_err();
        assert!(
            matches!(err, StraterError::ConfigInvalid { key, .. } if key == "trade_reward_pct")
        );
    }

    #[test]
    fn negative_strategy_risk_fails() {
        let config = config_with(StrategyOverride {
            trade_risk_pct: Some(-0.5),
            ..StrategyOverride::new("bad")
        });
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err,
            StraterError::ConfigInvalid { section, key, .. }
                if section == "strategy.bad" && key == "trade_risk_pct"
        ));
    }

    #[test]
    fn infinite_profit_target_fails() {
        let config = config_with(StrategyOverride {
            month_profit_target_pct: Some(f64::INFINITY),
            ..StrategyOverride::new("inf")
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_strategy_values_are_valid() {
        let config = config_with(StrategyOverride {
            trade_reward_pct: Some(0.0),
            month_trades_net_wins: Some(0),
            ..StrategyOverride::new("flat")
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn blank_strategy_name_fails() {
        let config = config_with(StrategyOverride::new("  "));
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StraterError::ConfigInvalid { key, .. } if key == "name"));
    }

    #[test]
    fn ini_syntax_in_name_fails() {
        for name in ["fx#2", "a;b", "[x", "y]", "k=v", " padded", "padded "] {
            let err = validate_strategy_name(name).unwrap_err();
            assert!(
                matches!(err, StraterError::ConfigInvalid { ref key, .. } if key == "name"),
                "{name:?} accepted"
            );
        }
    }

    #[test]
    fn ordinary_names_pass() {
        for name in ["ifunds", "FX 2", "mean-reversion_v2", "10% club"] {
            assert!(validate_strategy_name(name).is_ok());
        }
    }

    #[test]
    fn multi_line_description_fails() {
        let config = config_with(StrategyOverride {
            description: "first\nsecond".into(),
            ..StrategyOverride::new("multi")
        });
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, StraterError::ConfigInvalid { key, .. } if key == "description"));
    }

    #[test]
    fn parse_number_accepts_decimals() {
        assert_eq!(parse_number("defaults", "k", " 0.25 ").unwrap(), 0.25);
    }

    #[test]
    fn parse_number_rejects_text_and_negatives() {
        assert!(parse_number("defaults", "k", "abc").is_err());
        assert!(parse_number("defaults", "k", "-1").is_err());
        assert!(parse_number("defaults", "k", "NaN").is_err());
    }

    #[test]
    fn parse_count_rejects_fractions() {
        assert_eq!(parse_count("defaults", "k", "10").unwrap(), 10);
        assert!(parse_count("defaults", "k", "2.5").is_err());
        assert!(parse_count("defaults", "k", "-3").is_err());
    }

    #[test]
    fn parse_capital_truncates() {
        assert_eq!(parse_capital("defaults", "k", "10000.9").unwrap(), 10_000);
    }
}

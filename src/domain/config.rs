//! The validated configuration record: settings, global defaults and the
//! strategy set, plus the key-level get/set operations the CLI exposes.

use log::info;

use crate::domain::config_keys::*;
use crate::domain::config_validation::{
    parse_capital, parse_count, parse_number, parse_text, validate_config, validate_strategy,
    validate_strategy_name,
};
use crate::domain::error::StraterError;
use crate::domain::params::{
    resolve, EffectiveParameters, GlobalDefaults, StrategyOverride, DEFAULT_CAPITAL_START,
    DEFAULT_MONTH_COUNT,
};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_OUTPUT_PATH: &str = "strater_output";

/// Printed for a strategy field that inherits its value.
pub const INHERIT: &str = "(inherit)";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StraterConfig {
    pub settings: Settings,
    pub defaults: GlobalDefaults,
    pub strategies: Vec<StrategyOverride>,
}

impl Default for StraterConfig {
    /// The configuration `strater init` writes.
    fn default() -> Self {
        StraterConfig {
            settings: Settings {
                output_path: Some(DEFAULT_OUTPUT_PATH.to_string()),
            },
            defaults: GlobalDefaults::default(),
            strategies: Vec::new(),
        }
    }
}

impl StraterConfig {
    /// Reads and validates a configuration from any [`ConfigPort`].
    ///
    /// Missing `capital_start` / `month_count` fall back to their built-in
    /// values; missing trading parameters stay unset. Strategies are ordered
    /// by name.
    pub fn from_port(port: &dyn ConfigPort) -> Result<Self, StraterError> {
        let settings = Settings {
            output_path: port
                .get_string(SECTION_SETTINGS, KEY_OUTPUT_PATH)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        let defaults = GlobalDefaults {
            capital_start: read(port, SECTION_DEFAULTS, KEY_CAPITAL_START, parse_capital)?
                .unwrap_or(DEFAULT_CAPITAL_START),
            month_count: read(port, SECTION_DEFAULTS, KEY_MONTH_COUNT, parse_count)?
                .unwrap_or(DEFAULT_MONTH_COUNT),
            trade_reward_pct: read(port, SECTION_DEFAULTS, KEY_TRADE_REWARD_PCT, parse_number)?,
            trade_risk_pct: read(port, SECTION_DEFAULTS, KEY_TRADE_RISK_PCT, parse_number)?,
            month_trades_net_wins: read(
                port,
                SECTION_DEFAULTS,
                KEY_MONTH_TRADES_NET_WINS,
                parse_count,
            )?,
            month_profit_target_pct: read(
                port,
                SECTION_DEFAULTS,
                KEY_MONTH_PROFIT_TARGET_PCT,
                parse_number,
            )?,
        };

        let mut strategies = Vec::new();
        for section in port.sections() {
            let Some(name) = strategy_name(&section) else {
                continue;
            };
            strategies.push(StrategyOverride {
                name: name.to_string(),
                description: port
                    .get_string(&section, KEY_DESCRIPTION)
                    .unwrap_or_default(),
                trade_reward_pct: read(port, &section, KEY_TRADE_REWARD_PCT, parse_number)?,
                trade_risk_pct: read(port, &section, KEY_TRADE_RISK_PCT, parse_number)?,
                month_trades_net_wins: read(
                    port,
                    &section,
                    KEY_MONTH_TRADES_NET_WINS,
                    parse_count,
                )?,
                month_profit_target_pct: read(
                    port,
                    &section,
                    KEY_MONTH_PROFIT_TARGET_PCT,
                    parse_number,
                )?,
            });
        }
        strategies.sort_by(|a, b| a.name.cmp(&b.name));

        let config = StraterConfig {
            settings,
            defaults,
            strategies,
        };
        validate_config(&config)?;
        info!("loaded configuration with {} strategies", config.strategies.len());
        Ok(config)
    }

    pub fn find_strategy(&self, name: &str) -> Option<&StrategyOverride> {
        self.strategies.iter().find(|s| s.name == name)
    }

    pub fn strategy(&self, name: &str) -> Result<&StrategyOverride, StraterError> {
        self.find_strategy(name)
            .ok_or_else(|| StraterError::StrategyNotFound {
                name: name.to_string(),
            })
    }

    fn strategy_mut(&mut self, name: &str) -> Result<&mut StrategyOverride, StraterError> {
        self.strategies
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| StraterError::StrategyNotFound {
                name: name.to_string(),
            })
    }

    pub fn effective_parameters(&self, name: &str) -> Result<EffectiveParameters, StraterError> {
        Ok(resolve(&self.defaults, self.strategy(name)?))
    }

    pub fn add_strategy(&mut self, strategy: StrategyOverride) -> Result<(), StraterError> {
        validate_strategy(&strategy)?;
        if self.find_strategy(&strategy.name).is_some() {
            return Err(StraterError::StrategyExists {
                name: strategy.name,
            });
        }
        self.strategies.push(strategy);
        Ok(())
    }

    pub fn remove_strategy(&mut self, name: &str) -> Result<StrategyOverride, StraterError> {
        let index = self
            .strategies
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| StraterError::StrategyNotFound {
                name: name.to_string(),
            })?;
        Ok(self.strategies.remove(index))
    }

    pub fn get_default_value(&self, key: &str) -> Result<String, StraterError> {
        let d = &self.defaults;
        let value = match key {
            KEY_CAPITAL_START => d.capital_start.to_string(),
            KEY_MONTH_COUNT => d.month_count.to_string(),
            KEY_TRADE_RISK_PCT => format_pct(d.trade_risk_pct),
            KEY_TRADE_REWARD_PCT => format_pct(d.trade_reward_pct),
            KEY_MONTH_TRADES_NET_WINS => format_count(d.month_trades_net_wins),
            KEY_MONTH_PROFIT_TARGET_PCT => format_pct(d.month_profit_target_pct),
            KEY_OUTPUT_PATH => self.settings.output_path.clone().unwrap_or_default(),
            _ => return Err(unknown_key(key, &DEFAULT_KEYS)),
        };
        Ok(value)
    }

    pub fn set_default_value(&mut self, key: &str, raw: &str) -> Result<(), StraterError> {
        let section = SECTION_DEFAULTS;
        match key {
            KEY_CAPITAL_START => {
                self.defaults.capital_start = parse_capital(section, key, raw)?;
            }
            KEY_TRADE_RISK_PCT => {
                let v = parse_number(section, key, raw)?;
                if v > 1.0 {
                    return Err(StraterError::invalid(
                        section,
                        key,
                        "trade risk cannot be more than 1 (100%)",
                    ));
                }
                self.defaults.trade_risk_pct = Some(v);
            }
            KEY_MONTH_PROFIT_TARGET_PCT => {
                self.defaults.month_profit_target_pct = Some(parse_positive(section, key, raw)?);
            }
            KEY_MONTH_COUNT => {
                let v = parse_count(section, key, raw)?;
                if v == 0 {
                    return Err(StraterError::invalid(
                        section,
                        key,
                        "month count must be positive",
                    ));
                }
                self.defaults.month_count = v;
            }
            KEY_TRADE_REWARD_PCT => {
                self.defaults.trade_reward_pct = Some(parse_positive(section, key, raw)?);
            }
            KEY_MONTH_TRADES_NET_WINS => {
                self.defaults.month_trades_net_wins = Some(parse_count(section, key, raw)?);
            }
            KEY_OUTPUT_PATH => {
                let path = parse_text(section, key, raw)?;
                let path = path.trim();
                self.settings.output_path = (!path.is_empty()).then(|| path.to_string());
            }
            _ => return Err(unknown_key(key, &DEFAULT_KEYS)),
        }
        Ok(())
    }

    pub fn get_strategy_value(&self, name: &str, key: &str) -> Result<String, StraterError> {
        let s = self.strategy(name)?;
        let value = match key {
            KEY_NAME => s.name.clone(),
            KEY_DESCRIPTION => s.description.clone(),
            KEY_TRADE_RISK_PCT => format_pct(s.trade_risk_pct),
            KEY_TRADE_REWARD_PCT => format_pct(s.trade_reward_pct),
            KEY_MONTH_TRADES_NET_WINS => format_count(s.month_trades_net_wins),
            KEY_MONTH_PROFIT_TARGET_PCT => format_pct(s.month_profit_target_pct),
            _ => return Err(unknown_key(key, &STRATEGY_KEYS)),
        };
        Ok(value)
    }

    pub fn set_strategy_value(
        &mut self,
        name: &str,
        key: &str,
        raw: &str,
    ) -> Result<(), StraterError> {
        let section = strategy_section(name);
        if key == KEY_NAME {
            return self.rename_strategy(name, raw.trim());
        }
        let s = self.strategy_mut(name)?;
        match key {
            KEY_DESCRIPTION => s.description = parse_text(&section, key, raw)?,
            KEY_TRADE_RISK_PCT => s.trade_risk_pct = Some(parse_number(&section, key, raw)?),
            KEY_TRADE_REWARD_PCT => s.trade_reward_pct = Some(parse_number(&section, key, raw)?),
            KEY_MONTH_TRADES_NET_WINS => {
                s.month_trades_net_wins = Some(parse_count(&section, key, raw)?)
            }
            KEY_MONTH_PROFIT_TARGET_PCT => {
                s.month_profit_target_pct = Some(parse_number(&section, key, raw)?)
            }
            _ => return Err(unknown_key(key, &STRATEGY_KEYS)),
        }
        Ok(())
    }

    /// Clears an override so the field inherits from the defaults again.
    pub fn unset_strategy_value(&mut self, name: &str, key: &str) -> Result<(), StraterError> {
        let s = self.strategy_mut(name)?;
        match key {
            KEY_DESCRIPTION => s.description.clear(),
            KEY_TRADE_RISK_PCT => s.trade_risk_pct = None,
            KEY_TRADE_REWARD_PCT => s.trade_reward_pct = None,
            KEY_MONTH_TRADES_NET_WINS => s.month_trades_net_wins = None,
            KEY_MONTH_PROFIT_TARGET_PCT => s.month_profit_target_pct = None,
            KEY_NAME => {
                return Err(StraterError::invalid(
                    &strategy_section(name),
                    KEY_NAME,
                    "strategy name cannot be unset",
                ));
            }
            _ => return Err(unknown_key(key, &STRATEGY_KEYS)),
        }
        Ok(())
    }

    fn rename_strategy(&mut self, name: &str, new_name: &str) -> Result<(), StraterError> {
        validate_strategy_name(new_name)?;
        if new_name != name && self.find_strategy(new_name).is_some() {
            return Err(StraterError::StrategyExists {
                name: new_name.to_string(),
            });
        }
        self.strategy_mut(name)?.name = new_name.to_string();
        Ok(())
    }
}

fn read<T>(
    port: &dyn ConfigPort,
    section: &str,
    key: &str,
    parse: fn(&str, &str, &str) -> Result<T, StraterError>,
) -> Result<Option<T>, StraterError> {
    match port.get_string(section, key) {
        Some(raw) if !raw.trim().is_empty() => parse(section, key, &raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_positive(section: &str, key: &str, raw: &str) -> Result<f64, StraterError> {
    let v = parse_number(section, key, raw)?;
    if v <= 0.0 {
        return Err(StraterError::invalid(
            section,
            key,
            format!("{key} must be positive"),
        ));
    }
    Ok(v)
}

fn unknown_key(key: &str, available: &[&str]) -> StraterError {
    StraterError::UnknownKey {
        key: key.to_string(),
        available: available.iter().map(|k| k.to_string()).collect(),
    }
}

fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| INHERIT.to_string(), |v| format!("{v:.2}"))
}

fn format_count(value: Option<u32>) -> String {
    value.map_or_else(|| INHERIT.to_string(), |v| v.to_string())
}

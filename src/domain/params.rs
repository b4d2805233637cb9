//! Strategy parameters and the three-tier resolution of effective values.
//!
//! A field is looked up on the strategy override first, then on the global
//! defaults, then on [`EffectiveParameters::BUILTIN`]. Presence is explicit:
//! `Some(0.0)` is a real override, `None` inherits.

use log::debug;
use serde::Serialize;

/// Fully resolved parameters used for one projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveParameters {
    pub trade_reward_pct: f64,
    pub trade_risk_pct: f64,
    pub month_trades_net_wins: u32,
    pub month_profit_target_pct: f64,
}

impl EffectiveParameters {
    pub const BUILTIN: EffectiveParameters = EffectiveParameters {
        trade_reward_pct: 0.01,
        trade_risk_pct: 0.01,
        month_trades_net_wins: 10,
        month_profit_target_pct: 0.10,
    };

    /// Monthly growth factor applied by the projection recurrence.
    pub fn monthly_growth(&self) -> f64 {
        self.trade_reward_pct * f64::from(self.month_trades_net_wins)
    }
}

impl Default for EffectiveParameters {
    fn default() -> Self {
        Self::BUILTIN
    }
}

pub const DEFAULT_CAPITAL_START: i64 = 10_000;
pub const DEFAULT_MONTH_COUNT: u32 = 12;

/// Global defaults, used when a strategy does not override a field.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDefaults {
    pub capital_start: i64,
    pub month_count: u32,
    pub trade_reward_pct: Option<f64>,
    pub trade_risk_pct: Option<f64>,
    pub month_trades_net_wins: Option<u32>,
    pub month_profit_target_pct: Option<f64>,
}

impl GlobalDefaults {
    /// Defaults with no overridable field set; every lookup falls through to
    /// the built-in constants.
    pub fn empty() -> Self {
        GlobalDefaults {
            capital_start: DEFAULT_CAPITAL_START,
            month_count: DEFAULT_MONTH_COUNT,
            trade_reward_pct: None,
            trade_risk_pct: None,
            month_trades_net_wins: None,
            month_profit_target_pct: None,
        }
    }
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        let builtin = EffectiveParameters::BUILTIN;
        GlobalDefaults {
            trade_reward_pct: Some(builtin.trade_reward_pct),
            trade_risk_pct: Some(builtin.trade_risk_pct),
            month_trades_net_wins: Some(builtin.month_trades_net_wins),
            month_profit_target_pct: Some(builtin.month_profit_target_pct),
            ..Self::empty()
        }
    }
}

/// Per-strategy overrides, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrategyOverride {
    pub name: String,
    pub description: String,
    pub trade_reward_pct: Option<f64>,
    pub trade_risk_pct: Option<f64>,
    pub month_trades_net_wins: Option<u32>,
    pub month_profit_target_pct: Option<f64>,
}

impl StrategyOverride {
    pub fn new(name: impl Into<String>) -> Self {
        StrategyOverride {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Merges the three tiers into one fully populated parameter set.
pub fn resolve(defaults: &GlobalDefaults, strategy: &StrategyOverride) -> EffectiveParameters {
    let builtin = EffectiveParameters::BUILTIN;
    let effective = EffectiveParameters {
        trade_reward_pct: strategy
            .trade_reward_pct
            .or(defaults.trade_reward_pct)
            .unwrap_or(builtin.trade_reward_pct),
        trade_risk_pct: strategy
            .trade_risk_pct
            .or(defaults.trade_risk_pct)
            .unwrap_or(builtin.trade_risk_pct),
        month_trades_net_wins: strategy
            .month_trades_net_wins
            .or(defaults.month_trades_net_wins)
            .unwrap_or(builtin.month_trades_net_wins),
        month_profit_target_pct: strategy
            .month_profit_target_pct
            .or(defaults.month_profit_target_pct)
            .unwrap_or(builtin.month_profit_target_pct),
    };
    debug!("resolved parameters for '{}': {:?}", strategy.name, effective);
    effective
}

#![allow(dead_code)]

use std::io::Write;
use strater::domain::config::StraterConfig;
use strater::domain::params::{GlobalDefaults, StrategyOverride};

pub const SAMPLE_INI: &str = r#"
[settings]
output_path = strater_output

[defaults]
capital_start = 10000
month_count = 12
trade_risk_pct = 0.01
trade_reward_pct = 0.01
month_trades_net_wins = 10
month_profit_target_pct = 0.10

[strategy.conservative]
description = Slow and steady
trade_reward_pct = 0.005
month_trades_net_wins = 8

[strategy.ifunds]
description = Funded account
trade_risk_pct = 0.02
month_profit_target_pct = 0.08
"#;

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Defaults with the given reward/wins and one strategy named `base` that
/// inherits everything.
pub fn config_with(capital_start: i64, reward: f64, net_wins: u32) -> StraterConfig {
    StraterConfig {
        defaults: GlobalDefaults {
            capital_start,
            trade_reward_pct: Some(reward),
            month_trades_net_wins: Some(net_wins),
            ..GlobalDefaults::default()
        },
        strategies: vec![StrategyOverride::new("base")],
        ..StraterConfig::default()
    }
}

pub fn sample_config() -> StraterConfig {
    config_with(10_000, 0.01, 10)
}

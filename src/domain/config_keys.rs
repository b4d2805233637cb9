//! Configuration section names and keys.
//!
//! The four trading parameters are shared between the defaults and the
//! per-strategy sections.

pub const SECTION_SETTINGS: &str = "settings";
pub const SECTION_DEFAULTS: &str = "defaults";
pub const STRATEGY_SECTION_PREFIX: &str = "strategy.";

pub const KEY_NAME: &str = "name";
pub const KEY_DESCRIPTION: &str = "description";

pub const KEY_TRADE_RISK_PCT: &str = "trade_risk_pct";
pub const KEY_TRADE_REWARD_PCT: &str = "trade_reward_pct";
pub const KEY_MONTH_TRADES_NET_WINS: &str = "month_trades_net_wins";
pub const KEY_MONTH_PROFIT_TARGET_PCT: &str = "month_profit_target_pct";

pub const KEY_CAPITAL_START: &str = "capital_start";
pub const KEY_MONTH_COUNT: &str = "month_count";
pub const KEY_OUTPUT_PATH: &str = "output_path";

/// Keys accepted by `strat config`.
pub const STRATEGY_KEYS: [&str; 6] = [
    KEY_NAME,
    KEY_DESCRIPTION,
    KEY_TRADE_RISK_PCT,
    KEY_TRADE_REWARD_PCT,
    KEY_MONTH_TRADES_NET_WINS,
    KEY_MONTH_PROFIT_TARGET_PCT,
];

/// Keys accepted by `config get` / `config set`.
pub const DEFAULT_KEYS: [&str; 7] = [
    KEY_CAPITAL_START,
    KEY_TRADE_RISK_PCT,
    KEY_TRADE_REWARD_PCT,
    KEY_MONTH_TRADES_NET_WINS,
    KEY_MONTH_PROFIT_TARGET_PCT,
    KEY_MONTH_COUNT,
    KEY_OUTPUT_PATH,
];

pub fn strategy_section(name: &str) -> String {
    format!("{STRATEGY_SECTION_PREFIX}{name}")
}

/// Returns the strategy name for a `strategy.<name>` section.
pub fn strategy_name(section: &str) -> Option<&str> {
    section
        .strip_prefix(STRATEGY_SECTION_PREFIX)
        .filter(|name| !name.is_empty())
}

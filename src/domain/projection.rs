//! Compounding projection engine.
//!
//! Each month the balance grows by `balance * trade_reward_pct` per net win:
//!
//! ```text
//! balance_n = balance_0 * (1 + trade_reward_pct * month_trades_net_wins)^n
//! ```
//!
//! Values are kept as raw `f64` throughout; rounding belongs to the report
//! writers. `trade_risk_pct` and `month_profit_target_pct` are resolved but
//! do not enter the recurrence.

use log::{debug, info};

use super::account::Account;
use super::config::StraterConfig;
use super::error::StraterError;
use super::params::{resolve, EffectiveParameters};
use super::plan::{MonthlyResult, Plan};

/// Projects `months` months of `strategy_name` starting from the configured
/// `capital_start`.
///
/// Fails with [`StraterError::StrategyNotFound`] before any computation if the
/// strategy is not configured.
pub fn project(
    strategy_name: &str,
    months: u32,
    config: &StraterConfig,
) -> Result<Plan, StraterError> {
    let strategy = config.strategy(strategy_name)?;
    let params = resolve(&config.defaults, strategy);
    let initial_capital = config.defaults.capital_start as f64;
    info!(
        "projecting '{}' for {} months from {:.2}",
        strategy_name, months, initial_capital
    );
    Ok(project_with(strategy_name, initial_capital, months, &params))
}

/// Runs the recurrence with already-resolved parameters.
///
/// The trading account receives the final balance with no transaction
/// history; the savings account stays empty.
pub fn project_with(
    strategy_name: &str,
    initial_capital: f64,
    months: u32,
    params: &EffectiveParameters,
) -> Plan {
    let mut balance = initial_capital;
    let mut monthly_results = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let result = step(month, balance, params);
        debug!(
            "month {}: {:.2} -> {:.2}",
            month, result.starting_balance, result.ending_balance
        );
        balance = result.ending_balance;
        monthly_results.push(result);
    }

    Plan {
        strategy_name: strategy_name.to_string(),
        initial_capital,
        trading_account: Account::trading(balance),
        savings_account: Account::savings(),
        monthly_results,
    }
}

/// Computes one month from the balance at its start.
pub fn step(month: u32, balance: f64, params: &EffectiveParameters) -> MonthlyResult {
    let reward_per_trade_amount = balance * params.trade_reward_pct;
    let profit_amount = reward_per_trade_amount * f64::from(params.month_trades_net_wins);
    MonthlyResult {
        month,
        starting_balance: balance,
        ending_balance: balance + profit_amount,
        profit_amount,
        reward_per_trade_amount,
        net_wins: params.month_trades_net_wins,
    }
}

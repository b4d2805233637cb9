//! Projection output: the plan and its monthly results.

use serde::Serialize;

use super::account::Account;

/// One month of the projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyResult {
    /// 1-based month index.
    pub month: u32,
    pub starting_balance: f64,
    pub ending_balance: f64,
    pub profit_amount: f64,
    pub reward_per_trade_amount: f64,
    pub net_wins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub strategy_name: String,
    pub initial_capital: f64,
    pub trading_account: Account,
    pub savings_account: Account,
    pub monthly_results: Vec<MonthlyResult>,
}

impl Plan {
    pub fn final_balance(&self) -> f64 {
        self.monthly_results
            .last()
            .map(|r| r.ending_balance)
            .unwrap_or(self.initial_capital)
    }

    pub fn total_profit(&self) -> f64 {
        self.monthly_results.iter().map(|r| r.profit_amount).sum()
    }

    /// Growth over the whole projection as a fraction of initial capital.
    pub fn total_return(&self) -> f64 {
        if self.initial_capital > 0.0 {
            (self.final_balance() - self.initial_capital) / self.initial_capital
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(month: u32, start: f64, end: f64) -> MonthlyResult {
        MonthlyResult {
            month,
            starting_balance: start,
            ending_balance: end,
            profit_amount: end - start,
            reward_per_trade_amount: (end - start) / 10.0,
            net_wins: 10,
        }
    }

    fn sample_plan(results: Vec<MonthlyResult>) -> Plan {
        Plan {
            strategy_name: "Test".into(),
            initial_capital: 1_000.0,
            trading_account: Account::trading(1_000.0),
            savings_account: Account::savings(),
            monthly_results: results,
        }
    }

    #[test]
    fn empty_plan_summary() {
        let plan = sample_plan(Vec::new());
        assert_eq!(plan.final_balance(), 1_000.0);
        assert_eq!(plan.total_profit(), 0.0);
        assert_eq!(plan.total_return(), 0.0);
    }

    #[test]
    fn summary_uses_last_month() {
        let plan = sample_plan(vec![result(1, 1_000.0, 1_100.0), result(2, 1_100.0, 1_210.0)]);
        assert!((plan.final_balance() - 1_210.0).abs() < 1e-9);
        assert!((plan.total_profit() - 210.0).abs() < 1e-9);
        assert!((plan.total_return() - 0.21).abs() < 1e-9);
    }

    #[test]
    fn zero_capital_return_is_zero() {
        let mut plan = sample_plan(Vec::new());
        plan.initial_capital = 0.0;
        assert_eq!(plan.total_return(), 0.0);
    }
}

//! Plain-text table report adapter implementing ReportPort.

use log::info;
use std::fs;
use std::path::Path;

use crate::adapters::report_format::create_parent_dir;
use crate::domain::error::StraterError;
use crate::domain::plan::Plan;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct TableReportAdapter;

impl TableReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

/// Renders one fixed-width block per plan.
pub fn render_table(plans: &[Plan]) -> String {
    let mut output = String::new();
    for (i, plan) in plans.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("Strategy: {}\n", plan.strategy_name));
        output.push_str(&format!("Initial capital: {:.2}\n", plan.initial_capital));
        output.push_str(&format!(
            "{:>5}  {:>16}  {:>16}  {:>14}  {:>16}  {:>8}\n",
            "Month", "Starting Balance", "Ending Balance", "Profit", "Reward Per Trade", "Net Wins"
        ));
        output.push_str(&"-".repeat(86));
        output.push('\n');
        for r in &plan.monthly_results {
            output.push_str(&format!(
                "{:>5}  {:>16.2}  {:>16.2}  {:>14.2}  {:>16.2}  {:>8}\n",
                r.month,
                r.starting_balance,
                r.ending_balance,
                r.profit_amount,
                r.reward_per_trade_amount,
                r.net_wins
            ));
        }
        output.push_str(&format!(
            "Final balance: {:.2} ({:+.2}%)\n",
            plan.final_balance(),
            plan.total_return() * 100.0
        ));
    }
    output
}

impl ReportPort for TableReportAdapter {
    fn write(&self, plans: &[Plan], output_path: &Path) -> Result<(), StraterError> {
        create_parent_dir(output_path)?;
        fs::write(output_path, render_table(plans))?;
        info!("wrote table report to {}", output_path.display());
        Ok(())
    }
}

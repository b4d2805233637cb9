//! CSV report adapter implementing ReportPort.

use log::info;
use std::path::Path;

use crate::adapters::report_format::create_parent_dir;
use crate::domain::error::StraterError;
use crate::domain::plan::Plan;
use crate::ports::report_port::ReportPort;

pub const CSV_HEADER: [&str; 7] = [
    "Strategy",
    "Month",
    "Starting Balance",
    "Ending Balance",
    "Profit",
    "Reward Per Trade",
    "Net Wins",
];

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn csv_error(e: csv::Error) -> StraterError {
    StraterError::Report {
        reason: format!("CSV write error: {e}"),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, plans: &[Plan], output_path: &Path) -> Result<(), StraterError> {
        create_parent_dir(output_path)?;
        let mut writer = csv::Writer::from_path(output_path).map_err(csv_error)?;
        writer.write_record(CSV_HEADER).map_err(csv_error)?;

        for plan in plans {
            for r in &plan.monthly_results {
                writer
                    .write_record([
                        plan.strategy_name.clone(),
                        r.month.to_string(),
                        format!("{:.2}", r.starting_balance),
                        format!("{:.2}", r.ending_balance),
                        format!("{:.2}", r.profit_amount),
                        format!("{:.2}", r.reward_per_trade_amount),
                        r.net_wins.to_string(),
                    ])
                    .map_err(csv_error)?;
            }
        }

        writer.flush()?;
        info!("wrote CSV report to {}", output_path.display());
        Ok(())
    }
}

//! XLSX spreadsheet report adapter implementing ReportPort.
//!
//! One worksheet, same columns as the CSV report. Money cells are stored as
//! numbers with a two-decimal display format so they stay usable in formulas.

use log::info;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

use crate::adapters::csv_report_adapter::CSV_HEADER;
use crate::adapters::report_format::create_parent_dir;
use crate::domain::error::StraterError;
use crate::domain::plan::Plan;
use crate::ports::report_port::ReportPort;

pub const SHEET_NAME: &str = "Projection";

#[derive(Debug, Default)]
pub struct XlsxReportAdapter;

impl XlsxReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn xlsx_error(e: XlsxError) -> StraterError {
    StraterError::Report {
        reason: format!("XLSX write error: {e}"),
    }
}

/// Builds the workbook: a bold header row, then one row per month of every
/// plan in order.
pub fn build_workbook(plans: &[Plan]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("0.00");

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(CSV_HEADER) {
        sheet.write_string_with_format(0, col, title, &header_format)?;
        sheet.set_column_width(col, 18)?;
    }

    let mut row: u32 = 1;
    for plan in plans {
        for r in &plan.monthly_results {
            sheet.write_string(row, 0, plan.strategy_name.as_str())?;
            sheet.write_number(row, 1, r.month)?;
            sheet.write_number_with_format(row, 2, r.starting_balance, &money_format)?;
            sheet.write_number_with_format(row, 3, r.ending_balance, &money_format)?;
            sheet.write_number_with_format(row, 4, r.profit_amount, &money_format)?;
            sheet.write_number_with_format(row, 5, r.reward_per_trade_amount, &money_format)?;
            sheet.write_number(row, 6, r.net_wins)?;
            row += 1;
        }
    }

    Ok(workbook)
}

impl ReportPort for XlsxReportAdapter {
    fn write(&self, plans: &[Plan], output_path: &Path) -> Result<(), StraterError> {
        create_parent_dir(output_path)?;
        let mut workbook = build_workbook(plans).map_err(xlsx_error)?;
        workbook.save(output_path).map_err(xlsx_error)?;
        info!("wrote XLSX report to {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::EffectiveParameters;
    use crate::domain::projection::project_with;

    const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

    #[test]
    fn writes_spreadsheet_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("base_analysis.xlsx");
        let plan = project_with("base", 10_000.0, 12, &EffectiveParameters::BUILTIN);

        XlsxReportAdapter::new().write_plan(&plan, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(ZIP_MAGIC));
    }

    #[test]
    fn empty_plan_still_produces_workbook() {
        let plan = project_with("base", 10_000.0, 0, &EffectiveParameters::BUILTIN);
        let mut workbook = build_workbook(&[plan]).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();
        assert!(bytes.starts_with(ZIP_MAGIC));
    }

    #[test]
    fn more_rows_mean_a_larger_sheet() {
        let short = project_with("a", 1_000.0, 1, &EffectiveParameters::BUILTIN);
        let long = [
            project_with("a", 1_000.0, 120, &EffectiveParameters::BUILTIN),
            project_with("b", 2_000.0, 120, &EffectiveParameters::BUILTIN),
        ];
        let small = build_workbook(&[short]).unwrap().save_to_buffer().unwrap();
        let large = build_workbook(&long).unwrap().save_to_buffer().unwrap();
        assert!(large.len() > small.len());
    }
}

//! Report format selection.
//!
//! The CLI takes the format as free text and parses it here, so an unknown
//! name surfaces as [`StraterError::UnsupportedFormat`].

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::table_report_adapter::TableReportAdapter;
use crate::adapters::xlsx_report_adapter::XlsxReportAdapter;
use crate::domain::error::StraterError;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
    Table,
    Xlsx,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Table => "txt",
            ReportFormat::Xlsx => "xlsx",
        }
    }

    pub fn writer(self) -> Box<dyn ReportPort> {
        match self {
            ReportFormat::Csv => Box::new(CsvReportAdapter::new()),
            ReportFormat::Json => Box::new(JsonReportAdapter::new()),
            ReportFormat::Table => Box::new(TableReportAdapter::new()),
            ReportFormat::Xlsx => Box::new(XlsxReportAdapter::new()),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Table => "table",
            ReportFormat::Xlsx => "xlsx",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportFormat {
    type Err = StraterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "table" | "txt" => Ok(ReportFormat::Table),
            "xlsx" => Ok(ReportFormat::Xlsx),
            other => Err(StraterError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Creates the parent directory of `path` if it has one.
pub(crate) fn create_parent_dir(path: &Path) -> Result<(), StraterError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

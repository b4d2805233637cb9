//! JSON report adapter implementing ReportPort.
//!
//! Plans are serialized verbatim with full `f64` precision.

use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::adapters::report_format::create_parent_dir;
use crate::domain::error::StraterError;
use crate::domain::plan::Plan;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, plans: &[Plan], output_path: &Path) -> Result<(), StraterError> {
        create_parent_dir(output_path)?;
        let mut writer = BufWriter::new(File::create(output_path)?);
        serde_json::to_writer_pretty(&mut writer, plans).map_err(|e| StraterError::Report {
            reason: format!("JSON write error: {e}"),
        })?;
        writeln!(writer)?;
        writer.flush()?;
        info!("wrote JSON report to {}", output_path.display());
        Ok(())
    }
}

//! Report generation port trait.

use std::path::Path;

use crate::domain::error::StraterError;
use crate::domain::plan::Plan;

/// Port for writing projection reports.
pub trait ReportPort {
    fn write(&self, plans: &[Plan], output_path: &Path) -> Result<(), StraterError>;

    /// Default implementation: wraps a single plan for `write`.
    fn write_plan(&self, plan: &Plan, output_path: &Path) -> Result<(), StraterError> {
        self.write(std::slice::from_ref(plan), output_path)
    }
}

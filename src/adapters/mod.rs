//! Concrete adapter implementations for ports.

pub mod config_store;
pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod json_report_adapter;
pub mod report_format;
pub mod table_report_adapter;
pub mod xlsx_report_adapter;

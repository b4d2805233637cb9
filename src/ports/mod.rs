//! Port traits (hexagonal boundaries).

pub mod config_port;
pub mod report_port;

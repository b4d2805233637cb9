//! Core domain types and logic.

pub mod account;
pub mod config;
pub mod config_keys;
pub mod config_validation;
pub mod error;
pub mod params;
pub mod plan;
pub mod projection;

//! Domain error types.

/// Top-level error type for strater.
#[derive(Debug, thiserror::Error)]
pub enum StraterError {
    #[error("no configuration file found. Run 'strater init' to create one")]
    ConfigNotFound,

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown config key: {key} (available keys: {})", available.join(", "))]
    UnknownKey { key: String, available: Vec<String> },

    #[error("strategy '{name}' not found")]
    StrategyNotFound { name: String },

    #[error("strategy '{name}' already exists")]
    StrategyExists { name: String },

    #[error("unsupported report format: {format}")]
    UnsupportedFormat { format: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StraterError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        StraterError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&StraterError> for std::process::ExitCode {
    fn from(err: &StraterError) -> Self {
        let code: u8 = match err {
            StraterError::Io(_) => 1,
            StraterError::ConfigNotFound
            | StraterError::ConfigParse { .. }
            | StraterError::ConfigInvalid { .. }
            | StraterError::UnknownKey { .. } => 2,
            StraterError::StrategyNotFound { .. } | StraterError::StrategyExists { .. } => 3,
            StraterError::UnsupportedFormat { .. } | StraterError::Report { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

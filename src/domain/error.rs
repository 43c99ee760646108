//! Domain error types.

/// Top-level error type for stockexplorer.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("record {row}: cannot parse date {value:?} (expected {format})")]
    DateParse {
        row: usize,
        value: String,
        format: String,
    },

    #[error("record {row}: missing field {field}")]
    MissingField { row: usize, field: String },

    #[error("record {row}: field {field} must be text, got {found}")]
    InvalidField {
        row: usize,
        field: String,
        found: String,
    },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error("no data found for the selected filters")]
    NoData,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExplorerError {
    pub fn database(reason: impl ToString) -> Self {
        Self::Database {
            reason: reason.to_string(),
        }
    }

    pub fn query(reason: impl ToString) -> Self {
        Self::DatabaseQuery {
            reason: reason.to_string(),
        }
    }

    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for ExplorerError {
    fn from(err: csv::Error) -> Self {
        Self::Export {
            reason: err.to_string(),
        }
    }
}

impl From<&ExplorerError> for std::process::ExitCode {
    fn from(err: &ExplorerError) -> Self {
        let code: u8 = match err {
            ExplorerError::Io(_) => 1,
            ExplorerError::ConfigParse { .. }
            | ExplorerError::ConfigMissing { .. }
            | ExplorerError::ConfigInvalid { .. } => 2,
            ExplorerError::Database { .. } | ExplorerError::DatabaseQuery { .. } => 3,
            ExplorerError::DateParse { .. }
            | ExplorerError::MissingField { .. }
            | ExplorerError::InvalidField { .. } => 4,
            ExplorerError::Export { .. } | ExplorerError::NoData => 5,
        };
        std::process::ExitCode::from(code)
    }
}

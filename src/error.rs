// Error types for the portfolio dashboard library

use thiserror::Error;

/// Errors raised while loading, configuring or querying the dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to read portfolio data from '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration value: {0}")]
    InvalidConfig(String),

    #[error("invalid {field} selection '{value}'")]
    InvalidSelection { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;

use thiserror::Error;

/// Top-level error type for usergraph domain values and configuration.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid node id {0:?}: expected an integer")]
    InvalidId(String),

    #[error("Invalid gender code: {0} (expected 0..=3)")]
    InvalidGender(i64),
}

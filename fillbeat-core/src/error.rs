//! Error types for fillbeat

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FillbeatError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Beat position {0} is outside 1-4")]
    OutOfRangeBeatPosition(u8),

    #[error("Invalid pattern string: {0}")]
    InvalidPattern(String),

    #[error("Settings channel closed")]
    SettingsClosed,
}

/// Result type alias
pub type FillbeatResult<T> = Result<T, FillbeatError>;

use thiserror::Error;

/// Failures at the time boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("Clock reading is missing")]
    MissingReading,

    #[error("Invalid clock reading '{0}'")]
    InvalidReading(String),

    #[error("Invalid UTC offset '{0}', expected e.g. +05:30")]
    InvalidOffset(String),

    #[error("Unknown time zone '{0}'")]
    UnknownZone(String),
}

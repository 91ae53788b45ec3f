use thiserror::Error;

/// Errors raised while constructing or parsing schedule values.
///
/// Every variant is detected eagerly, at construction or parse time. Once a
/// rule set has been built, evaluating it cannot fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{0}' is not a valid day code (expected one of mon, tue, wed, thu, fri, sat, sun)")]
    UnknownDay(String),

    #[error("day ordinal {0} is outside 1..=7")]
    DayOrdinalOutOfRange(u32),

    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u32),

    #[error("minute {0} is outside 0..=59")]
    MinuteOutOfRange(u32),

    #[error("malformed time boundary '{input}': {reason}")]
    MalformedBoundary { input: String, reason: &'static str },

    #[error("malformed rule '{input}': {reason}")]
    MalformedRule { input: String, reason: &'static str },

    #[error("'{0}' is not a valid non-negative integer value")]
    InvalidValue(String),

    #[error("value {0} is negative")]
    NegativeValue(i64),

    #[error("range end {end} is before begin {begin}")]
    ReversedRange { begin: String, end: String },
}

/// Result alias for schedule construction and parsing.
pub type Result<T> = std::result::Result<T, ValidationError>;

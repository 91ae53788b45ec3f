//! Inclusive weekly ranges and the rules built from them.

use std::fmt;
use std::str::FromStr;

use crate::boundary::{TimeBoundary, TimePoint};
use crate::error::{Result, ValidationError};

/// An inclusive, non-wrapping interval of the weekly cycle.
///
/// `begin <= end` always holds, which means a range cannot cross from Sunday
/// into Monday. Schedules that need that are written as two ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekTimeRange {
    begin: TimeBoundary,
    end: TimeBoundary,
}

impl WeekTimeRange {
    pub fn new(begin: TimeBoundary, end: TimeBoundary) -> Result<Self> {
        if end < begin {
            return Err(ValidationError::ReversedRange {
                begin: begin.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> TimeBoundary {
        self.begin
    }

    pub fn end(&self) -> TimeBoundary {
        self.end
    }

    /// Whether `at` falls within `begin..=end`, comparing weekday, hour and minute.
    pub fn matches(&self, at: impl Into<TimePoint>) -> bool {
        let at = at.into();
        self.begin.compare(at).is_le() && self.end.compare(at).is_ge()
    }
}

impl fmt::Display for WeekTimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from {} to {}", self.begin, self.end)
    }
}

// ── WeekTimeRangeValue ──────────────────────────────────────────────

/// A schedule rule: the value to publish while its range is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekTimeRangeValue {
    range: WeekTimeRange,
    value: i64,
}

impl WeekTimeRangeValue {
    /// Build a rule. `value` must be non-negative and `begin <= end`.
    pub fn new(begin: TimeBoundary, end: TimeBoundary, value: i64) -> Result<Self> {
        if value < 0 {
            return Err(ValidationError::NegativeValue(value));
        }
        Ok(Self {
            range: WeekTimeRange::new(begin, end)?,
            value,
        })
    }

    pub fn range(&self) -> &WeekTimeRange {
        &self.range
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn matches(&self, at: impl Into<TimePoint>) -> bool {
        self.range.matches(at)
    }
}

impl fmt::Display for WeekTimeRangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.range, self.value)
    }
}

/// Parses a rule line: `<begin>;<end>=<value>`, e.g. `mon 09:00;mon 18:00=1`.
impl FromStr for WeekTimeRangeValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        let (range, value) = s
            .split_once('=')
            .ok_or_else(|| malformed(s, "missing '=' before the value"))?;
        if value.contains('=') {
            return Err(malformed(s, "more than one '='"));
        }
        let value = parse_value(value)?;

        let (begin, end) = range
            .split_once(';')
            .ok_or_else(|| malformed(s, "missing ';' between begin and end"))?;
        if end.contains(';') {
            return Err(malformed(s, "more than one ';'"));
        }

        Self::new(begin.parse()?, end.parse()?, value)
    }
}

fn malformed(input: &str, reason: &'static str) -> ValidationError {
    ValidationError::MalformedRule {
        input: input.to_string(),
        reason,
    }
}

fn parse_value(text: &str) -> Result<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidValue(text.to_string()));
    }
    // All digits, so the only failure left is overflow.
    text.parse()
        .map_err(|_| ValidationError::InvalidValue(text.to_string()))
}

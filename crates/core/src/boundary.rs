//! Points in the weekly cycle and how they compare to wall-clock time.
//!
//! A [`TimeBoundary`] is a day + hour + minute. It orders against other
//! boundaries and against timestamps through a single scalar key
//! (`ordinal * 10000 + hour * 100 + minute`), so Monday 00:00 is the minimum
//! of the cycle and Sunday 23:59 the maximum. Comparisons never wrap across
//! the end of the week. Seconds and sub-second fields of a timestamp are
//! ignored.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike};

use crate::error::{Result, ValidationError};
use crate::weekday::WeekDay;

/// A single point in the weekly cycle.
///
/// Boundaries compare with `<`, `<=`, `>`, `>=` and `==` against other
/// boundaries, [`NaiveDateTime`] and [`DateTime`]. Any other operand is
/// rejected at compile time:
///
/// ```compile_fail
/// use datimus_core::{TimeBoundary, WeekDay};
/// let b = TimeBoundary::new(WeekDay::Monday, 20, 42).unwrap();
/// let _ = b == 42;
/// ```
///
/// ```compile_fail
/// use datimus_core::{TimeBoundary, WeekDay};
/// let b = TimeBoundary::new(WeekDay::Monday, 20, 42).unwrap();
/// let _ = b < 42;
/// ```
///
/// ```compile_fail
/// use datimus_core::{TimeBoundary, WeekDay};
/// let b = TimeBoundary::new(WeekDay::Monday, 20, 42).unwrap();
/// let _ = b <= 42;
/// ```
///
/// ```compile_fail
/// use datimus_core::{TimeBoundary, WeekDay};
/// let b = TimeBoundary::new(WeekDay::Monday, 20, 42).unwrap();
/// let _ = b > 42;
/// ```
///
/// ```compile_fail
/// use datimus_core::{TimeBoundary, WeekDay};
/// let b = TimeBoundary::new(WeekDay::Monday, 20, 42).unwrap();
/// let _ = b >= "mon 20:42";
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBoundary {
    day: WeekDay,
    hour: u32,
    minute: u32,
}

impl TimeBoundary {
    /// Build a boundary, rejecting an hour outside 0..=23 or a minute outside 0..=59.
    pub fn new(day: WeekDay, hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(minute));
        }
        Ok(Self { day, hour, minute })
    }

    pub fn day(&self) -> WeekDay {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Scalar position of this boundary in the weekly cycle.
    pub fn week_key(&self) -> u32 {
        week_key(self.day, self.hour, self.minute)
    }

    /// Compare this boundary with another boundary or a timestamp.
    ///
    /// Every comparison operator on [`TimeBoundary`] goes through here.
    pub fn compare(&self, other: impl Into<TimePoint>) -> Ordering {
        self.week_key().cmp(&other.into().week_key())
    }
}

fn week_key(day: WeekDay, hour: u32, minute: u32) -> u32 {
    day.ordinal() * 10_000 + hour * 100 + minute
}

// ── TimePoint ───────────────────────────────────────────────────────

/// Anything a [`TimeBoundary`] can be compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePoint {
    Boundary(TimeBoundary),
    /// A local wall-clock timestamp. Only weekday, hour and minute count.
    Instant(NaiveDateTime),
}

impl TimePoint {
    /// Project onto the weekly-cycle key shared with [`TimeBoundary`].
    pub fn week_key(&self) -> u32 {
        match self {
            TimePoint::Boundary(b) => b.week_key(),
            TimePoint::Instant(at) => week_key(at.weekday().into(), at.hour(), at.minute()),
        }
    }
}

impl From<TimeBoundary> for TimePoint {
    fn from(b: TimeBoundary) -> Self {
        TimePoint::Boundary(b)
    }
}

impl From<&TimeBoundary> for TimePoint {
    fn from(b: &TimeBoundary) -> Self {
        TimePoint::Boundary(*b)
    }
}

impl From<NaiveDateTime> for TimePoint {
    fn from(at: NaiveDateTime) -> Self {
        TimePoint::Instant(at)
    }
}

impl From<&NaiveDateTime> for TimePoint {
    fn from(at: &NaiveDateTime) -> Self {
        TimePoint::Instant(*at)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimePoint {
    fn from(at: DateTime<Tz>) -> Self {
        TimePoint::Instant(at.naive_local())
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for TimePoint {
    fn from(at: &DateTime<Tz>) -> Self {
        TimePoint::Instant(at.naive_local())
    }
}

// ── Operators ───────────────────────────────────────────────────────

impl Ord for TimeBoundary {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for TimeBoundary {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<NaiveDateTime> for TimeBoundary {
    fn eq(&self, other: &NaiveDateTime) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd<NaiveDateTime> for TimeBoundary {
    fn partial_cmp(&self, other: &NaiveDateTime) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl<Tz: TimeZone> PartialEq<DateTime<Tz>> for TimeBoundary {
    fn eq(&self, other: &DateTime<Tz>) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl<Tz: TimeZone> PartialOrd<DateTime<Tz>> for TimeBoundary {
    fn partial_cmp(&self, other: &DateTime<Tz>) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

// ── Text ────────────────────────────────────────────────────────────

/// `Monday 09:00`. Not accepted by [`FromStr`], which wants `mon 09:00`.
impl fmt::Display for TimeBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}", self.day, self.hour, self.minute)
    }
}

/// Parses `<day code> HH:MM`, e.g. `tue 20:42`.
///
/// The parser only checks the shape of the input; hour and minute ranges are
/// checked by [`TimeBoundary::new`].
impl FromStr for TimeBoundary {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s
            .get(..3)
            .ok_or_else(|| ValidationError::UnknownDay(s.to_string()))?;
        let day = code.parse::<WeekDay>()?;

        let time = s[3..]
            .strip_prefix(' ')
            .ok_or_else(|| malformed(s, "expected a single space after the day code"))?;
        let (hour, minute) = time
            .split_once(':')
            .ok_or_else(|| malformed(s, "expected HH:MM"))?;
        let hour = parse_digits(hour).ok_or_else(|| malformed(s, "hour is not a number"))?;
        let minute = parse_digits(minute).ok_or_else(|| malformed(s, "minute is not a number"))?;

        Self::new(day, hour, minute)
    }
}

fn malformed(input: &str, reason: &'static str) -> ValidationError {
    ValidationError::MalformedBoundary {
        input: input.to_string(),
        reason,
    }
}

/// Non-empty run of ASCII digits.
fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

//! Days of the weekly cycle.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValidationError};

/// A day of the week with a stable ISO ordinal (Monday = 1 … Sunday = 7).
///
/// Ordering follows the ordinal, so Monday is the first day of the weekly
/// cycle and Sunday the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeekDay {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

/// The only accepted spellings for a day in a rule line.
const DAY_CODES: [(&str, WeekDay); 7] = [
    ("mon", WeekDay::Monday),
    ("tue", WeekDay::Tuesday),
    ("wed", WeekDay::Wednesday),
    ("thu", WeekDay::Thursday),
    ("fri", WeekDay::Friday),
    ("sat", WeekDay::Saturday),
    ("sun", WeekDay::Sunday),
];

impl WeekDay {
    /// All seven days in weekly order.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    /// ISO weekday number, 1 for Monday through 7 for Sunday.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Look up a day by its ISO ordinal.
    pub fn from_ordinal(ordinal: u32) -> Result<Self> {
        match ordinal {
            1..=7 => Ok(Self::ALL[(ordinal - 1) as usize]),
            other => Err(ValidationError::DayOrdinalOutOfRange(other)),
        }
    }

    /// Look up a day by its lowercase 3-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        DAY_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, day)| *day)
    }

    /// The lowercase 3-letter code accepted by the rule parser.
    pub fn code(self) -> &'static str {
        DAY_CODES[(self.ordinal() - 1) as usize].0
    }

    /// Full capitalized name, used for display only.
    pub fn name(self) -> &'static str {
        match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
            WeekDay::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => WeekDay::Monday,
            chrono::Weekday::Tue => WeekDay::Tuesday,
            chrono::Weekday::Wed => WeekDay::Wednesday,
            chrono::Weekday::Thu => WeekDay::Thursday,
            chrono::Weekday::Fri => WeekDay::Friday,
            chrono::Weekday::Sat => WeekDay::Saturday,
            chrono::Weekday::Sun => WeekDay::Sunday,
        }
    }
}

impl TryFrom<u32> for WeekDay {
    type Error = ValidationError;

    fn try_from(ordinal: u32) -> Result<Self> {
        Self::from_ordinal(ordinal)
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the 3-letter code only. The display name does not parse back.
impl FromStr for WeekDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| ValidationError::UnknownDay(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_iso_numbering() {
        for (i, day) in WeekDay::ALL.iter().enumerate() {
            assert_eq!(day.ordinal(), i as u32 + 1);
            assert_eq!(WeekDay::from_ordinal(i as u32 + 1).unwrap(), *day);
        }
    }

    #[test]
    fn ordinal_out_of_range_is_rejected() {
        assert_eq!(
            WeekDay::from_ordinal(0),
            Err(ValidationError::DayOrdinalOutOfRange(0))
        );
        assert_eq!(
            WeekDay::try_from(8u32),
            Err(ValidationError::DayOrdinalOutOfRange(8))
        );
    }

    #[test]
    fn codes_round_trip() {
        for day in WeekDay::ALL {
            assert_eq!(day.code().parse::<WeekDay>().unwrap(), day);
        }
    }

    #[test]
    fn only_lowercase_short_codes_parse() {
        assert!("Mon".parse::<WeekDay>().is_err());
        assert!("monday".parse::<WeekDay>().is_err());
        assert!("Monday".parse::<WeekDay>().is_err());
        assert!("xyz".parse::<WeekDay>().is_err());
        assert!("".parse::<WeekDay>().is_err());
    }

    #[test]
    fn display_is_capitalized_name() {
        assert_eq!(WeekDay::Wednesday.to_string(), "Wednesday");
        assert_eq!(WeekDay::Sunday.to_string(), "Sunday");
    }

    #[test]
    fn ordering_is_by_ordinal() {
        assert!(WeekDay::Monday < WeekDay::Tuesday);
        assert!(WeekDay::Saturday < WeekDay::Sunday);
        assert!(WeekDay::Sunday > WeekDay::Monday);
    }

    #[test]
    fn converts_from_chrono() {
        assert_eq!(WeekDay::from(chrono::Weekday::Mon), WeekDay::Monday);
        assert_eq!(WeekDay::from(chrono::Weekday::Sun), WeekDay::Sunday);
    }
}

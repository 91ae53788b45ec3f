//! First-match-wins resolution of a metric's rule list.
//!
//! Rules are tried in declaration order and the first one whose range
//! contains the instant decides the value, even when a later rule is a
//! tighter fit. When nothing matches, the caller-supplied default applies.

use crate::boundary::TimePoint;
use crate::range::WeekTimeRangeValue;

/// Outcome of resolving one metric at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The rule at `index` in the list was the first to match.
    Rule {
        index: usize,
        rule: &'a WeekTimeRangeValue,
    },
    /// No rule matched.
    Default { value: i64 },
}

impl Resolution<'_> {
    /// The value to publish.
    pub fn value(&self) -> i64 {
        match self {
            Resolution::Rule { rule, .. } => rule.value(),
            Resolution::Default { value } => *value,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Resolution::Default { .. })
    }
}

/// The first rule matching `at`, with its position in `rules`.
pub fn first_match(
    rules: &[WeekTimeRangeValue],
    at: impl Into<TimePoint>,
) -> Option<(usize, &WeekTimeRangeValue)> {
    let at = at.into();
    rules.iter().enumerate().find(|(_, rule)| rule.matches(at))
}

/// Resolve `rules` at `at`, falling back to `default`.
pub fn resolve(
    rules: &[WeekTimeRangeValue],
    default: i64,
    at: impl Into<TimePoint>,
) -> Resolution<'_> {
    match first_match(rules, at) {
        Some((index, rule)) => Resolution::Rule { index, rule },
        None => Resolution::Default { value: default },
    }
}

/// The value to publish for `rules` at `at`.
pub fn evaluate(rules: &[WeekTimeRangeValue], default: i64, at: impl Into<TimePoint>) -> i64 {
    resolve(rules, default, at).value()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    /// 2025-01-06 was a Monday.
    fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn rules(lines: &[&str]) -> Vec<WeekTimeRangeValue> {
        lines.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn first_listed_rule_wins_over_tighter_match() {
        let rules = rules(&["mon 00:00;mon 23:59=1", "mon 09:00;mon 10:00=2"]);
        assert_eq!(evaluate(&rules, 0, monday_at(9, 30)), 1);
    }

    #[test]
    fn declaration_order_decides_overlaps() {
        let rules = rules(&["mon 09:00;mon 10:00=2", "mon 00:00;mon 23:59=1"]);
        assert_eq!(evaluate(&rules, 0, monday_at(9, 30)), 2);
        assert_eq!(evaluate(&rules, 0, monday_at(11, 0)), 1);
    }

    #[test]
    fn default_applies_when_nothing_matches() {
        let rules = rules(&["tue 09:00;tue 18:00=1"]);
        assert_eq!(evaluate(&rules, 7, monday_at(9, 30)), 7);
        assert_eq!(evaluate(&[], 7, monday_at(9, 30)), 7);
    }

    #[test]
    fn resolve_reports_matching_index() {
        let rules = rules(&["tue 09:00;tue 18:00=1", "mon 09:00;mon 18:00=3"]);
        match resolve(&rules, 0, monday_at(12, 0)) {
            Resolution::Rule { index, rule } => {
                assert_eq!(index, 1);
                assert_eq!(rule.value(), 3);
            }
            other => panic!("expected a rule match, got {other:?}"),
        }
    }

    #[test]
    fn resolve_reports_default() {
        let resolution = resolve(&[], 5, monday_at(12, 0));
        assert!(resolution.is_default());
        assert_eq!(resolution.value(), 5);
    }

    #[test]
    fn zero_valued_rule_is_not_a_default() {
        let rules = rules(&["mon 00:00;mon 23:59=0"]);
        let resolution = resolve(&rules, 9, monday_at(12, 0));
        assert!(!resolution.is_default());
        assert_eq!(resolution.value(), 0);
    }
}

//! Weekly time-range matching engine.
//!
//! Parses rule lines such as `mon 09:00;mon 18:00=1`, and resolves an
//! ordered rule list against a wall-clock instant with first-match-wins
//! semantics and a fallback default. Pure data: no I/O, no global state.

pub mod boundary;
pub mod error;
pub mod evaluator;
pub mod range;
pub mod weekday;

pub use boundary::{TimeBoundary, TimePoint};
pub use error::{Result, ValidationError};
pub use evaluator::{evaluate, first_match, resolve, Resolution};
pub use range::{WeekTimeRange, WeekTimeRangeValue};
pub use weekday::WeekDay;

//! Schedule loader: agent config plus TOML metric files.
//!
//! Every rule line is parsed at load time, so a malformed schedule never
//! reaches the runner.

mod core;
mod error;


pub use self::core::{load_metric_file, parse_metric_file, LoadedSchedule, ScheduleLoader};
pub use self::error::{LoadError, Result};

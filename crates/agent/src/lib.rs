//! Runtime of the datimus agent.
//!
//! Turns a loaded [`MetricTable`](datimus_rules::MetricTable) into live
//! Prometheus gauges: [`gauges`] holds one gauge per metric, [`runner`]
//! refreshes them on a fixed interval and [`http`] serves them.

pub mod check;
pub mod cli;
pub mod gauges;
pub mod http;
pub mod runner;

pub use check::check_schedule;
pub use cli::Cli;
pub use gauges::GaugeSet;
pub use runner::{run, tick, TickReport};

//! Schedule files for the datimus agent.
//!
//! This crate provides:
//! - the agent configuration file (`[agent]` section)
//! - TOML metric files mapping metric names to rule lines
//! - the caller-owned [`MetricTable`] built from them at startup

pub mod config;
pub mod loader;
pub mod schedule;

pub use config::AgentConfig;
pub use loader::{LoadError, LoadedSchedule, Result, ScheduleLoader};
pub use schedule::{MetricSchedule, MetricTable};

//! Tick loop: re-evaluate every metric on a fixed interval.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use datimus_core::Resolution;
use datimus_rules::MetricTable;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::gauges::GaugeSet;

/// Counts from one evaluation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub metrics: usize,
    /// Metrics whose value came from a rule.
    pub matched: usize,
    /// Metrics that fell back to a default.
    pub defaulted: usize,
}

/// Evaluate every metric against the single instant `now` and publish the
/// values.
pub fn tick(table: &MetricTable, gauges: &GaugeSet, now: NaiveDateTime) -> TickReport {
    let mut report = TickReport::default();

    for schedule in table.iter() {
        let resolution = schedule.resolve(table.default_value(), now);
        match resolution {
            Resolution::Rule { index, rule } => {
                debug!(metric = schedule.name(), index, range = %rule.range(), value = rule.value(), "rule matched");
                report.matched += 1;
            }
            Resolution::Default { value } => {
                debug!(metric = schedule.name(), value, "no rule matched, using default");
                report.defaulted += 1;
            }
        }

        if !gauges.set(schedule.name(), resolution.value()) {
            warn!(metric = schedule.name(), "no gauge registered for metric");
        }
        report.metrics += 1;
    }

    report
}

/// Run [`tick`] every `every` until `shutdown` flips to `true`.
///
/// The first tick fires immediately. Slow ticks delay the schedule instead
/// of bursting to catch up.
pub async fn run(
    table: &MetricTable,
    gauges: &GaugeSet,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(metrics = table.len(), interval_secs = every.as_secs(), "runner started");
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let started = Instant::now();
                let report = tick(table, gauges, Local::now().naive_local());
                info!(
                    metrics = report.metrics,
                    matched = report.matched,
                    defaulted = report.defaulted,
                    elapsed = ?started.elapsed(),
                    "computed metrics"
                );
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    info!("runner stopped");
}

//! `--check`: validate a loaded schedule the way startup would, without
//! serving anything.

use std::fmt::Write;

use datimus_rules::LoadedSchedule;

use crate::gauges::GaugeSet;

/// Register the schedule's gauges and describe the schedule.
///
/// Fails on anything that would stop a real startup after loading, such as a
/// metric name Prometheus rejects.
pub fn check_schedule(schedule: &LoadedSchedule) -> prometheus::Result<String> {
    let LoadedSchedule { config, table } = schedule;
    GaugeSet::new(table)?;

    let mut summary = format!(
        "schedule OK: {} metrics, {} rules, default {}, every {}s\n",
        table.len(),
        table.rule_count(),
        config.default_value,
        config.sleep_time
    );
    for metric in table.iter() {
        let rules = metric.rules().len();
        // Writing into a String cannot fail.
        let _ = match metric.default() {
            Some(default) => writeln!(
                summary,
                "  {} ({rules} rules, default {default})",
                metric.name()
            ),
            None => writeln!(summary, "  {} ({rules} rules)", metric.name()),
        };
    }
    Ok(summary)
}

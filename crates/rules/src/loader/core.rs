//! Core [`ScheduleLoader`]: reads the agent config, then every metric file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use datimus_core::WeekTimeRangeValue;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::AgentConfig;
use crate::schedule::{MetricSchedule, MetricTable};

use super::error::{LoadError, Result};

// ── File layout ─────────────────────────────────────────────────────

/// A metric file: a single `[metrics]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MetricFile {
    metrics: IndexMap<String, MetricEntry>,
}

/// Right-hand side of a metric entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetricEntry {
    /// `name = ["mon 09:00;mon 18:00=1", ...]` or a multi-line string.
    Short(RuleLines),
    /// `[metrics.name]` with `rules` and an optional `default`.
    Full(FullMetric),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FullMetric {
    rules: RuleLines,
    #[serde(default)]
    default: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RuleLines {
    List(Vec<String>),
    Block(String),
}

impl RuleLines {
    /// Trimmed, non-empty lines in declaration order.
    fn lines(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            RuleLines::List(items) => items.iter().flat_map(|item| item.lines()).collect(),
            RuleLines::Block(block) => block.lines().collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

// ── Loader ──────────────────────────────────────────────────────────

/// A fully loaded schedule: the agent settings plus the metric table.
#[derive(Debug, Clone)]
pub struct LoadedSchedule {
    pub config: AgentConfig,
    pub table: MetricTable,
}

/// Loads a schedule from an agent config file and the metric files it lists.
///
/// Loading is all-or-nothing: any I/O, TOML, rule or duplicate-name error
/// aborts the whole load.
#[derive(Debug, Clone)]
pub struct ScheduleLoader {
    config_path: PathBuf,
}

impl ScheduleLoader {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read the config, then every metric file in order.
    pub fn load(&self) -> Result<LoadedSchedule> {
        let config = AgentConfig::from_file(&self.config_path)?;
        info!(
            path = %self.config_path.display(),
            files = config.metric_files.len(),
            default_value = config.default_value,
            sleep_time = config.sleep_time,
            "loaded agent config"
        );

        let mut table = MetricTable::new(config.default_value);
        for path in &config.metric_files {
            load_metric_file(path, &mut table)?;
        }

        info!(
            metrics = table.len(),
            rules = table.rule_count(),
            "schedule loaded"
        );
        Ok(LoadedSchedule { config, table })
    }
}

/// Read one metric file and add its metrics to `table`.
///
/// On error `table` is left unchanged.
pub fn load_metric_file(path: &Path, table: &mut MetricTable) -> Result<usize> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let schedules = parse_metric_file(&content, path)?;

    // Reject the whole file before touching `table`.
    let mut seen = HashSet::with_capacity(schedules.len());
    for schedule in &schedules {
        if table.get(schedule.name()).is_some() || !seen.insert(schedule.name()) {
            return Err(LoadError::DuplicateMetric {
                name: schedule.name().to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    let count = schedules.len();
    for schedule in schedules {
        table.insert(schedule);
    }

    debug!(path = %path.display(), metrics = count, "loaded metric file");
    Ok(count)
}

/// Parse metric file text. `path` is only used in error reports.
pub fn parse_metric_file(content: &str, path: &Path) -> Result<Vec<MetricSchedule>> {
    let file: MetricFile = toml::from_str(content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut schedules = Vec::with_capacity(file.metrics.len());
    for (name, entry) in file.metrics {
        if name.trim().is_empty() {
            return Err(LoadError::Validation(format!(
                "empty metric name in {}",
                path.display()
            )));
        }

        let (lines, default) = match &entry {
            MetricEntry::Short(lines) => (lines, None),
            MetricEntry::Full(full) => (&full.rules, full.default),
        };

        let mut rules = Vec::new();
        for line in lines.lines() {
            let rule: WeekTimeRangeValue = line.parse().map_err(|source| LoadError::Rule {
                metric: name.clone(),
                path: path.to_path_buf(),
                line: line.to_string(),
                source,
            })?;
            rules.push(rule);
        }

        debug!(metric = %name, rules = rules.len(), "parsed metric");
        let schedule = MetricSchedule::new(name, rules);
        schedules.push(match default {
            Some(default) => schedule.with_default(default),
            None => schedule,
        });
    }
    Ok(schedules)
}

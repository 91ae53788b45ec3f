//! In-memory schedule: every metric with its ordered rule list.

use datimus_core::{resolve, Resolution, TimePoint, WeekTimeRangeValue};
use indexmap::IndexMap;

/// One metric and its rules, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSchedule {
    name: String,
    rules: Vec<WeekTimeRangeValue>,
    /// Per-metric override of the global default.
    default: Option<i64>,
}

impl MetricSchedule {
    pub fn new(name: impl Into<String>, rules: Vec<WeekTimeRangeValue>) -> Self {
        Self {
            name: name.into(),
            rules,
            default: None,
        }
    }

    /// Use `default` instead of the global default when no rule matches.
    pub fn with_default(mut self, default: i64) -> Self {
        self.default = Some(default);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[WeekTimeRangeValue] {
        &self.rules
    }

    pub fn default(&self) -> Option<i64> {
        self.default
    }

    /// Resolve this metric at `at`. The metric's own default, when set,
    /// takes precedence over `global_default`.
    pub fn resolve(&self, global_default: i64, at: impl Into<TimePoint>) -> Resolution<'_> {
        resolve(&self.rules, self.default.unwrap_or(global_default), at)
    }

    pub fn evaluate(&self, global_default: i64, at: impl Into<TimePoint>) -> i64 {
        self.resolve(global_default, at).value()
    }
}

/// All metrics of a loaded schedule, keyed by name in load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTable {
    default_value: i64,
    metrics: IndexMap<String, MetricSchedule>,
}

impl MetricTable {
    pub fn new(default_value: i64) -> Self {
        Self {
            default_value,
            metrics: IndexMap::new(),
        }
    }

    /// Global fallback value.
    pub fn default_value(&self) -> i64 {
        self.default_value
    }

    /// Add a metric. Returns `false` and leaves the table untouched when a
    /// metric with the same name already exists.
    pub fn insert(&mut self, schedule: MetricSchedule) -> bool {
        if self.metrics.contains_key(schedule.name()) {
            return false;
        }
        self.metrics.insert(schedule.name.clone(), schedule);
        true
    }

    pub fn get(&self, name: &str) -> Option<&MetricSchedule> {
        self.metrics.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSchedule> {
        self.metrics.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Total number of rules across all metrics.
    pub fn rule_count(&self) -> usize {
        self.metrics.values().map(|m| m.rules.len()).sum()
    }
}

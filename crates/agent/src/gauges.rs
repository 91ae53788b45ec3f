//! One Prometheus integer gauge per scheduled metric.

use std::sync::Arc;

use datimus_rules::MetricTable;
use indexmap::IndexMap;
use prometheus::{Encoder, IntGauge, Opts, Registry, TextEncoder};

/// Gauges for every metric of a [`MetricTable`], registered in a private
/// registry.
///
/// Cloning is cheap and clones share the same gauges, so the runner and
/// the HTTP handlers can each hold one.
#[derive(Clone)]
pub struct GaugeSet {
    registry: Registry,
    gauges: Arc<IndexMap<String, IntGauge>>,
}

impl GaugeSet {
    /// Register one gauge per metric. Fails on names Prometheus rejects.
    pub fn new(table: &MetricTable) -> prometheus::Result<Self> {
        let registry = Registry::new();
        let mut gauges = IndexMap::with_capacity(table.len());

        for name in table.names() {
            let gauge = IntGauge::with_opts(Opts::new(name, format!("datimus schedule {name}")))?;
            registry.register(Box::new(gauge.clone()))?;
            gauges.insert(name.to_string(), gauge);
        }

        Ok(Self {
            registry,
            gauges: Arc::new(gauges),
        })
    }

    /// Set a gauge. Returns `false` for an unknown metric.
    pub fn set(&self, name: &str, value: i64) -> bool {
        match self.gauges.get(name) {
            Some(gauge) => {
                gauge.set(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.gauges.get(name).map(IntGauge::get)
    }

    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// Current values in the Prometheus text exposition format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for GaugeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaugeSet")
            .field("metrics", &self.gauges.keys().collect::<Vec<_>>())
            .finish()
    }
}

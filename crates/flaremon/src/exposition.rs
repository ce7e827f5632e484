//! Prometheus text exposition of one scrape's metric records.
//!
//! A fresh registry is built per scrape, so series that disappear upstream
//! disappear from the output too.

use std::collections::{HashMap, HashSet};

use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tracing::warn;

use flaremon_core::schema::BUILD_INFO;
use flaremon_core::{MetricKind, MetricRecord};

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

enum Vector {
    Counter(CounterVec),
    Gauge(GaugeVec),
}

struct Family {
    keys: Vec<&'static str>,
    vector: Vector,
}

/// The exporter's build info record.
pub fn build_info() -> MetricRecord {
    BUILD_INFO.fixed(vec![env!("CARGO_PKG_VERSION").to_owned()], 1.0)
}

/// Encode `records` in the Prometheus text format.
///
/// The first record for a name fixes its label keys; later records with a
/// different key set, a repeated label tuple, or a negative counter value
/// are dropped with a warning.
pub fn render(records: &[MetricRecord]) -> Result<String, prometheus::Error> {
    let registry = Registry::new();
    let mut families: HashMap<&str, Family> = HashMap::new();
    let mut seen: HashSet<(&str, Vec<&str>)> = HashSet::new();

    for record in records {
        let keys = record.label_keys();
        let values = record.label_values();

        if let Some(family) = families.get(record.name.as_str()) {
            if family.keys != keys {
                warn!(
                    metric = %record.name,
                    expected = ?family.keys,
                    got = ?keys,
                    "label keys differ from the first record, dropping"
                );
                continue;
            }
        } else {
            let family = register(&registry, record, keys)?;
            families.insert(record.name.as_str(), family);
        }

        if !seen.insert((record.name.as_str(), values.clone())) {
            warn!(metric = %record.name, labels = ?values, "duplicate series, keeping the first");
            continue;
        }

        let Some(family) = families.get(record.name.as_str()) else {
            continue;
        };
        match &family.vector {
            Vector::Counter(vec) => {
                if record.value.is_nan() || record.value < 0.0 {
                    warn!(metric = %record.name, value = record.value, "invalid counter value, dropping");
                    continue;
                }
                vec.get_metric_with_label_values(&values)?
                    .inc_by(record.value);
            }
            Vector::Gauge(vec) => {
                vec.get_metric_with_label_values(&values)?.set(record.value);
            }
        }
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

fn register(
    registry: &Registry,
    record: &MetricRecord,
    keys: Vec<&'static str>,
) -> Result<Family, prometheus::Error> {
    let opts = Opts::new(record.name.clone(), record.help);
    let vector = match record.kind {
        MetricKind::Counter => {
            let vec = CounterVec::new(opts, &keys)?;
            registry.register(Box::new(vec.clone()))?;
            Vector::Counter(vec)
        }
        MetricKind::Gauge => {
            let vec = GaugeVec::new(opts, &keys)?;
            registry.register(Box::new(vec.clone()))?;
            Vector::Gauge(vec)
        }
    };
    Ok(Family { keys, vector })
}

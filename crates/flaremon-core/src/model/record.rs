use strum::Display;

/// Exposition type of a metric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MetricKind {
    /// Monotonically non-decreasing within its window.
    Counter,
    /// Point-in-time value.
    Gauge,
}

/// One labeled sample, ready for exposition.
///
/// Label keys are `'static` because every family's label schema is fixed
/// at compile time; only the values vary.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub name: String,
    pub help: &'static str,
    pub kind: MetricKind,
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

impl MetricRecord {
    /// Value of the label `key`, if present.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Label keys in schema order.
    pub fn label_keys(&self) -> Vec<&'static str> {
        self.labels.iter().map(|(k, _)| *k).collect()
    }

    /// Label values in schema order.
    pub fn label_values(&self) -> Vec<&str> {
        self.labels.iter().map(|(_, v)| v.as_str()).collect()
    }
}

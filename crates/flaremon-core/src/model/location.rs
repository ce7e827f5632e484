use serde::Serialize;
use strum::Display;

/// Display value used when a location cannot be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Where a location entry came from, ordered by authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Provenance {
    /// Synthesized on a failed lookup; never stored.
    Fallback,
    /// Learned from the status feed at runtime.
    Learned,
    /// Shipped in the built-in table.
    BuiltIn,
}

/// A resolved Cloudflare data-center code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationCode {
    pub code: String,
    pub display_name: String,
    pub region: String,
    pub provenance: Provenance,
}

impl LocationCode {
    pub fn new(
        code: impl Into<String>,
        display_name: impl Into<String>,
        region: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            region: region.into(),
            provenance,
        }
    }

    /// The entry returned for a code nobody knows. Keeps the queried code
    /// (or `Unknown` when it was empty) and marks name and region unknown.
    pub fn fallback(code: &str) -> Self {
        let code = code.trim();
        Self::new(
            if code.is_empty() { UNKNOWN } else { code },
            UNKNOWN,
            UNKNOWN,
            Provenance::Fallback,
        )
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

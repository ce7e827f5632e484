// ── Identity Registry ──
//
// Resolves Cloudflare data-center codes to display names and regions.
// Seeded from the built-in table, extended by the status feed. Readers
// load an immutable snapshot; writers swap in a new one, so a refresh in
// progress never blocks a lookup.

mod builtin;

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use flaremon_api::models::StatusSummary;
use tracing::debug;

use crate::model::{LocationCode, Provenance};
use crate::status::location_components;

use self::builtin::BUILTIN_LOCATIONS;

#[derive(Debug, Default, Clone)]
struct Snapshot {
    by_code: HashMap<String, Arc<LocationCode>>,
    /// Every entry, sorted by display name.
    listing: Vec<Arc<LocationCode>>,
}

impl Snapshot {
    /// Insert `entry` unless its code is already known. Returns whether
    /// anything changed. Does not re-sort the listing.
    fn insert(&mut self, entry: LocationCode) -> bool {
        if self.by_code.contains_key(&entry.code) {
            return false;
        }
        let entry = Arc::new(entry);
        self.by_code.insert(entry.code.clone(), Arc::clone(&entry));
        self.listing.push(entry);
        true
    }

    fn sort(&mut self) {
        self.listing
            .sort_by(|a, b| a.display_name.cmp(&b.display_name).then_with(|| a.code.cmp(&b.code)));
    }
}

/// Shared, append-only map of location codes.
///
/// Explicitly constructed and passed by reference (usually in an `Arc`);
/// there is no process-wide instance.
#[derive(Debug, Default)]
pub struct LocationRegistry {
    snapshot: ArcSwap<Snapshot>,
}

/// Normalize a code for lookup and storage.
fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl LocationRegistry {
    /// An empty registry. Every lookup falls back until something is learned.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in table.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        registry.bulk_load_builtins();
        registry
    }

    /// Load the built-in table. Codes already present are left alone.
    /// Returns how many entries were added.
    pub fn bulk_load_builtins(&self) -> usize {
        let added = self.insert_all(BUILTIN_LOCATIONS.iter().map(|(code, name, region)| {
            LocationCode::new(normalize(code), *name, *region, Provenance::BuiltIn)
        }));
        debug!(added, "loaded built-in locations");
        added
    }

    /// Resolve `code` to a location. Never fails.
    ///
    /// Lookup order: exact code; then the part before the first `-`
    /// (`SJC-PIG` falls back to `SJC`); then a fallback entry that is
    /// returned but not stored.
    pub fn resolve(&self, code: &str) -> Arc<LocationCode> {
        let key = normalize(code);
        let snapshot = self.snapshot.load();

        if let Some(found) = snapshot.by_code.get(&key) {
            return Arc::clone(found);
        }
        if let Some((primary, _)) = key.split_once('-') {
            if let Some(found) = snapshot.by_code.get(primary) {
                return Arc::clone(found);
            }
        }
        Arc::new(LocationCode::fallback(code))
    }

    /// Exact lookup without suffix stripping or fallback.
    pub fn get(&self, code: &str) -> Option<Arc<LocationCode>> {
        self.snapshot.load().by_code.get(&normalize(code)).cloned()
    }

    /// Record a location seen at runtime. A code that is already known,
    /// whatever its provenance, is left untouched. Returns whether the
    /// entry was new.
    pub fn learn(&self, code: &str, display_name: &str, region: &str) -> bool {
        self.learn_all([(code, display_name, region)]) == 1
    }

    /// Batch form of [`learn`](Self::learn): one snapshot swap for the lot.
    /// Returns how many entries were new.
    pub fn learn_all<'a, I>(&self, triples: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        self.insert_all(
            triples
                .into_iter()
                .filter(|(code, _, _)| !code.trim().is_empty())
                .map(|(code, name, region)| {
                    LocationCode::new(normalize(code), name.trim(), region.trim(), Provenance::Learned)
                }),
        )
    }

    /// Learn every location component of a status summary.
    ///
    /// Takes an already parsed summary, so a feed that failed to load or
    /// parse never reaches the registry and the previous state stays.
    pub fn refresh_from_status(&self, summary: &StatusSummary) -> usize {
        let learned = self.learn_all(
            location_components(summary)
                .iter()
                .map(|c| (c.code, c.display_name, c.region)),
        );
        if learned > 0 {
            debug!(learned, total = self.len(), "learned locations from status feed");
        }
        learned
    }

    /// Every known location, sorted by display name.
    pub fn listing(&self) -> Vec<Arc<LocationCode>> {
        self.snapshot.load().listing.clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot.load().by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_all(&self, entries: impl Iterator<Item = LocationCode>) -> usize {
        let candidates: Vec<LocationCode> = {
            let current = self.snapshot.load();
            entries
                .filter(|e| !current.by_code.contains_key(&e.code))
                .collect()
        };
        if candidates.is_empty() {
            return 0;
        }

        let mut added = 0;
        self.snapshot.rcu(|current| {
            let mut next = Snapshot::clone(current);
            added = 0;
            for entry in &candidates {
                if next.insert(entry.clone()) {
                    added += 1;
                }
            }
            if added > 0 {
                next.sort();
            }
            next
        });
        added
    }
}

use std::collections::HashMap;

use super::VersionDetails;

/// Versions already fetched during one command, keyed by version id.
///
/// Versions are immutable, so an entry never needs refreshing and nothing is
/// ever evicted.
#[derive(Debug, Default)]
pub struct VersionCache {
    versions: HashMap<String, VersionDetails>,
}

impl VersionCache {
    pub fn new() -> Self {
        VersionCache::default()
    }

    pub fn get(&self, version_id: &str) -> Option<&VersionDetails> {
        self.versions.get(version_id)
    }

    /// Stores `details` unless its id is already cached, and returns the
    /// cached entry either way.
    pub fn insert_if_absent(&mut self, details: VersionDetails) -> &VersionDetails {
        self.versions.entry(details.id.clone()).or_insert(details)
    }
}

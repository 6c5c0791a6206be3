//! In-memory metadata cache keyed by file path.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::models::TrackMetadata;

/// Previously extracted metadata, reused until an explicit [`MetadataCache::clear`].
///
/// Unbounded: entries are only dropped by `clear`.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: RwLock<HashMap<PathBuf, TrackMetadata>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, path: &Path) -> Option<TrackMetadata> {
        self.entries.read().get(path).cloned()
    }

    /// Store a whole entry, replacing any previous one for the same path.
    pub fn store(&self, path: PathBuf, entry: TrackMetadata) {
        self.entries.write().insert(path, entry);
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write();
        let removed = entries.len();
        entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}

//! Freshness-aware file cache for dataset snapshots.
//!
//! One file per `(dataset_id, capture timestamp)` pair, written once and
//! never mutated. Freshness is decided against the source catalog's
//! last-modified marker, not a fixed TTL; the retention sweep in
//! [`sweep`](crate::cache::FileCache::sweep) only bounds storage growth.
//!
//! Concurrent writers for the same dataset id produce distinct keys
//! (millisecond timestamps) and at worst duplicate work. A sweep deleting a
//! file while a lookup reads it is a tolerated race: the lookup skips the
//! entry and keeps scanning.

mod sweep;

pub use sweep::SweepReport;

use crate::snapshot::{CacheKey, DatasetSnapshot};
use crate::Error;
use std::path::{Path, PathBuf};

/// Outcome of a cache lookup. A miss is expected control flow, not an error.
#[derive(Debug)]
pub enum Lookup {
    Hit(DatasetSnapshot),
    Miss,
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

/// Snapshot store backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
    retention: chrono::Duration,
}

impl FileCache {
    /// Create a cache over `root` with an age-based retention window.
    ///
    /// The root directory is created lazily on the first `store`.
    pub fn new(root: impl Into<PathBuf>, retention_weeks: i64) -> Self {
        Self { root: root.into(), retention: chrono::Duration::weeks(retention_weeks) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn retention(&self) -> chrono::Duration {
        self.retention
    }

    /// List every stored key for `dataset_id`, in directory order.
    ///
    /// A missing root directory means an empty store, not an error. Files
    /// that do not parse as cache keys are ignored.
    pub async fn list_keys(&self, dataset_id: &str) -> Result<Vec<CacheKey>, Error> {
        let mut keys = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(key) = CacheKey::parse(name)
                && key.dataset_id == dataset_id
            {
                keys.push(key);
            }
        }

        Ok(keys)
    }

    /// Return the first stored snapshot captured strictly after
    /// `marker_millis`, or [`Lookup::Miss`].
    ///
    /// Entries that vanish or fail to decode mid-scan are skipped; the sweep
    /// may be deleting them concurrently.
    pub async fn find_fresh(&self, dataset_id: &str, marker_millis: i64) -> Result<Lookup, Error> {
        for key in self.list_keys(dataset_id).await? {
            if key.captured_at_millis <= marker_millis {
                continue;
            }
            match self.read(&key).await {
                Ok(snapshot) => {
                    tracing::debug!(dataset_id, captured_at = key.captured_at_millis, "cache hit");
                    return Ok(Lookup::Hit(snapshot));
                }
                Err(e) => {
                    tracing::warn!(dataset_id, file = %key.file_name(), error = %e, "skipping unreadable cache entry");
                }
            }
        }

        tracing::debug!(dataset_id, marker_millis, "cache miss");
        Ok(Lookup::Miss)
    }

    /// Load one snapshot body by key.
    pub async fn read(&self, key: &CacheKey) -> Result<DatasetSnapshot, Error> {
        let bytes = tokio::fs::read(self.root.join(key.file_name())).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Persist a snapshot under a fresh capture timestamp.
    ///
    /// Creates the storage root if needed. Prior snapshots for the same
    /// dataset id are left in place for the sweep to reclaim.
    pub async fn store(&self, dataset_id: &str, snapshot: &DatasetSnapshot) -> Result<CacheKey, Error> {
        self.store_at(dataset_id, snapshot, chrono::Utc::now().timestamp_millis())
            .await
    }

    async fn store_at(
        &self,
        dataset_id: &str,
        snapshot: &DatasetSnapshot,
        captured_at_millis: i64,
    ) -> Result<CacheKey, Error> {
        tokio::fs::create_dir_all(&self.root).await?;

        let key = CacheKey::new(dataset_id, captured_at_millis);
        let body = serde_json::to_vec(snapshot)?;
        tokio::fs::write(self.root.join(key.file_name()), body).await?;

        tracing::debug!(dataset_id, captured_at = captured_at_millis, "stored snapshot");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::JsonObject;

    fn snapshot_with_marker(marker: &str) -> DatasetSnapshot {
        let mut record = JsonObject::new();
        record.insert("id".to_string(), serde_json::json!("0"));
        record.insert("marker".to_string(), serde_json::json!(marker));
        let mut snapshot = DatasetSnapshot::empty();
        snapshot.properties.push(record);
        snapshot
    }

    #[tokio::test]
    async fn test_store_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), 4);

        let key = cache.store("ds1", &DatasetSnapshot::empty()).await.unwrap();
        assert_eq!(key.dataset_id, "ds1");

        let keys = cache.list_keys("ds1").await.unwrap();
        assert_eq!(keys, vec![key]);
        assert!(cache.list_keys("other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested").join("data"), 4);

        cache.store("ds1", &DatasetSnapshot::empty()).await.unwrap();
        assert_eq!(cache.list_keys("ds1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_keeps_prior_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), 4);

        cache
            .store_at("ds1", &DatasetSnapshot::empty(), 1_000)
            .await
            .unwrap();
        cache
            .store_at("ds1", &DatasetSnapshot::empty(), 2_000)
            .await
            .unwrap();

        assert_eq!(cache.list_keys("ds1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_missing_root_is_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("never-created"), 4);

        let lookup = cache.find_fresh("ds1", 0).await.unwrap();
        assert!(!lookup.is_hit());
    }

    #[tokio::test]
    async fn test_freshness_monotonicity() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), 4);

        cache
            .store_at("ds1", &snapshot_with_marker("t1"), 1_000)
            .await
            .unwrap();
        cache
            .store_at("ds1", &snapshot_with_marker("t2"), 2_000)
            .await
            .unwrap();

        // both captures are at or before the remote marker
        assert!(!cache.find_fresh("ds1", 2_000).await.unwrap().is_hit());

        cache
            .store_at("ds1", &snapshot_with_marker("t3"), 3_000)
            .await
            .unwrap();

        match cache.find_fresh("ds1", 2_000).await.unwrap() {
            Lookup::Hit(snapshot) => {
                assert_eq!(snapshot.properties[0]["marker"], serde_json::json!("t3"));
            }
            Lookup::Miss => panic!("expected hit for capture newer than marker"),
        }
    }

    #[tokio::test]
    async fn test_lookup_ignores_other_dataset_ids() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), 4);

        cache
            .store_at("other", &snapshot_with_marker("x"), 9_000)
            .await
            .unwrap();

        assert!(!cache.find_fresh("ds1", 0).await.unwrap().is_hit());
    }

    #[tokio::test]
    async fn test_lookup_skips_corrupted_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), 4);

        tokio::fs::write(dir.path().join("ds1-5000.json"), b"not json")
            .await
            .unwrap();

        assert!(!cache.find_fresh("ds1", 0).await.unwrap().is_hit());
    }
}

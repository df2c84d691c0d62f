//! Dataset provider orchestration.
//!
//! Ties the hub client, the normalizer, and the file cache together into
//! the two operations the route layer consumes. No locking around
//! concurrent refreshes of the same dataset: two simultaneous misses both
//! derive and both write, under distinct millisecond keys. Duplicate work,
//! not corruption.

use crate::hub::{DatasetMetadata, HubClient, HubConfig};
use crate::normalize;
use geoprov_core::{AppConfig, DatasetSnapshot, Error, FileCache, Lookup};

/// Facade over the fetch-normalize-cache pipeline.
#[derive(Debug, Clone)]
pub struct DatasetProvider {
    hub: HubClient,
    cache: FileCache,
}

impl DatasetProvider {
    pub fn new(hub: HubClient, cache: FileCache) -> Self {
        Self { hub, cache }
    }

    /// Build the provider from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let hub = HubClient::new(HubConfig::from(config))?;
        let cache = FileCache::new(config.storage_root.clone(), config.retention_weeks);
        Ok(Self::new(hub, cache))
    }

    /// Get reference to the underlying cache (sweep scheduling).
    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Serve a dataset from cache while still fresh, re-deriving otherwise.
    ///
    /// The freshness marker is fetched on every call; a marker failure
    /// propagates as `RemoteUnavailable` rather than serving stale data.
    /// On a miss the raw features are fetched, normalized, and stored
    /// before returning. Retry policy is left to the caller.
    pub async fn get_or_refresh(&self, dataset_id: &str) -> Result<DatasetSnapshot, Error> {
        let marker = self.hub.item_modified(dataset_id).await?;

        if let Lookup::Hit(snapshot) = self.cache.find_fresh(dataset_id, marker).await? {
            return Ok(snapshot);
        }

        tracing::info!(dataset_id, "cache miss, deriving snapshot from source");
        let source = self.hub.fetch_features(dataset_id).await?;
        let snapshot = normalize::normalize(&source);
        self.cache.store(dataset_id, &snapshot).await?;

        Ok(snapshot)
    }

    /// List catalog datasets matching `query`, in hub order.
    pub async fn list_datasets(&self, query: &str) -> Result<Vec<DatasetMetadata>, Error> {
        self.hub.search_datasets(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig { storage_root: dir.path().to_path_buf(), ..Default::default() };

        let provider = DatasetProvider::from_config(&config).unwrap();
        assert_eq!(provider.cache().root(), dir.path());
    }
}

//! Snapshot data model and cache key naming.
//!
//! A [`DatasetSnapshot`] is the persisted artifact for one dataset at one
//! point in time: three collections derived from the same source rows and
//! aligned by a positional string id. The capture timestamp lives in the
//! storage key only, never in the payload body.

use geojson::{FeatureCollection, JsonObject};
use serde::{Deserialize, Serialize};

/// Normalized, persisted form of one dataset.
///
/// The wire field for `properties` is `data`, matching the response body the
/// visualization frontend consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    /// One flat record per included source row: `id` plus every non-geometry
    /// attribute, nulls replaced with `"UNDEFINED"`.
    #[serde(rename = "data")]
    pub properties: Vec<JsonObject>,

    /// Geometry-only features carrying `id` and a top-level `name` member.
    pub geometry: FeatureCollection,

    /// Point features for the equal-area centroids, coordinates `[y, x]`.
    pub centroids: FeatureCollection,
}

impl DatasetSnapshot {
    /// Snapshot with three empty collections (empty source input).
    pub fn empty() -> Self {
        Self {
            properties: Vec::new(),
            geometry: empty_collection(),
            centroids: empty_collection(),
        }
    }
}

fn empty_collection() -> FeatureCollection {
    FeatureCollection { bbox: None, features: Vec::new(), foreign_members: None }
}

/// Storage key for one snapshot: `(dataset_id, capture timestamp)`.
///
/// Encoded in the file name as `{dataset_id}-{captured_at_millis}.json`,
/// which keeps the store prefix-listable by dataset id and the timestamp
/// parseable from the suffix. Uniqueness comes from millisecond granularity,
/// not locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub dataset_id: String,
    pub captured_at_millis: i64,
}

impl CacheKey {
    pub fn new(dataset_id: impl Into<String>, captured_at_millis: i64) -> Self {
        Self { dataset_id: dataset_id.into(), captured_at_millis }
    }

    /// File name this key maps to.
    pub fn file_name(&self) -> String {
        format!("{}-{}.json", self.dataset_id, self.captured_at_millis)
    }

    /// Parse a file name back into a key.
    ///
    /// Returns `None` for anything that does not match
    /// `{dataset_id}-{millis}.json`. Dataset ids may themselves contain
    /// hyphens, so the timestamp is taken from the last hyphen only.
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".json")?;
        let (dataset_id, ts) = stem.rsplit_once('-')?;
        if dataset_id.is_empty() {
            return None;
        }
        let captured_at_millis: i64 = ts.parse().ok()?;
        Some(Self { dataset_id: dataset_id.to_string(), captured_at_millis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_file_name_round_trip() {
        let key = CacheKey::new("abc123_0", 1_700_000_000_000);
        let parsed = CacheKey::parse(&key.file_name()).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_key_parse_hyphenated_dataset_id() {
        let parsed = CacheKey::parse("maps-hub-dataset-1700000000000.json").unwrap();
        assert_eq!(parsed.dataset_id, "maps-hub-dataset");
        assert_eq!(parsed.captured_at_millis, 1_700_000_000_000);
    }

    #[test]
    fn test_key_parse_rejects_foreign_files() {
        assert!(CacheKey::parse("README.md").is_none());
        assert!(CacheKey::parse("abc123.json").is_none());
        assert!(CacheKey::parse("abc123-notatimestamp.json").is_none());
        assert!(CacheKey::parse("-1700000000000.json").is_none());
    }

    #[test]
    fn test_snapshot_body_has_no_timestamp() {
        let snapshot = DatasetSnapshot::empty();
        let body = serde_json::to_value(&snapshot).unwrap();
        let body = body.as_object().unwrap();
        assert_eq!(body.len(), 3);
        assert!(body.contains_key("data"));
        assert!(body.contains_key("geometry"));
        assert!(body.contains_key("centroids"));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let snapshot = DatasetSnapshot::empty();
        let body = serde_json::to_string(&snapshot).unwrap();
        let back: DatasetSnapshot = serde_json::from_str(&body).unwrap();
        assert!(back.properties.is_empty());
        assert!(back.geometry.features.is_empty());
        assert!(back.centroids.features.is_empty());
    }
}

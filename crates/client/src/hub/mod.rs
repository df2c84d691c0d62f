//! ArcGIS Hub catalog client.
//!
//! Three read-only calls against the hub domain:
//!
//! - **Freshness marker**: the `itemModified` timestamp for one dataset.
//!   Any failure here is `RemoteUnavailable`; the cache never falls back to
//!   a stale snapshot when the marker cannot be read.
//! - **Raw features**: the full GeoJSON feature collection for one dataset.
//! - **Catalog search**: filtered dataset search, normalized into a stable
//!   [`DatasetMetadata`] shape.

pub mod response;

pub use response::{DatasetMetadata, FieldInfo};

use geojson::FeatureCollection;
use geoprov_core::{AppConfig, Error};
use std::time::Duration;
use url::Url;

/// Default hub domain.
const DEFAULT_DOMAIN: &str = "https://hub.arcgis.com";

/// Default path prefix for remote item metadata.
const DEFAULT_ITEM_PATH: &str = "https://www.arcgis.com/sharing/rest/content/items";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "geoprov/0.1";

/// Search page size requested from the hub.
const SEARCH_PAGE_SIZE: &str = "50";

/// Dataset fields requested from the catalog search.
const SEARCH_FIELDS: &str = "id,itemId,name,fields,thumbnail,structuredLicense,tags,recordCount,searchDescription,source,owner";

/// Hub client configuration.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Base domain of the hub (no trailing slash).
    pub domain: String,
    /// Path prefix for item metadata such as thumbnails.
    pub item_path: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            item_path: DEFAULT_ITEM_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for HubConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            domain: config.hub_domain.clone(),
            item_path: config.item_path.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// HTTP client for the ArcGIS Hub catalog.
#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::Client,
    config: HubConfig,
}

impl HubClient {
    /// Create a new hub client with the given configuration.
    pub fn new(config: HubConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .gzip(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::RemoteUnavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Fetch the last-modified marker for a dataset, in epoch milliseconds.
    ///
    /// Fetched on every lookup and never persisted. Network errors, non-2xx
    /// responses, and unparseable bodies all surface as `RemoteUnavailable`.
    pub async fn item_modified(&self, dataset_id: &str) -> Result<i64, Error> {
        let url = Url::parse_with_params(
            &format!("{}/api/v3/datasets/{}/", self.config.domain, dataset_id),
            [("fields[datasets]", "itemModified")],
        )
        .map_err(|e| Error::RemoteUnavailable(format!("marker url: {e}")))?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("marker fetch: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteUnavailable(format!("marker fetch status {}", status.as_u16())));
        }

        let body: response::ItemModifiedResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("marker response: {e}")))?;

        tracing::debug!(dataset_id, item_modified = body.data.attributes.item_modified, "fetched freshness marker");
        Ok(body.data.attributes.item_modified)
    }

    /// Fetch the raw GeoJSON feature collection for a dataset.
    ///
    /// A non-success status surfaces as `SourceFetchFailed` carrying the
    /// upstream status; an unusable payload as `MalformedSource`.
    pub async fn fetch_features(&self, dataset_id: &str) -> Result<FeatureCollection, Error> {
        let url = format!("{}/datasets/{}.geojson", self.config.domain, dataset_id);

        let response = self.http.get(&url).send().await.map_err(|e| match e.status() {
            Some(status) => Error::SourceFetchFailed { status: status.as_u16() },
            None => Error::RemoteUnavailable(format!("feature fetch: {e}")),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SourceFetchFailed { status: status.as_u16() });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("feature body: {e}")))?;

        let collection: FeatureCollection = serde_json::from_slice(&bytes)
            .map_err(|e| Error::MalformedSource(format!("feature collection: {e}")))?;

        tracing::debug!(dataset_id, features = collection.features.len(), "fetched source features");
        Ok(collection)
    }

    /// Search the catalog for geospatial datasets matching `query`.
    ///
    /// Restricted to open-data feature layers with at least one record, page
    /// size 50, ordered as the hub returns them.
    pub async fn search_datasets(&self, query: &str) -> Result<Vec<DatasetMetadata>, Error> {
        let url = Url::parse_with_params(
            &format!("{}/api/v3/datasets/", self.config.domain),
            [
                ("q", query),
                ("page[size]", SEARCH_PAGE_SIZE),
                ("fields[datasets]", SEARCH_FIELDS),
                ("filter[openData]", "true"),
                ("filter[type]", "any(feature layer)"),
                ("filter[recordCount]", "gt(0)"),
            ],
        )
        .map_err(|e| Error::RemoteUnavailable(format!("search url: {e}")))?;

        tracing::debug!(query, "searching hub catalog");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("catalog search: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // convey the upstream status to the caller
            return Err(Error::SourceFetchFailed { status: status.as_u16() });
        }

        let body: response::HubSearchResponse = response
            .json()
            .await
            .map_err(|e| Error::MalformedSource(format!("search response: {e}")))?;

        let datasets = body
            .data
            .into_iter()
            .map(|d| d.attributes.into_metadata(&self.config.domain, &self.config.item_path))
            .collect::<Vec<_>>();

        tracing::debug!(query, results = datasets.len(), "catalog search complete");
        Ok(datasets)
    }
}

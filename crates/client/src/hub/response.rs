//! Hub API response types and normalization.

use serde::{Deserialize, Serialize};

/// Raw response from the dataset metadata endpoint
/// (`fields[datasets]=itemModified`).
#[derive(Debug, Deserialize)]
pub struct ItemModifiedResponse {
    pub data: ItemModifiedData,
}

#[derive(Debug, Deserialize)]
pub struct ItemModifiedData {
    pub attributes: ItemModifiedAttributes,
}

#[derive(Debug, Deserialize)]
pub struct ItemModifiedAttributes {
    /// Last modification time, epoch milliseconds.
    #[serde(alias = "itemModified")]
    pub item_modified: i64,
}

/// Raw response from the catalog search endpoint.
#[derive(Debug, Deserialize)]
pub struct HubSearchResponse {
    #[serde(default)]
    pub data: Vec<HubDataset>,
}

/// One dataset entry from the catalog search.
#[derive(Debug, Deserialize)]
pub struct HubDataset {
    pub attributes: HubDatasetAttributes,
}

/// Dataset attributes as returned by the hub, restricted to the requested
/// field list. Anything else the catalog sends is ignored.
#[derive(Debug, Deserialize)]
pub struct HubDatasetAttributes {
    pub id: String,
    #[serde(alias = "itemId")]
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(alias = "structuredLicense", default)]
    pub structured_license: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "recordCount", default)]
    pub record_count: Option<i64>,
    #[serde(alias = "searchDescription", default)]
    pub search_description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// Dataset column description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInfo {
    #[serde(rename = "sqlType", default)]
    pub sql_type: Option<String>,
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub editable: Option<bool>,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(rename = "defaultValue", default)]
    pub default_value: Option<serde_json::Value>,
    #[serde(default)]
    pub domain: Option<serde_json::Value>,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
}

/// Normalized dataset description served to the route layer.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetMetadata {
    pub id: String,
    pub name: String,
    /// `"{source} | {owner}"`, or the owner alone when the hub reports no
    /// source organization.
    pub publisher: String,
    pub description: Option<String>,
    pub fields: Vec<FieldInfo>,
    /// Absolute thumbnail URL under the item metadata prefix.
    pub thumbnail: Option<String>,
    #[serde(rename = "structuredLicense")]
    pub structured_license: Option<serde_json::Value>,
    pub tags: Vec<String>,
    #[serde(rename = "recordCount")]
    pub record_count: Option<i64>,
    /// Documentation page for the dataset on the hub.
    pub url: String,
    /// Path of the dataset endpoint on this server.
    pub data: String,
}

impl HubDatasetAttributes {
    /// Convert raw hub attributes into the normalized metadata shape.
    pub fn into_metadata(self, domain: &str, item_path: &str) -> DatasetMetadata {
        let owner = self.owner.unwrap_or_default();
        let publisher = match self.source {
            Some(source) if !source.is_empty() => format!("{source} | {owner}"),
            _ => owner,
        };

        DatasetMetadata {
            url: format!("{domain}/datasets/{}/about", self.id),
            data: format!("/datasets/{}", self.id),
            thumbnail: self
                .thumbnail
                .map(|t| format!("{item_path}/{}/info/{t}", self.item_id)),
            id: self.id,
            name: self.name,
            publisher,
            description: self.search_description,
            fields: self.fields,
            structured_license: self.structured_license,
            tags: self.tags,
            record_count: self.record_count,
        }
    }
}

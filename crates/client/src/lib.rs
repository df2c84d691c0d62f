//! Client code for geoprov.
//!
//! This crate provides the ArcGIS Hub HTTP client, the dataset normalizer,
//! and the provider orchestration consumed by the server.

pub mod hub;
pub mod normalize;
pub mod provider;

pub use hub::{DatasetMetadata, FieldInfo, HubClient, HubConfig};
pub use normalize::normalize;
pub use provider::DatasetProvider;

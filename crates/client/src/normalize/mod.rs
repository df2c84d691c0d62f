//! Dataset normalizer.
//!
//! Turns a raw source feature collection into the three aligned collections
//! of a [`DatasetSnapshot`]: geometry-only features, centroid points, and
//! flat attribute records. All three share a positional string id assigned
//! from the source row index; source-provided identifiers are ignored so
//! that ids stay stable within one derivation pass.
//!
//! Inclusion is all-or-nothing per row: a row missing its geometry, or whose
//! centroid cannot be computed, is absent from every output collection.

pub mod projection;

use geo::{Centroid, MapCoords, Point};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use geoprov_core::DatasetSnapshot;

/// Substrings that mark an attribute column as a display name. Lowercased
/// comparison; covers the Czech localized variants seen on the hub.
const NAME_HINTS: [&str; 3] = ["name", "nazev", "název"];

/// Sentinel written in place of null or missing attribute values.
const NULL_SENTINEL: &str = "UNDEFINED";

/// Derive the three aligned collections from raw source features.
///
/// An empty source yields three empty collections. The derivation is pure:
/// the same input in the same row order produces identical output.
pub fn normalize(source: &FeatureCollection) -> DatasetSnapshot {
    let columns = attribute_columns(&source.features);
    let name_column = columns.iter().find(|c| is_name_column(c)).cloned();

    let mut snapshot = DatasetSnapshot::empty();

    for (idx, feature) in source.features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            tracing::debug!(row = idx, "skipping row without geometry");
            continue;
        };
        let Some(centroid) = equal_area_centroid(geometry) else {
            tracing::warn!(row = idx, "skipping row without computable centroid");
            continue;
        };

        let id = idx.to_string();
        let attrs = filled_attributes(feature, &columns);

        let name_of = |fallback: String| -> JsonValue {
            match &name_column {
                Some(column) => attrs[column.as_str()].clone(),
                None => JsonValue::String(fallback),
            }
        };

        let mut geometry_members = JsonObject::new();
        geometry_members.insert("name".to_string(), name_of(format!("Polygon {idx}")));
        snapshot.geometry.features.push(Feature {
            bbox: None,
            geometry: Some(geometry.clone()),
            id: Some(Id::String(id.clone())),
            properties: None,
            foreign_members: Some(geometry_members),
        });

        let mut centroid_props = JsonObject::new();
        centroid_props.insert("name".to_string(), name_of(format!("Centroid {idx}")));
        snapshot.centroids.features.push(Feature {
            bbox: None,
            // axis order is [y, x] on purpose: the consuming visualization
            // library expects latitude first
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                centroid.y(),
                centroid.x(),
            ]))),
            id: Some(Id::String(id.clone())),
            properties: Some(centroid_props),
            foreign_members: None,
        });

        let mut record = attrs;
        record.insert("id".to_string(), JsonValue::String(id));
        snapshot.properties.push(record);
    }

    snapshot
}

/// Union of attribute keys across all features, in first-seen order.
fn attribute_columns(features: &[Feature]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for feature in features {
        let Some(props) = &feature.properties else { continue };
        for key in props.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn is_name_column(column: &str) -> bool {
    let lower = column.to_lowercase();
    NAME_HINTS.iter().any(|hint| lower.contains(hint))
}

/// One row's attributes over the full column union, nulls and missing
/// values replaced with the sentinel.
fn filled_attributes(feature: &Feature, columns: &[String]) -> JsonObject {
    let mut attrs = JsonObject::new();
    for column in columns {
        let value = feature
            .properties
            .as_ref()
            .and_then(|p| p.get(column))
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| JsonValue::String(NULL_SENTINEL.to_string()));
        attrs.insert(column.clone(), value);
    }
    attrs
}

/// Centroid in source coordinates, computed on the equal-area plane.
///
/// Returns `None` when the geometry cannot be interpreted or has no
/// centroid (e.g. an empty geometry collection); the caller drops the row.
fn equal_area_centroid(geometry: &geojson::Geometry) -> Option<Point<f64>> {
    let geom = geo::Geometry::<f64>::try_from(&geometry.value).ok()?;
    let projected = geom.map_coords(projection::forward);
    let centroid = projected.centroid()?;
    Some(centroid.map_coords(projection::inverse))
}

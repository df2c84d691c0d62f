//! Route handlers for the dataset provider API.

use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use geoprov_client::{DatasetMetadata, DatasetProvider};
use geoprov_core::DatasetSnapshot;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::error::ApiError;

/// One entry of the route listing served at `/`.
#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    pub path: &'static str,
    pub name: &'static str,
}

const ROUTES: [RouteInfo; 3] = [
    RouteInfo { path: "/", name: "available_routes" },
    RouteInfo { path: "/datasets", name: "dataset_list" },
    RouteInfo { path: "/datasets/{dataset_id}", name: "dataset" },
];

/// Build the application router with permissive CORS for local frontends.
pub fn router(provider: DatasetProvider) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/", get(available_routes))
        .route("/datasets", get(dataset_list))
        .route("/datasets/{dataset_id}", get(dataset))
        .layer(cors)
        .with_state(provider)
}

/// `GET /` — list all available routes.
async fn available_routes() -> Json<Vec<RouteInfo>> {
    Json(ROUTES.to_vec())
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
}

/// `GET /datasets?q=` — search the hub catalog.
async fn dataset_list(
    State(provider): State<DatasetProvider>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<DatasetMetadata>>, ApiError> {
    Ok(Json(provider.list_datasets(&params.q).await?))
}

/// `GET /datasets/{dataset_id}` — cached-or-derived normalized dataset.
async fn dataset(
    State(provider): State<DatasetProvider>,
    Path(dataset_id): Path<String>,
) -> Result<Json<DatasetSnapshot>, ApiError> {
    Ok(Json(provider.get_or_refresh(&dataset_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_route_listing() {
        let Json(routes) = available_routes().await;
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].path, "/");
        assert_eq!(routes[2].name, "dataset");
    }

    #[test]
    fn test_router_builds() {
        let dir = tempfile::tempdir().unwrap();
        let config = geoprov_core::AppConfig {
            storage_root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let provider = DatasetProvider::from_config(&config).unwrap();
        let _router = router(provider);
    }
}

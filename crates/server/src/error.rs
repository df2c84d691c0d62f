//! HTTP mapping for provider errors.
//!
//! Upstream fetch failures convey the source's status code; everything else
//! maps to a gateway or internal error. A cache miss never reaches this
//! layer, it is handled inside the provider.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geoprov_core::Error;
use serde::Serialize;

/// Error response payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Wrapper giving provider errors an HTTP response shape.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            Error::RemoteUnavailable(_) | Error::MalformedSource(_) => StatusCode::BAD_GATEWAY,
            Error::SourceFetchFailed { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Storage(_) | Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = %status, error = %self.0, "request failed");
        (status, Json(ErrorBody { detail: self.0.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_unavailable_is_bad_gateway() {
        let err = ApiError(Error::RemoteUnavailable("marker fetch: timeout".into()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_source_fetch_conveys_upstream_status() {
        let err = ApiError(Error::SourceFetchFailed { status: 404 });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bogus_upstream_status_falls_back() {
        let err = ApiError(Error::SourceFetchFailed { status: 42 });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_storage_failure_is_internal() {
        let err = ApiError(Error::Storage(std::io::Error::other("disk full")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

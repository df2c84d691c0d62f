//! Unified error types for geoprov.
//!
//! A cache miss is deliberately not part of this enum: it is an expected
//! outcome, modeled as [`crate::cache::Lookup::Miss`].

/// Unified error types for the geoprov provider core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The freshness-marker fetch failed (network error or malformed
    /// response). Never downgraded to a stale-cache hit.
    #[error("REMOTE_UNAVAILABLE: {0}")]
    RemoteUnavailable(String),

    /// The raw feature fetch returned a non-success status.
    #[error("SOURCE_FETCH_FAILED: upstream status {status}")]
    SourceFetchFailed { status: u16 },

    /// Source payload does not have the expected geometry/attribute shape.
    #[error("MALFORMED_SOURCE: {0}")]
    MalformedSource(String),

    /// Cache read, write, or sweep-delete failed.
    #[error("STORAGE_IO: {0}")]
    Storage(#[from] std::io::Error),

    /// Snapshot body could not be serialized or deserialized.
    #[error("STORAGE_IO: snapshot encoding: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RemoteUnavailable("connection refused".to_string());
        assert!(err.to_string().contains("REMOTE_UNAVAILABLE"));
        assert!(err.to_string().contains("connection refused"));

        let err = Error::SourceFetchFailed { status: 404 };
        assert!(err.to_string().contains("404"));
    }
}

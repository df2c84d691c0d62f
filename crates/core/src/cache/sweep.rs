//! Age-based retention sweep.
//!
//! Snapshots are write-once, so the capture timestamp in the file name is
//! the storage-creation time; the sweep ages entries by it rather than by
//! filesystem metadata. The sweep runs across all dataset ids and is a
//! storage-growth bound only — correctness comes from the remote-marker
//! comparison in `find_fresh`.

use super::FileCache;
use crate::snapshot::CacheKey;
use crate::Error;

/// Per-run sweep accounting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries deleted.
    pub removed: u64,
    /// Entries that should have been deleted but could not be; each failure
    /// is logged and the sweep continues.
    pub failed: u64,
}

impl FileCache {
    /// Delete every snapshot older than the retention window.
    ///
    /// Files that do not parse as cache keys are left alone. A single failed
    /// delete never aborts the rest of the sweep.
    pub async fn sweep(&self) -> Result<SweepReport, Error> {
        let threshold = chrono::Utc::now().timestamp_millis() - self.retention().num_milliseconds();
        let mut report = SweepReport::default();

        let mut entries = match tokio::fs::read_dir(self.root()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(report),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(key) = CacheKey::parse(name) else { continue };
            if key.captured_at_millis >= threshold {
                continue;
            }

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => {
                    tracing::debug!(file = name, "swept expired snapshot");
                    report.removed += 1;
                }
                Err(e) => {
                    tracing::warn!(file = name, error = %e, "failed to sweep snapshot");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(removed = report.removed, failed = report.failed, "retention sweep complete");
        Ok(report)
    }
}

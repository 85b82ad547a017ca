use splynx_core::FetchError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a report run.
///
/// Single-task fetch failures and a missing location table are recovered
/// inside the pipeline and only show up in [`crate::RunStats`].
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("fetching {what} failed: {source}")]
    BulkFetch {
        what: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

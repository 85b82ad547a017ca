//! Report file placement and persistence.
//!
//! Writes are create-or-truncate: a rerun replaces the previous file at the
//! same path byte for byte. Names that sanitize to the same segment share a
//! path, so the last one written wins.

use chrono::NaiveDate;
use splynx_core::time::date_label;
use splynx_core::{sanitize, TECHNICIAN_MAX_LEN, TITLE_MAX_LEN};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;

/// `<root>/<YYYY-MM-DD>/<technician>/<title>.txt`
pub fn digest_path(root: &Path, date: NaiveDate, technician: &str, title: &str) -> PathBuf {
    root.join(date_label(date))
        .join(sanitize(technician, TITLE_MAX_LEN))
        .join(format!("{}.txt", sanitize(title, TITLE_MAX_LEN)))
}

/// `<root>/<technician>/tareas_<YYYY-MM-DD>.txt`
pub fn summary_path(root: &Path, date: NaiveDate, technician: &str) -> PathBuf {
    root.join(sanitize(technician, TECHNICIAN_MAX_LEN))
        .join(format!("tareas_{}.txt", date_label(date)))
}

/// Create missing parent directories, then write `text` as UTF-8.
pub fn write_report(path: &Path, text: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ReportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

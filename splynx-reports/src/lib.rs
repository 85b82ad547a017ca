//! splynx-reports: report writer and pipeline driver for the comment
//! digest and the calendar summary.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use config::ReportConfig;
pub use error::ReportError;
pub use pipeline::{Pipeline, RunStats};
pub use writer::{digest_path, summary_path, write_report};

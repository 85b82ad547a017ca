//! The ticketing backend as seen by the report pipelines.

use serde::Deserialize;
use std::future::Future;
use thiserror::Error;

use crate::task::{Comment, Task, de};

/// Scheduling project (`id` → `title`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "de::text")]
    pub title: Option<String>,
}

/// Scheduling location (`id` → `name`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
}

/// Transport-level cause, whatever the client library reports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failed call to the backend.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("GET {endpoint}: HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("GET {endpoint}: invalid response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only access to the scheduling backend.
///
/// Every listing is complete and unfiltered; the pipelines filter
/// client-side. Calls are awaited one at a time.
pub trait TicketSource {
    /// All task comments.
    fn list_comments(&self) -> impl Future<Output = Result<Vec<Comment>, FetchError>>;

    /// One task by id.
    fn get_task(&self, id: u64) -> impl Future<Output = Result<Task, FetchError>>;

    /// All scheduling tasks.
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>, FetchError>>;

    fn list_projects(&self) -> impl Future<Output = Result<Vec<Project>, FetchError>>;

    fn list_locations(&self) -> impl Future<Output = Result<Vec<Location>, FetchError>>;
}

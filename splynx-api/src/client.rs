//! HTTP transport for the Splynx REST API (v2.0).

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use splynx_core::{Comment, FetchError, Location, Project, Task, TicketSource};
use std::time::Duration;
use tracing::debug;

use crate::envelope;

/// Timeout for full listings.
pub const BULK_TIMEOUT: Duration = Duration::from_secs(60);
/// Timeout for single-record fetches.
pub const RECORD_TIMEOUT: Duration = Duration::from_secs(30);

const COMMENTS: &str = "admin/scheduling/tasks-comments";
const TASKS: &str = "admin/scheduling/tasks";
const PROJECTS: &str = "admin/scheduling/projects";
const LOCATIONS: &str = "admin/scheduling/locations";

/// API key credentials, sent as HTTP Basic auth.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone)]
pub struct SplynxClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl SplynxClient {
    /// `base_url` is the API root, e.g. `https://splynx.example.com/api/2.0`.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, timeout: Duration) -> Result<T, FetchError> {
        let url = self.url(path);
        debug!(%url, ?timeout, "GET");

        let transport = |e: reqwest::Error| FetchError::Transport {
            endpoint: path.to_string(),
            source: Box::new(e),
        };

        let resp = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .timeout(timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        decode_body(path, &body)
    }
}

fn decode_body<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, FetchError> {
    envelope::decode(body).map_err(|source| FetchError::Decode {
        endpoint: path.to_string(),
        source,
    })
}

impl TicketSource for SplynxClient {
    async fn list_comments(&self) -> Result<Vec<Comment>, FetchError> {
        self.get_json(COMMENTS, BULK_TIMEOUT).await
    }

    async fn get_task(&self, id: u64) -> Result<Task, FetchError> {
        self.get_json(&format!("{TASKS}/{id}"), RECORD_TIMEOUT).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, FetchError> {
        self.get_json(TASKS, BULK_TIMEOUT).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, FetchError> {
        self.get_json(PROJECTS, BULK_TIMEOUT).await
    }

    async fn list_locations(&self) -> Result<Vec<Location>, FetchError> {
        self.get_json(LOCATIONS, BULK_TIMEOUT).await
    }
}

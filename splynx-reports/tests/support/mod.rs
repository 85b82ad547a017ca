//! In-memory ticket source for pipeline tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use splynx_core::{Comment, FetchError, Location, Project, Task, TicketSource};
use std::cell::Cell;
use std::collections::HashSet;

#[derive(Default)]
pub struct FakeSource {
    pub comments: Vec<Comment>,
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub locations: Vec<Location>,

    pub failing_tasks: HashSet<u64>,
    pub fail_comments: bool,
    pub fail_tasks: bool,
    pub fail_projects: bool,
    pub fail_locations: bool,

    pub task_fetches: Cell<usize>,
}

fn unavailable(endpoint: &str) -> FetchError {
    FetchError::Status {
        endpoint: endpoint.to_string(),
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}

impl TicketSource for FakeSource {
    async fn list_comments(&self) -> Result<Vec<Comment>, FetchError> {
        if self.fail_comments {
            return Err(unavailable("admin/scheduling/tasks-comments"));
        }
        Ok(self.comments.clone())
    }

    async fn get_task(&self, id: u64) -> Result<Task, FetchError> {
        self.task_fetches.set(self.task_fetches.get() + 1);
        if self.failing_tasks.contains(&id) {
            return Err(unavailable(&format!("admin/scheduling/tasks/{id}")));
        }
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                endpoint: format!("admin/scheduling/tasks/{id}"),
                status: 404,
                body: "Not Found".to_string(),
            })
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, FetchError> {
        if self.fail_tasks {
            return Err(unavailable("admin/scheduling/tasks"));
        }
        Ok(self.tasks.clone())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, FetchError> {
        if self.fail_projects {
            return Err(unavailable("admin/scheduling/projects"));
        }
        Ok(self.projects.clone())
    }

    async fn list_locations(&self) -> Result<Vec<Location>, FetchError> {
        if self.fail_locations {
            return Err(unavailable("admin/scheduling/locations"));
        }
        Ok(self.locations.clone())
    }
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Every file under `root`, relative to it, sorted.
pub fn files_under(root: &std::path::Path) -> Vec<String> {
    fn walk(dir: &std::path::Path, root: &std::path::Path, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

//! Display-name resolution with ordered fallbacks.
//!
//! Every resolver returns a non-empty string; missing data degrades to a
//! synthesized label, never to an error.

use std::collections::{BTreeMap, HashMap};

use crate::source::{Location, Project};
use crate::task::{Comment, Task};

pub const NO_TECHNICIAN: &str = "Sin_tecnico";
pub const UNASSIGNED: &str = "SIN_ASIGNAR";
pub const NO_LOCATION: &str = "Sin ubicación";
pub const NO_PROJECT: &str = "Sin proyecto";

/// Static assignee id → technician name table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechnicianTable {
    names: BTreeMap<u64, String>,
}

impl TechnicianTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn get(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Technician for an assignee id; unknown ids render as `user_id=<id>`.
    pub fn name_for(&self, id: u64) -> String {
        self.get(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("user_id={id}"))
    }
}

impl<S: Into<String>> FromIterator<(u64, S)> for TechnicianTable {
    fn from_iter<I: IntoIterator<Item = (u64, S)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(id, n)| (id, n.into())).collect(),
        }
    }
}

/// Id → display name lookup fetched once per run (projects, locations).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLookup {
    names: HashMap<u64, String>,
}

impl NameLookup {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_projects(projects: &[Project]) -> Self {
        projects
            .iter()
            .map(|p| {
                let name = p.title.clone().unwrap_or_else(|| format!("Proyecto_{}", p.id));
                (p.id, name)
            })
            .collect()
    }

    pub fn from_locations(locations: &[Location]) -> Self {
        locations
            .iter()
            .map(|l| {
                let name = l.name.clone().unwrap_or_else(|| format!("location_{}", l.id));
                (l.id, name)
            })
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(u64, String)> for NameLookup {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Technician named on the task itself, if any.
pub fn task_technician(task: &Task) -> Option<&str> {
    task.technician_name
        .as_deref()
        .or(task.employee_name.as_deref())
        .or(task.user_name.as_deref())
        .or_else(|| task.employee.as_ref().and_then(|e| e.name.as_deref()))
}

/// Technician for the comment digest.
///
/// Task metadata first, then the author of the earliest comment, then
/// [`NO_TECHNICIAN`].
pub fn technician_name(task: &Task, comments: &[Comment]) -> String {
    if let Some(name) = task_technician(task) {
        return name.to_string();
    }

    comments
        .iter()
        .min_by(|a, b| a.created_at.cmp(&b.created_at))
        .and_then(|c| c.admin_name.as_deref())
        .unwrap_or(NO_TECHNICIAN)
        .to_string()
}

/// Technician for the calendar summary, from the assignee table.
///
/// Returns `None` when the task is unassigned and unassigned tasks are
/// excluded.
pub fn assignee_technician(
    task: &Task,
    table: &TechnicianTable,
    include_unassigned: bool,
) -> Option<String> {
    match task.assignee {
        Some(id) => Some(table.name_for(id)),
        None if include_unassigned => Some(UNASSIGNED.to_string()),
        None => None,
    }
}

/// Title used by the comment digest: `title`, `name`, `subject`, `Tarea_<id>`.
pub fn digest_title(task: &Task) -> String {
    task.title
        .as_deref()
        .or(task.name.as_deref())
        .or(task.subject.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Tarea_{}", task.id))
}

/// Title used by the calendar summary: `title`, `name`, `Tarea <id>`.
pub fn summary_title(task: &Task) -> String {
    task.title
        .as_deref()
        .or(task.name.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Tarea {}", task.id))
}

/// Customer shown on the digest, when one is known.
pub fn customer_name(task: &Task) -> Option<&str> {
    task.customer_name
        .as_deref()
        .or_else(|| task.customer.as_ref().and_then(|c| c.name.as_deref()))
}

pub fn project_name(task: &Task, projects: &NameLookup) -> String {
    match task.project_id {
        Some(id) => projects
            .get(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Proyecto_{id}")),
        None => NO_PROJECT.to_string(),
    }
}

/// Location: lookup by id, then the literal address, then `location_id=<id>`.
///
/// A location id of `0` is Splynx for "none".
pub fn location_name(task: &Task, locations: &NameLookup) -> String {
    let id = task.location_id.filter(|id| *id != 0);

    if let Some(name) = id.and_then(|id| locations.get(id)) {
        return name.to_string();
    }
    if let Some(address) = task.address.as_deref() {
        return address.to_string();
    }
    match id {
        Some(id) => format!("location_id={id}"),
        None => NO_LOCATION.to_string(),
    }
}

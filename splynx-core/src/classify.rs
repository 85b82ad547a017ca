//! Filtering and bucketing policy for both reports.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::task::{Comment, Task};
use crate::time::is_on_date;

/// Summary bucket a scheduled task lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// "pendientes"
    Pending,
    /// "cerradas"
    Closed,
}

impl Bucket {
    pub fn of(task: &Task) -> Self {
        if task.closed {
            Bucket::Closed
        } else {
            Bucket::Pending
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Bucket::Pending => "PENDIENTES",
            Bucket::Closed => "CERRADAS",
        }
    }
}

/// Comments created on `date`.
pub fn comments_on(comments: Vec<Comment>, date: NaiveDate) -> Vec<Comment> {
    comments
        .into_iter()
        .filter(|c| is_on_date(&c.created_at, date))
        .collect()
}

/// Comments keyed by parent task id, in the order they arrived.
pub fn comments_by_task(comments: Vec<Comment>) -> BTreeMap<u64, Vec<Comment>> {
    let mut out: BTreeMap<u64, Vec<Comment>> = BTreeMap::new();
    for c in comments {
        out.entry(c.task_id).or_default().push(c);
    }
    out
}

/// Whether the digest reports on this task at all.
pub fn is_reportable(task: &Task) -> bool {
    task.closed
}

/// On the calendar for `date`: scheduled flag set and `scheduled_from`
/// on that day. Dated but unscheduled tasks are left out.
pub fn is_scheduled_on(task: &Task, date: NaiveDate) -> bool {
    task.is_scheduled
        && task
            .scheduled_from
            .as_deref()
            .is_some_and(|ts| is_on_date(ts, date))
}

/// Tasks on the calendar for `date`.
pub fn scheduled_on(tasks: Vec<Task>, date: NaiveDate) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|t| is_scheduled_on(t, date))
        .collect()
}

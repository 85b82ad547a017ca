//! Pipeline driver: fetch, classify, group, render, write.
//!
//! Records are processed one at a time; each task is fully fetched,
//! rendered and written before the next one starts.

use chrono::NaiveDate;
use splynx_core::{
    comments_by_task, comments_on, group_summary, is_reportable, render_digest, render_summary,
    scheduled_on, DigestGroup, NameLookup, TicketSource,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::writer::{digest_path, summary_path, write_report};

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records returned by the bulk listing (comments or tasks).
    pub fetched: usize,
    /// Records left after the date/schedule filter.
    pub retained: usize,
    /// Distinct tasks considered for a report.
    pub tasks: usize,
    /// Report groups rendered (one file each).
    pub groups: usize,
    /// Digest only: tasks with comments on the day that are not closed.
    pub skipped_not_closed: usize,
    /// Digest only: tasks whose detail fetch failed.
    pub fetch_failures: usize,
    /// Groups written per technician.
    pub per_technician: BTreeMap<String, usize>,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
}

impl RunStats {
    fn record_file(&mut self, technician: &str, path: PathBuf) {
        self.groups += 1;
        *self.per_technician.entry(technician.to_string()).or_default() += 1;
        self.files.push(path);
    }
}

pub struct Pipeline<'a, S> {
    source: &'a S,
    config: &'a ReportConfig,
    on_write: Option<Box<dyn Fn(&Path) + 'a>>,
}

impl<'a, S: TicketSource> Pipeline<'a, S> {
    pub fn new(source: &'a S, config: &'a ReportConfig) -> Self {
        Self {
            source,
            config,
            on_write: None,
        }
    }

    /// Called with each report path as soon as that file is on disk.
    pub fn on_write(mut self, hook: impl Fn(&Path) + 'a) -> Self {
        self.on_write = Some(Box::new(hook));
        self
    }

    fn written(&self, stats: &mut RunStats, technician: &str, path: PathBuf) {
        if let Some(hook) = &self.on_write {
            hook(&path);
        }
        stats.record_file(technician, path);
    }

    /// Comment digest for `date` (normally yesterday).
    ///
    /// Writes one file per closed task that received comments on `date`.
    /// A failed task fetch is logged and skipped; a failed comment listing
    /// or a write failure aborts the run.
    pub async fn run_digest(&self, date: NaiveDate) -> Result<RunStats, ReportError> {
        let mut stats = RunStats::default();

        let all = self
            .source
            .list_comments()
            .await
            .map_err(|source| ReportError::BulkFetch {
                what: "comments",
                source,
            })?;
        stats.fetched = all.len();

        let on_date = comments_on(all, date);
        stats.retained = on_date.len();
        info!(%date, fetched = stats.fetched, retained = stats.retained, "comments filtered");

        let by_task = comments_by_task(on_date);
        stats.tasks = by_task.len();

        for (task_id, comments) in by_task {
            let task = match self.source.get_task(task_id).await {
                Ok(task) => task,
                Err(e) => {
                    warn!(task_id, error = %e, "task fetch failed; skipping");
                    stats.fetch_failures += 1;
                    continue;
                }
            };

            if !is_reportable(&task) {
                debug!(task_id, comments = comments.len(), "task not closed; skipping");
                stats.skipped_not_closed += 1;
                continue;
            }

            let group = DigestGroup::new(task, comments);
            let path = digest_path(&self.config.digest_root, date, &group.technician, &group.title);
            write_report(&path, &render_digest(&group))?;
            info!(task_id, technician = %group.technician, path = %path.display(), "digest written");
            self.written(&mut stats, &group.technician, path);
        }

        Ok(stats)
    }

    /// Calendar summary for `date` (normally today).
    ///
    /// Writes one file per technician with that day's scheduled tasks split
    /// into pending and closed. The project table and task listing are
    /// required; the location table is optional.
    pub async fn run_summary(&self, date: NaiveDate) -> Result<RunStats, ReportError> {
        let mut stats = RunStats::default();

        let projects = self
            .source
            .list_projects()
            .await
            .map_err(|source| ReportError::BulkFetch {
                what: "projects",
                source,
            })?;
        let projects = NameLookup::from_projects(&projects);

        let locations = match self.source.list_locations().await {
            Ok(locations) => NameLookup::from_locations(&locations),
            Err(e) => {
                warn!(error = %e, "location table unavailable; continuing without it");
                NameLookup::empty()
            }
        };

        let tasks = self
            .source
            .list_tasks()
            .await
            .map_err(|source| ReportError::BulkFetch {
                what: "tasks",
                source,
            })?;
        stats.fetched = tasks.len();

        let scheduled = scheduled_on(tasks, date);
        stats.retained = scheduled.len();
        info!(%date, fetched = stats.fetched, retained = stats.retained, "tasks filtered");

        let groups = group_summary(
            scheduled,
            &self.config.technicians,
            self.config.include_unassigned,
        );
        stats.tasks = groups.iter().map(|g| g.task_count()).sum();

        for group in &groups {
            let path = summary_path(&self.config.summary_root, date, &group.technician);
            write_report(&path, &render_summary(group, date, &projects, &locations))?;
            info!(
                technician = %group.technician,
                pending = group.pending.len(),
                closed = group.closed.len(),
                path = %path.display(),
                "summary written"
            );
            self.written(&mut stats, &group.technician, path);
        }

        Ok(stats)
    }
}

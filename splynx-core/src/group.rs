//! Report groups: the unit each report file is rendered from.

use std::collections::{BTreeMap, HashSet};

use crate::classify::Bucket;
use crate::resolve::{assignee_technician, digest_title, technician_name, TechnicianTable};
use crate::task::{Comment, Task};

/// One closed task and the comments it received on the reference day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestGroup {
    pub technician: String,
    pub title: String,
    pub task: Task,
    /// Ascending by `created_at`.
    pub comments: Vec<Comment>,
}

impl DigestGroup {
    pub fn new(task: Task, mut comments: Vec<Comment>) -> Self {
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let technician = technician_name(&task, &comments);
        let title = digest_title(&task);
        Self {
            technician,
            title,
            task,
            comments,
        }
    }
}

/// One technician's calendar for the day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryGroup {
    pub technician: String,
    pub pending: Vec<Task>,
    pub closed: Vec<Task>,
}

impl SummaryGroup {
    fn new(technician: String) -> Self {
        Self {
            technician,
            ..Self::default()
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Task] {
        match bucket {
            Bucket::Pending => &self.pending,
            Bucket::Closed => &self.closed,
        }
    }

    pub fn task_count(&self) -> usize {
        self.pending.len() + self.closed.len()
    }

    fn push(&mut self, task: Task) {
        match Bucket::of(&task) {
            Bucket::Pending => self.pending.push(task),
            Bucket::Closed => self.closed.push(task),
        }
    }

    fn sort(&mut self) {
        self.pending.sort_by_cached_key(summary_sort_key);
        self.closed.sort_by_cached_key(summary_sort_key);
    }
}

/// Scheduled time (empty first), then lowercased raw title.
fn summary_sort_key(task: &Task) -> (String, String) {
    (
        task.scheduled_from.clone().unwrap_or_default(),
        task.title.as_deref().unwrap_or("").to_lowercase(),
    )
}

/// Group already-filtered tasks per technician and bucket.
///
/// Unassigned tasks are dropped unless `include_unassigned` is set. A task
/// id seen twice is only kept once. Groups come back ordered by technician.
pub fn group_summary(
    tasks: Vec<Task>,
    table: &TechnicianTable,
    include_unassigned: bool,
) -> Vec<SummaryGroup> {
    let mut groups: BTreeMap<String, SummaryGroup> = BTreeMap::new();
    let mut seen = HashSet::new();

    for task in tasks {
        let Some(technician) = assignee_technician(&task, table, include_unassigned) else {
            continue;
        };
        if !seen.insert(task.id) {
            continue;
        }
        groups
            .entry(technician.clone())
            .or_insert_with(|| SummaryGroup::new(technician))
            .push(task);
    }

    groups
        .into_values()
        .map(|mut g| {
            g.sort();
            g
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::UNASSIGNED;

    fn table() -> TechnicianTable {
        [(23, "Antonio Marquez"), (29, "Denis Corzo")].into_iter().collect()
    }

    fn scheduled(id: u64, at: &str, title: &str) -> Task {
        Task::new(id).with_schedule(at).with_title(title)
    }

    #[test]
    fn digest_group_orders_comments_and_resolves_names() {
        let task = Task::new(42).with_title("Instalación Fibra").with_closed(true);
        let group = DigestGroup::new(
            task,
            vec![
                Comment::new(42, "2024-03-05 16:00:00", "Ana", "segundo"),
                Comment::new(42, "2024-03-05 09:00:00", "Luis", "primero"),
            ],
        );
        assert_eq!(group.title, "Instalación Fibra");
        assert_eq!(group.technician, "Luis");
        assert_eq!(group.comments[0].body(), "primero");
        assert_eq!(group.comments[1].body(), "segundo");
    }

    #[test]
    fn every_task_lands_in_exactly_one_bucket() {
        let tasks = vec![
            scheduled(1, "2024-03-05 09:00:00", "a").with_assignee(29),
            scheduled(2, "2024-03-05 10:00:00", "b").with_assignee(29).with_closed(true),
            scheduled(3, "2024-03-05 11:00:00", "c").with_assignee(23),
            scheduled(4, "2024-03-05 12:00:00", "d").with_assignee(23).with_closed(true),
        ];
        let groups = group_summary(tasks.clone(), &table(), false);

        for t in &tasks {
            let hits: usize = groups
                .iter()
                .map(|g| {
                    g.pending.iter().filter(|x| x.id == t.id).count()
                        + g.closed.iter().filter(|x| x.id == t.id).count()
                })
                .sum();
            assert_eq!(hits, 1, "task {} placed {hits} times", t.id);
        }
    }

    #[test]
    fn pending_task_goes_to_pending_for_table_technician() {
        let tasks = vec![scheduled(10, "2024-03-05 09:00:00", "x").with_assignee(29)];
        let groups = group_summary(tasks, &table(), false);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].technician, "Denis Corzo");
        assert_eq!(groups[0].pending.len(), 1);
        assert!(groups[0].closed.is_empty());
    }

    #[test]
    fn unassigned_policy() {
        let tasks = vec![scheduled(1, "2024-03-05 09:00:00", "x")];

        assert!(group_summary(tasks.clone(), &table(), false).is_empty());

        let groups = group_summary(tasks, &table(), true);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].technician, UNASSIGNED);
    }

    #[test]
    fn duplicate_ids_are_kept_once() {
        let t = scheduled(1, "2024-03-05 09:00:00", "x").with_assignee(29);
        let groups = group_summary(vec![t.clone(), t], &table(), false);
        assert_eq!(groups[0].task_count(), 1);
    }

    #[test]
    fn bucket_order_is_time_then_title() {
        let mut untimed = Task::new(5).with_title("zeta").with_assignee(29);
        untimed.is_scheduled = true;
        let tasks = vec![
            scheduled(1, "2024-03-05 10:00:00", "beta").with_assignee(29),
            scheduled(2, "2024-03-05 10:00:00", "Alfa").with_assignee(29),
            scheduled(3, "2024-03-05 08:00:00", "omega").with_assignee(29),
            untimed,
        ];
        let groups = group_summary(tasks, &table(), false);
        let ids: Vec<u64> = groups[0].pending.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 3, 2, 1]);
    }

    #[test]
    fn groups_are_ordered_by_technician() {
        let tasks = vec![
            scheduled(1, "2024-03-05 09:00:00", "x").with_assignee(29),
            scheduled(2, "2024-03-05 09:00:00", "y").with_assignee(23),
            scheduled(3, "2024-03-05 09:00:00", "z").with_assignee(99),
        ];
        let names: Vec<String> = group_summary(tasks, &table(), false)
            .into_iter()
            .map(|g| g.technician)
            .collect();
        assert_eq!(names, vec!["Antonio Marquez", "Denis Corzo", "user_id=99"]);
    }
}

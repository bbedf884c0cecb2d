//! Task counts and percentages by status, reporter and assignee.

use crate::board::domain::{Task, TaskStatus, Vocabulary};
use serde::Serialize;

/// Returns `count` as a percentage of `total`, or `0.0` when `total` is zero.
///
/// ```
/// use atelier::dashboard::percentage_of;
///
/// assert!((percentage_of(1, 4) - 25.0).abs() < f64::EPSILON);
/// assert!(percentage_of(0, 0).abs() < f64::EPSILON);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "dashboard percentages are display values over small task counts"
)]
pub const fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * count as f64 / total as f64
}

/// Task count for a single status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusCount {
    /// Status bucket.
    pub status: TaskStatus,
    /// Number of tasks in the bucket.
    pub count: usize,
    /// Share of the task total, in percent.
    pub percentage: f64,
}

/// Per-status task counts. Every task lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    /// Tasks waiting to be picked up.
    pub pending: usize,
    /// Tasks in progress.
    pub ongoing: usize,
    /// Finished tasks.
    pub completed: usize,
}

impl StatusBreakdown {
    /// Counts tasks per status.
    #[must_use]
    pub fn compute(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut breakdown, task| {
            match task.status() {
                TaskStatus::Pending => breakdown.pending += 1,
                TaskStatus::Ongoing => breakdown.ongoing += 1,
                TaskStatus::Completed => breakdown.completed += 1,
            }
            breakdown
        })
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::Ongoing => self.ongoing,
            TaskStatus::Completed => self.completed,
        }
    }

    /// Returns the sum of all buckets.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pending + self.ongoing + self.completed
    }

    /// Returns every status with its count and percentage, in workflow order.
    #[must_use]
    pub fn entries(&self) -> Vec<StatusCount> {
        let total = self.total();
        TaskStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: self.count(status),
                percentage: percentage_of(self.count(status), total),
            })
            .collect()
    }
}

/// Task count for one reporter or assignee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameCount {
    /// Vocabulary member.
    pub name: String,
    /// Number of tasks carrying the name.
    pub count: usize,
    /// Share of the task total, in percent.
    pub percentage: f64,
}

/// Counts over a closed vocabulary, in vocabulary order.
///
/// Tasks without a value count toward `unassigned`. Stored values no longer
/// present in the vocabulary get their own trailing buckets so the counts
/// still add up to the task total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VocabularyBreakdown {
    /// One bucket per name.
    pub buckets: Vec<NameCount>,
    /// Tasks with no value.
    pub unassigned: usize,
}

impl VocabularyBreakdown {
    fn compute<'a>(
        names: &[String],
        values: impl Iterator<Item = Option<&'a str>>,
        total: usize,
    ) -> Self {
        let mut counts: Vec<(String, usize)> =
            names.iter().map(|name| (name.clone(), 0)).collect();
        let mut unassigned = 0;

        for value in values {
            let Some(name) = value else {
                unassigned += 1;
                continue;
            };
            if let Some(entry) = counts
                .iter_mut()
                .find(|(known, _)| known.eq_ignore_ascii_case(name))
            {
                entry.1 += 1;
            } else {
                counts.push((name.to_owned(), 1));
            }
        }

        let buckets = counts
            .into_iter()
            .map(|(name, count)| NameCount {
                name,
                count,
                percentage: percentage_of(count, total),
            })
            .collect();
        Self {
            buckets,
            unassigned,
        }
    }

    /// Returns the count for a name, or zero when it has no bucket.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.buckets
            .iter()
            .find(|bucket| bucket.name.eq_ignore_ascii_case(name))
            .map_or(0, |bucket| bucket.count)
    }
}

/// Dashboard statistics for a set of tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatistics {
    /// Number of tasks considered.
    pub total: usize,
    /// Counts per workflow status.
    pub status: StatusBreakdown,
    /// Counts per reporter (`pelapor`).
    pub reporters: VocabularyBreakdown,
    /// Counts per assignee (`eksekutor`).
    pub assignees: VocabularyBreakdown,
}

impl TaskStatistics {
    /// Aggregates `tasks` against the deployment vocabularies.
    ///
    /// Percentages are taken against the full task count.
    #[must_use]
    pub fn compute(tasks: &[Task], vocabulary: &Vocabulary) -> Self {
        let total = tasks.len();
        Self {
            total,
            status: StatusBreakdown::compute(tasks),
            reporters: VocabularyBreakdown::compute(
                &vocabulary.reporters,
                tasks
                    .iter()
                    .map(|task| task.reporter().map(|reporter| reporter.as_str())),
                total,
            ),
            assignees: VocabularyBreakdown::compute(
                &vocabulary.assignees,
                tasks
                    .iter()
                    .map(|task| task.assignee().map(|assignee| assignee.as_str())),
                total,
            ),
        }
    }

    /// Percentage of tasks with the given status.
    #[must_use]
    pub const fn status_percentage(&self, status: TaskStatus) -> f64 {
        percentage_of(self.status.count(status), self.total)
    }
}

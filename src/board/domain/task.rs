//! Task aggregate, workflow status, and rich-text content.

use super::{
    Assignee, AttachmentRef, BoardDomainError, ParseTaskStatusError, ProjectId, Reporter, TaskId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Markup the rich-text editor emits when nothing has been typed.
pub const EMPTY_MARKUP_SENTINEL: &str = "<p><br></p>";

/// Workflow status of a task.
///
/// Statuses form a flat selection rather than a pipeline: any status may be
/// assigned directly from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started. Initial status of every task.
    #[default]
    Pending,
    /// Work is under way.
    Ongoing,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// Every status in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Ongoing, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

/// Rich-text task description, stored verbatim including markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskContent(String);

impl TaskContent {
    /// Creates validated task content.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskContent`] when the value is blank
    /// or equals [`EMPTY_MARKUP_SENTINEL`] (ignoring whitespace and case).
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() || is_empty_markup(&raw) {
            return Err(BoardDomainError::EmptyTaskContent);
        }
        Ok(Self(raw))
    }

    /// Returns the content as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskContent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_empty_markup(raw: &str) -> bool {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact == EMPTY_MARKUP_SENTINEL
}

/// Validated set of field changes applied to a task in one write.
///
/// Fields left as `None` are not touched. For reporter and assignee the inner
/// `None` clears the assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New workflow status.
    pub status: Option<TaskStatus>,
    /// New reporter, or `Some(None)` to clear it.
    pub reporter: Option<Option<Reporter>>,
    /// New assignee, or `Some(None)` to clear it.
    pub assignee: Option<Option<Assignee>>,
    /// New task content.
    pub name: Option<TaskContent>,
}

impl TaskChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.reporter.is_none()
            && self.assignee.is_none()
            && self.name.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    name: TaskContent,
    image: Option<AttachmentRef>,
    status: TaskStatus,
    #[serde(rename = "pelapor")]
    reporter: Option<Reporter>,
    #[serde(rename = "eksekutor")]
    assignee: Option<Assignee>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted rich-text content.
    pub name: TaskContent,
    /// Stored attachment reference, if any.
    pub image: Option<AttachmentRef>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted reporter, if assigned.
    pub reporter: Option<Reporter>,
    /// Persisted assignee, if assigned.
    pub assignee: Option<Assignee>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending, unassigned task under a project.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: TaskContent,
        image: Option<AttachmentRef>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id,
            name,
            image,
            status: TaskStatus::Pending,
            reporter: None,
            assignee: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            image: data.image,
            status: data.status,
            reporter: data.reporter,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the rich-text content.
    #[must_use]
    pub const fn name(&self) -> &TaskContent {
        &self.name
    }

    /// Returns the attachment reference, if any.
    #[must_use]
    pub const fn image(&self) -> Option<&AttachmentRef> {
        self.image.as_ref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the reporter, if assigned.
    #[must_use]
    pub const fn reporter(&self) -> Option<&Reporter> {
        self.reporter.as_ref()
    }

    /// Returns the assignee, if assigned.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies validated field changes, leaving absent fields untouched.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let TaskChanges {
            status,
            reporter,
            assignee,
            name,
        } = changes;

        if let Some(next_status) = status {
            self.status = next_status;
        }
        if let Some(next_reporter) = reporter {
            self.reporter = next_reporter;
        }
        if let Some(next_assignee) = assignee {
            self.assignee = next_assignee;
        }
        if let Some(next_name) = name {
            self.name = next_name;
        }
        self.touch(clock);
    }

    /// Replaces the attachment reference and returns the previous one.
    pub fn replace_image(
        &mut self,
        image: Option<AttachmentRef>,
        clock: &impl Clock,
    ) -> Option<AttachmentRef> {
        let previous = std::mem::replace(&mut self.image, image);
        self.touch(clock);
        previous
    }

    /// Listing order: newest `created_at` first, ties broken by id.
    #[must_use]
    pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

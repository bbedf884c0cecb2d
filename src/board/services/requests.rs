//! Request payloads accepted by [`super::BoardService`].

use crate::board::domain::{AttachmentUpload, ProjectId, TaskId};

/// Request payload for creating a task under a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) project_id: ProjectId,
    pub(super) name: String,
    pub(super) image: Option<AttachmentUpload>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
            image: None,
        }
    }

    /// Attaches an image upload.
    #[must_use]
    pub fn with_image(mut self, image: AttachmentUpload) -> Self {
        self.image = Some(image);
        self
    }
}

/// Request payload for updating one or more task fields in a single write.
///
/// Values are raw client input; they are validated together before any of
/// them is applied. An empty reporter or assignee clears that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) task_id: TaskId,
    pub(super) status: Option<String>,
    pub(super) reporter: Option<String>,
    pub(super) assignee: Option<String>,
    pub(super) name: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            status: None,
            reporter: None,
            assignee: None,
            name: None,
        }
    }

    /// Sets the requested workflow status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the requested reporter (`pelapor`).
    #[must_use]
    pub fn with_reporter(mut self, reporter: impl Into<String>) -> Self {
        self.reporter = Some(reporter.into());
        self
    }

    /// Sets the requested assignee (`eksekutor`).
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the requested task content.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the targeted task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Request payload for deleting a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTaskRequest {
    pub(super) task_id: TaskId,
    pub(super) project_id: Option<ProjectId>,
}

impl DeleteTaskRequest {
    /// Creates a request deleting the task regardless of its project.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            project_id: None,
        }
    }

    /// Requires the task to belong to `project_id`.
    #[must_use]
    pub const fn in_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

//! Request payloads accepted by [`super::ApiHandler`].

use crate::board::domain::{AttachmentUpload, BoardDomainError, ProjectId, TaskId};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use thiserror::Error;

/// Image file carried inline, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImagePayload {
    /// Client-side file name.
    pub file_name: String,
    /// Base64 (standard alphabet) file contents.
    pub data: String,
}

impl ImagePayload {
    /// Decodes the payload into a validated upload.
    ///
    /// # Errors
    ///
    /// Returns a client-facing message when the data is not valid base64, or
    /// the domain error when the decoded file is empty.
    pub(super) fn decode(&self) -> Result<AttachmentUpload, ImageDecodeError> {
        let bytes = STANDARD
            .decode(self.data.trim())
            .map_err(|_| ImageDecodeError::Encoding)?;
        Ok(AttachmentUpload::new(self.file_name.clone(), bytes)?)
    }
}

#[derive(Debug, Error)]
pub(super) enum ImageDecodeError {
    #[error("image data is not valid base64")]
    Encoding,
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
}

/// A board operation, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ApiRequest {
    /// List every project.
    ListProjects,
    /// List the tasks of a project, newest first.
    ListTasks {
        /// Owning project.
        project_id: ProjectId,
    },
    /// One page of a project's task table, optionally filtered by name.
    TaskView {
        /// Owning project.
        project_id: ProjectId,
        /// Case-insensitive name filter; absent or empty keeps every task.
        #[serde(default)]
        search: Option<String>,
        /// Requested one-based page, clamped to the available range.
        #[serde(default)]
        page: Option<usize>,
    },
    /// Create a project.
    CreateProject {
        /// Project name.
        name: String,
    },
    /// Create a task, optionally with an image.
    CreateTask {
        /// Owning project.
        project_id: ProjectId,
        /// Rich-text task content.
        name: String,
        /// Optional image attachment.
        #[serde(default)]
        image: Option<ImagePayload>,
    },
    /// Rename a project.
    RenameProject {
        /// Project to rename.
        id: ProjectId,
        /// New name.
        name: String,
    },
    /// Update any subset of a task's fields in one write.
    UpdateTask {
        /// Task to update.
        id: TaskId,
        /// New workflow status.
        #[serde(default)]
        status: Option<String>,
        /// New reporter; empty clears it.
        #[serde(default)]
        pelapor: Option<String>,
        /// New assignee; empty clears it.
        #[serde(default)]
        eksekutor: Option<String>,
        /// New rich-text content.
        #[serde(default)]
        name: Option<String>,
    },
    /// Replace the task image, or remove it when `image` is absent.
    ReplaceTaskImage {
        /// Task to update.
        id: TaskId,
        /// New image; `null` removes the current one.
        #[serde(default)]
        image: Option<ImagePayload>,
    },
    /// Delete a project with all of its tasks and attachments.
    DeleteProject {
        /// Project to delete.
        id: ProjectId,
    },
    /// Delete a task and its attachment.
    DeleteTask {
        /// Task to delete.
        id: TaskId,
        /// Expected owning project, checked when present.
        #[serde(default)]
        project_id: Option<ProjectId>,
    },
    /// Dashboard statistics for a project.
    ProjectStatistics {
        /// Project to aggregate.
        project_id: ProjectId,
    },
}

//! Error types for board domain validation and parsing.

use super::ProjectId;
use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the storage limit.
    #[error("project name exceeds {max} character limit")]
    ProjectNameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The task content is empty or only contains the editor placeholder.
    #[error("task name must not be empty")]
    EmptyTaskContent,

    /// A task was submitted for a project that does not exist.
    #[error("project {0} does not exist")]
    UnknownProject(ProjectId),

    /// The status value is outside the closed status vocabulary.
    #[error("invalid status value: {0}")]
    InvalidStatus(String),

    /// The reporter value is not part of the configured vocabulary.
    #[error("invalid pelapor value: {0}")]
    InvalidReporter(String),

    /// The assignee value is not part of the configured vocabulary.
    #[error("invalid eksekutor value: {0}")]
    InvalidAssignee(String),

    /// The uploaded attachment carries no bytes.
    #[error("attachment '{0}' is empty")]
    EmptyAttachment(String),

    /// The uploaded attachment exceeds the configured size limit.
    #[error("attachment '{name}' exceeds the {max_bytes} byte limit")]
    AttachmentTooLarge {
        /// Original file name supplied by the client.
        name: String,
        /// Configured limit in bytes.
        max_bytes: usize,
    },

    /// An update request carried no field to change.
    #[error("no valid fields to update")]
    NoFieldsToUpdate,
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

impl From<ParseTaskStatusError> for BoardDomainError {
    fn from(err: ParseTaskStatusError) -> Self {
        Self::InvalidStatus(err.0)
    }
}

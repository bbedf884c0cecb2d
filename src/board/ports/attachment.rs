//! Attachment store port for task image files.

use crate::board::domain::{AttachmentRef, AttachmentUpload};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment store operations.
pub type AttachmentStoreResult<T> = Result<T, AttachmentStoreError>;

/// Outcome of deleting a stored attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentDeletion {
    /// The file existed and was removed.
    Deleted,
    /// No file was stored under the reference; nothing was done.
    NotFound,
}

/// Storage contract for attachment bytes.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persists an upload under a name that never overwrites an existing file
    /// and returns the reference to record on the task.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentStoreError::Io`] when the bytes cannot be written.
    async fn save(&self, upload: &AttachmentUpload) -> AttachmentStoreResult<AttachmentRef>;

    /// Removes the stored file. A missing file is reported as
    /// [`AttachmentDeletion::NotFound`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentStoreError::InvalidReference`] for references that
    /// escape the attachment root, or [`AttachmentStoreError::Io`] when the
    /// file exists but cannot be removed.
    async fn delete(&self, reference: &AttachmentRef) -> AttachmentStoreResult<AttachmentDeletion>;

    /// Maps a stored reference to the path clients use to fetch it.
    fn resolve(&self, reference: &AttachmentRef) -> String;
}

/// Errors returned by attachment store implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentStoreError {
    /// The reference is not a plain file name below the attachment root.
    #[error("invalid attachment reference: {0}")]
    InvalidReference(AttachmentRef),

    /// File-system failure.
    #[error("attachment io error: {0}")]
    Io(Arc<std::io::Error>),
}

impl AttachmentStoreError {
    /// Wraps an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

/// Joins a public path prefix and a stored reference with a single slash.
#[must_use]
pub fn public_path(prefix: &str, reference: &AttachmentRef) -> String {
    let trimmed = prefix.trim_end_matches('/');
    format!("{trimmed}/{reference}")
}

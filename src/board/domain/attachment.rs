//! Attachment references and upload payloads.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback base name used when an upload carries no usable file name.
const FALLBACK_FILE_NAME: &str = "upload";

/// Longest sanitized base name in bytes.
///
/// Stored names add a timestamp and retry counter in front of the base, and
/// the result must stay within the 255-byte file name and column limits.
pub const MAX_SANITIZED_FILE_NAME_LEN: usize = 200;

/// Extensions at least this long are not preserved on truncation.
const MAX_EXTENSION_LEN: usize = 16;

/// Reference to a stored attachment, as persisted on the owning task.
///
/// The reference is the stored file name relative to the attachment root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    /// Wraps a stored attachment name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the stored name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the reference names a single file directly below
    /// the attachment root.
    #[must_use]
    pub fn is_plain_file_name(&self) -> bool {
        !self.0.is_empty()
            && self.0 != "."
            && self.0 != ".."
            && !self.0.contains(['/', '\\'])
    }
}

impl AsRef<str> for AttachmentRef {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Image bytes uploaded alongside a task.
#[derive(Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl AttachmentUpload {
    /// Creates a validated upload.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyAttachment`] when `bytes` is empty.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, BoardDomainError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(BoardDomainError::EmptyAttachment(file_name));
        }
        Ok(Self { file_name, bytes })
    }

    /// Returns the client-supplied file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the uploaded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the payload is empty. Validated uploads never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Checks the payload against a size limit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::AttachmentTooLarge`] when the payload is
    /// larger than `max_bytes`.
    pub fn ensure_within(&self, max_bytes: usize) -> Result<(), BoardDomainError> {
        if self.bytes.len() > max_bytes {
            return Err(BoardDomainError::AttachmentTooLarge {
                name: self.file_name.clone(),
                max_bytes,
            });
        }
        Ok(())
    }

    /// Returns the base name of the client file name, restricted to
    /// `[A-Za-z0-9._-]` and [`MAX_SANITIZED_FILE_NAME_LEN`] bytes.
    #[must_use]
    pub fn sanitized_file_name(&self) -> String {
        sanitize_file_name(&self.file_name)
    }
}

impl fmt::Debug for AttachmentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachmentUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Reduces a client file name to a safe base name.
///
/// Long names are shortened to [`MAX_SANITIZED_FILE_NAME_LEN`] bytes, keeping
/// a short extension intact.
#[must_use]
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stripped = cleaned.trim_start_matches('.');

    if stripped.is_empty() {
        FALLBACK_FILE_NAME.to_owned()
    } else {
        truncate_file_name(stripped)
    }
}

/// Shortens an ASCII file name, keeping the extension when it is short.
fn truncate_file_name(name: &str) -> String {
    if name.len() <= MAX_SANITIZED_FILE_NAME_LEN {
        return name.to_owned();
    }
    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() && extension.len() < MAX_EXTENSION_LEN => {
            let stem_budget = MAX_SANITIZED_FILE_NAME_LEN.saturating_sub(extension.len() + 1);
            let short_stem: String = stem.chars().take(stem_budget).collect();
            format!("{short_stem}.{extension}")
        }
        _ => name.chars().take(MAX_SANITIZED_FILE_NAME_LEN).collect(),
    }
}

//! Project aggregate and its validated name.

use super::{BoardDomainError, ProjectId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a project name, matching the `VARCHAR(255)` column.
const MAX_NAME_LENGTH: usize = 255;

/// Validated, trimmed project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyProjectName`] when the value is empty
    /// after trimming, or [`BoardDomainError::ProjectNameTooLong`] when it
    /// exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyProjectName);
        }

        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(BoardDomainError::ProjectNameTooLong {
                max: MAX_NAME_LENGTH,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the project name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level grouping that exclusively owns a set of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project stamped with the current clock time.
    #[must_use]
    pub fn new(name: ProjectName, clock: &impl Clock) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ProjectId,
        name: ProjectName,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the project name.
    pub fn rename(&mut self, name: ProjectName) {
        self.name = name;
    }
}

//! Deployment-configured vocabularies for reporter and assignee fields.
//!
//! The status vocabulary is fixed in code ([`super::TaskStatus`]); the people
//! who may report or execute tasks differ per deployment, so they are data.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! vocabulary_member {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Reconstructs a value read back from storage without
            /// re-checking it against the current vocabulary.
            #[must_use]
            pub fn from_persisted(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the normalised name.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

vocabulary_member!(
    /// Person who raised a task (`pelapor`).
    Reporter
);

vocabulary_member!(
    /// Person assigned to execute a task (`eksekutor`).
    Assignee
);

/// Closed sets of reporter and assignee names for one deployment.
///
/// # Examples
///
/// ```
/// use atelier::board::domain::Vocabulary;
///
/// let vocabulary = Vocabulary::new(["ivan", "drajat"], ["joko"]);
/// assert!(vocabulary.reporter("Ivan").is_ok());
/// assert!(vocabulary.reporter("filza").is_err());
/// assert_eq!(vocabulary.reporter("").ok(), Some(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Names accepted for the reporter (`pelapor`) field.
    pub reporters: Vec<String>,
    /// Names accepted for the assignee (`eksekutor`) field.
    pub assignees: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            ["filza", "drajat"],
            [
                "joko", "hanif", "ikke", "aria", "fatchur", "rifan", "evan", "rico", "fahmi",
                "algiant", "ardy", "bakhrul", "fenti",
            ],
        )
    }
}

impl Vocabulary {
    /// Creates a vocabulary from reporter and assignee names.
    ///
    /// Names are trimmed and lowercased; blanks and duplicates are dropped
    /// while the first-seen order is kept for display.
    #[must_use]
    pub fn new<R, A>(
        reporters: impl IntoIterator<Item = R>,
        assignees: impl IntoIterator<Item = A>,
    ) -> Self
    where
        R: AsRef<str>,
        A: AsRef<str>,
    {
        Self {
            reporters: normalize_names(reporters),
            assignees: normalize_names(assignees),
        }
    }

    /// Returns a copy with every name trimmed, lowercased and deduplicated.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(&self.reporters, &self.assignees)
    }

    /// Validates a reporter value.
    ///
    /// An empty value means "unassigned" and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidReporter`] when the value is not a
    /// member of the reporter vocabulary.
    pub fn reporter(&self, value: &str) -> Result<Option<Reporter>, BoardDomainError> {
        match lookup(&self.reporters, value) {
            Lookup::Blank => Ok(None),
            Lookup::Found(name) => Ok(Some(Reporter(name))),
            Lookup::Missing => Err(BoardDomainError::InvalidReporter(value.to_owned())),
        }
    }

    /// Validates an assignee value.
    ///
    /// An empty value means "unassigned" and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidAssignee`] when the value is not a
    /// member of the assignee vocabulary.
    pub fn assignee(&self, value: &str) -> Result<Option<Assignee>, BoardDomainError> {
        match lookup(&self.assignees, value) {
            Lookup::Blank => Ok(None),
            Lookup::Found(name) => Ok(Some(Assignee(name))),
            Lookup::Missing => Err(BoardDomainError::InvalidAssignee(value.to_owned())),
        }
    }
}

enum Lookup {
    Blank,
    Found(String),
    Missing,
}

fn lookup(names: &[String], value: &str) -> Lookup {
    let candidate = value.trim();
    if candidate.is_empty() {
        return Lookup::Blank;
    }
    names
        .iter()
        .find(|name| name.trim().eq_ignore_ascii_case(candidate))
        .map_or(Lookup::Missing, |name| {
            Lookup::Found(name.trim().to_ascii_lowercase())
        })
}

fn normalize_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for name in names {
        let candidate = name.as_ref().trim().to_ascii_lowercase();
        if !candidate.is_empty() && !normalized.contains(&candidate) {
            normalized.push(candidate);
        }
    }
    normalized
}

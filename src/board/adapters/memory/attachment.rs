//! In-memory attachment store for tests and embedding.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    adapters::naming::stored_file_name,
    domain::{AttachmentRef, AttachmentUpload},
    ports::{
        AttachmentDeletion, AttachmentStore, AttachmentStoreError, AttachmentStoreResult,
        public_path,
    },
};

/// Thread-safe attachment store keeping file bytes in a map.
pub struct InMemoryAttachmentStore<C> {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
    public_prefix: String,
    clock: Arc<C>,
}

impl<C> InMemoryAttachmentStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store that resolves references below `public_prefix`.
    #[must_use]
    pub fn new(public_prefix: impl Into<String>, clock: Arc<C>) -> Self {
        Self {
            files: Arc::default(),
            public_prefix: public_prefix.into(),
            clock,
        }
    }

    /// Returns the stored bytes for a reference, if present.
    #[must_use]
    pub fn get(&self, reference: &AttachmentRef) -> Option<Vec<u8>> {
        self.files
            .read()
            .ok()
            .and_then(|files| files.get(reference.as_str()).cloned())
    }

    /// Returns the number of stored files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or_default()
    }

    /// Returns `true` when no file is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C> Clone for InMemoryAttachmentStore<C> {
    fn clone(&self) -> Self {
        Self {
            files: Arc::clone(&self.files),
            public_prefix: self.public_prefix.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> std::fmt::Debug for InMemoryAttachmentStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAttachmentStore")
            .field("public_prefix", &self.public_prefix)
            .finish_non_exhaustive()
    }
}

fn poisoned(err: impl std::fmt::Display) -> AttachmentStoreError {
    AttachmentStoreError::io(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> AttachmentStore for InMemoryAttachmentStore<C>
where
    C: Clock + Send + Sync,
{
    async fn save(&self, upload: &AttachmentUpload) -> AttachmentStoreResult<AttachmentRef> {
        let base = upload.sanitized_file_name();
        let timestamp = self.clock.utc();
        let mut files = self.files.write().map_err(poisoned)?;

        let mut attempt = 0;
        let name = loop {
            let candidate = stored_file_name(timestamp, &base, attempt);
            if !files.contains_key(&candidate) {
                break candidate;
            }
            attempt += 1;
        };

        files.insert(name.clone(), upload.bytes().to_vec());
        Ok(AttachmentRef::new(name))
    }

    async fn delete(&self, reference: &AttachmentRef) -> AttachmentStoreResult<AttachmentDeletion> {
        if !reference.is_plain_file_name() {
            return Err(AttachmentStoreError::InvalidReference(reference.clone()));
        }
        let mut files = self.files.write().map_err(poisoned)?;
        Ok(match files.remove(reference.as_str()) {
            Some(_) => AttachmentDeletion::Deleted,
            None => AttachmentDeletion::NotFound,
        })
    }

    fn resolve(&self, reference: &AttachmentRef) -> String {
        public_path(&self.public_prefix, reference)
    }
}

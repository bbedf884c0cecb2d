//! File-system attachment store backed by a capability-scoped directory.
//!
//! Every operation is confined to the upload root: references are plain file
//! names, and files are created with `create_new` so an existing attachment is
//! never overwritten.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use mockable::Clock;
use std::io::{ErrorKind, Write};
use std::sync::Arc;

use crate::board::{
    adapters::naming::stored_file_name,
    domain::{AttachmentRef, AttachmentUpload},
    ports::{
        AttachmentDeletion, AttachmentStore, AttachmentStoreError, AttachmentStoreResult,
        public_path,
    },
};

/// Upper bound on name-collision retries for a single upload.
const MAX_NAME_ATTEMPTS: u32 = 64;

/// Attachment store writing files below a single upload directory.
pub struct FsAttachmentStore<C> {
    root: Arc<Dir>,
    public_prefix: String,
    clock: Arc<C>,
}

impl<C> FsAttachmentStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Opens (creating if needed) the upload directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentStoreError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(
        path: &Utf8Path,
        public_prefix: impl Into<String>,
        clock: Arc<C>,
    ) -> AttachmentStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(AttachmentStoreError::io)?;
        let root = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(AttachmentStoreError::io)?;
        Ok(Self::from_dir(root, public_prefix, clock))
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub fn from_dir(root: Dir, public_prefix: impl Into<String>, clock: Arc<C>) -> Self {
        Self {
            root: Arc::new(root),
            public_prefix: public_prefix.into(),
            clock,
        }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AttachmentStoreResult<T>
    where
        F: FnOnce(&Dir) -> AttachmentStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || f(&root))
            .await
            .map_err(|err| AttachmentStoreError::io(std::io::Error::other(err)))?
    }
}

impl<C> Clone for FsAttachmentStore<C> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            public_prefix: self.public_prefix.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> std::fmt::Debug for FsAttachmentStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsAttachmentStore")
            .field("public_prefix", &self.public_prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> AttachmentStore for FsAttachmentStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn save(&self, upload: &AttachmentUpload) -> AttachmentStoreResult<AttachmentRef> {
        let base = upload.sanitized_file_name();
        let timestamp = self.clock.utc();
        let bytes = upload.bytes().to_vec();

        let name = self
            .run_blocking(move |root| {
                for attempt in 0..MAX_NAME_ATTEMPTS {
                    let candidate = stored_file_name(timestamp, &base, attempt);
                    match write_new_file(root, &candidate, &bytes) {
                        Ok(()) => return Ok(candidate),
                        Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
                        Err(err) => return Err(AttachmentStoreError::io(err)),
                    }
                }
                Err(AttachmentStoreError::io(std::io::Error::new(
                    ErrorKind::AlreadyExists,
                    format!("no free attachment name for '{base}'"),
                )))
            })
            .await?;

        tracing::debug!(attachment = %name, "stored attachment");
        Ok(AttachmentRef::new(name))
    }

    async fn delete(&self, reference: &AttachmentRef) -> AttachmentStoreResult<AttachmentDeletion> {
        if !reference.is_plain_file_name() {
            return Err(AttachmentStoreError::InvalidReference(reference.clone()));
        }
        let name = reference.as_str().to_owned();
        self.run_blocking(move |root| match root.remove_file(&name) {
            Ok(()) => Ok(AttachmentDeletion::Deleted),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(AttachmentDeletion::NotFound),
            Err(err) => Err(AttachmentStoreError::io(err)),
        })
        .await
    }

    fn resolve(&self, reference: &AttachmentRef) -> String {
        public_path(&self.public_prefix, reference)
    }
}

fn write_new_file(root: &Dir, name: &str, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = root.open_with(name, &options)?;
    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        // A half-written file must not survive under a name a task may reference.
        if let Err(cleanup) = root.remove_file(name) {
            tracing::warn!(attachment = name, error = %cleanup, "failed to remove partial attachment");
        }
        return Err(err);
    }
    Ok(())
}

//! Port contracts for the board context.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod attachment;
pub mod repository;

pub use attachment::{
    AttachmentDeletion, AttachmentStore, AttachmentStoreError, AttachmentStoreResult, public_path,
};
pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};

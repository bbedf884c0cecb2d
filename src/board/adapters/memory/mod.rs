//! In-memory adapters for the board context.

mod attachment;
mod repository;

pub use attachment::InMemoryAttachmentStore;
pub use repository::InMemoryBoardRepository;

//! Projects, tasks and their image attachments.
//!
//! A project groups tasks; each task carries rich-text content, an optional
//! image, a workflow status and optional reporter and assignee drawn from
//! configurable vocabularies. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

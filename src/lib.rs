//! Atelier: design-review project and task tracking.
//!
//! Projects group tasks carrying rich-text content, an optional image, a
//! workflow status and optional reporter and assignee. A dashboard layer
//! aggregates tasks by status and people and presents searchable, paginated
//! lists.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, file system)
//!
//! # Modules
//!
//! - [`board`]: Projects, tasks and attachments
//! - [`dashboard`]: Statistics, search and pagination
//! - [`api`]: JSON request/response contract
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Logging setup

pub mod api;
pub mod board;
pub mod config;
pub mod dashboard;
pub mod telemetry;

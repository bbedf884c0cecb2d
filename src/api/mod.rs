//! External request/response contract for the board.
//!
//! Requests arrive as JSON objects tagged by `op`; every request yields one
//! [`ApiResponse`] carrying an HTTP-style status code and a JSON body.
//! Validation failures map to `400`, missing entities to `404`, and storage
//! failures to `500` with a generic message.

mod handler;
mod request;
mod response;

pub use handler::ApiHandler;
pub use request::{ApiRequest, ImagePayload};
pub use response::{ApiResponse, STORAGE_FAILURE_MESSAGE};

#[cfg(test)]
mod tests;

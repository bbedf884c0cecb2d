//! Unit tests for dashboard view logic.

mod listing_tests;
mod support;

//! Unit tests for the board context.

mod attachment_failure_tests;
mod support;

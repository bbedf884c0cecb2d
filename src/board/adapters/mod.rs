//! Adapter implementations for board ports.

pub mod fs;
pub mod memory;
mod naming;
pub mod postgres;

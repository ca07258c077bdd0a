//! Integration test utilities for the relay
//!
//! This crate provides helpers for running end-to-end tests against
//! the WebSocket relay and its HTTP endpoints.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

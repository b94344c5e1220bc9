//! Shared fixtures and helpers for the integration tests.

pub mod fix_helpers;
pub mod source_fixtures;

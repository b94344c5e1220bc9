//! Repair tests
//!
//! End-to-end behavior of matching and repairing:
//! - The documented repair scenarios
//! - Properties every repair must keep
//! - The pipeline over a workspace loaded from disk

pub mod tests_pipeline;
pub mod tests_properties;
pub mod tests_scenarios;

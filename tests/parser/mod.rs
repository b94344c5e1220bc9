//! Parser tests
//!
//! The tree must reproduce its input byte for byte; repairs rely on it.

pub mod tests_lossless;

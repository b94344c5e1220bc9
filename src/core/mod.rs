//! Language-independent helpers used across the crate.

pub mod text_utils;

pub use text_utils::{detect_newline, is_identifier, leading_indent};

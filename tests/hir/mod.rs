//! HIR layer tests
//!
//! Rule evaluation over whole files:
//! - Existence and completeness gates
//! - Signature tags and the void exemption
//! - File-level findings
pub mod tests_rules;

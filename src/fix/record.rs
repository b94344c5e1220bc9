//! The serialized form of a diagnostic.
//!
//! Records cross the boundary between the analysis pass and the repair pass
//! (in memory, or through a diagnostic log on disk). They keep only what an
//! external analyzer log carries: id, message, file and a 1-based position.

use crate::base::LineIndex;
use crate::hir::{Diagnostic, RuleId};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
pub struct DiagnosticRecord {
    #[cfg_attr(feature = "interchange", serde(rename = "Id"))]
    pub rule_id: String,
    pub message: String,
    pub file_path: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based column, in characters.
    pub character: u32,
}

impl DiagnosticRecord {
    pub fn from_diagnostic(diagnostic: &Diagnostic, file_path: &str, index: &LineIndex) -> Self {
        let (line, character) = index.line_col(diagnostic.range.start()).one_based();
        Self {
            rule_id: diagnostic.rule.as_str().to_string(),
            message: diagnostic.message.to_string(),
            file_path: file_path.to_string(),
            line,
            character,
        }
    }

    /// The rule this record refers to, if it is one of ours.
    pub fn rule(&self) -> Option<RuleId> {
        RuleId::parse(&self.rule_id)
    }
}

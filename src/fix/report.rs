//! Summary of a fix run.

use super::record::DiagnosticRecord;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
pub struct FixReport {
    pub summary: FixSummary,
    pub file_results: Vec<FileResult>,
    pub remaining_issues: Vec<RemainingIssue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
pub struct FixSummary {
    pub issues_before: usize,
    pub issues_after: usize,
    /// `issues_before - issues_after`, never negative.
    pub issues_fixed: usize,
    pub files_processed: usize,
    pub files_successful: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
pub struct FileResult {
    pub file_path: String,
    pub success: bool,
    pub fixes_applied: usize,
    /// Empty on success.
    #[cfg_attr(feature = "interchange", serde(default))]
    pub error_message: String,
}

impl FileResult {
    pub fn succeeded(file_path: impl Into<String>, fixes_applied: usize) -> Self {
        Self {
            file_path: file_path.into(),
            success: true,
            fixes_applied,
            error_message: String::new(),
        }
    }

    pub fn failed(file_path: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            file_path: file_path.into(),
            success: false,
            fixes_applied: 0,
            error_message: error.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
pub struct RemainingIssue {
    pub id: String,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl From<&DiagnosticRecord> for RemainingIssue {
    fn from(record: &DiagnosticRecord) -> Self {
        Self {
            id: record.rule_id.clone(),
            file: record.file_path.clone(),
            line: record.line,
            message: record.message.clone(),
        }
    }
}

impl FixReport {
    pub fn new(issues_before: usize, after: &[DiagnosticRecord], file_results: Vec<FileResult>) -> Self {
        let summary = FixSummary {
            issues_before,
            issues_after: after.len(),
            issues_fixed: issues_before.saturating_sub(after.len()),
            files_processed: file_results.len(),
            files_successful: file_results.iter().filter(|r| r.success).count(),
        };
        Self {
            summary,
            file_results,
            remaining_issues: after.iter().map(RemainingIssue::from).collect(),
        }
    }

    pub fn fixes_applied(&self) -> usize {
        self.file_results.iter().map(|r| r.fixes_applied).sum()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileResult> {
        self.file_results.iter().filter(|r| !r.success)
    }
}

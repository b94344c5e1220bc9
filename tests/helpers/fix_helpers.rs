//! Analysis and repair helpers shared by the hir and fix tests.

use docwarden::fix::{NoopObserver, RepairObserver, repair_file};
use docwarden::{
    Diagnostic, DiagnosticRecord, FileId, FileModel, LineIndex, RuleId, build_file_model,
    evaluate_file,
};

/// Path every single-file helper analyzes under.
pub const SAMPLE_PATH: &str = "Sample.cs";

/// Build the file model of a source string.
pub fn model_of(source: &str) -> FileModel {
    build_file_model(FileId::new(0), SAMPLE_PATH, source)
}

/// Get all diagnostics for a source string.
pub fn diagnostics_of(source: &str) -> Vec<Diagnostic> {
    evaluate_file(&model_of(source))
}

/// Rule ids of all diagnostics, in report order.
pub fn rules_of(source: &str) -> Vec<RuleId> {
    diagnostics_of(source).iter().map(|d| d.rule).collect()
}

/// Diagnostics as they travel through the diagnostic log.
pub fn records_of(source: &str) -> Vec<DiagnosticRecord> {
    let index = LineIndex::new(source);
    diagnostics_of(source)
        .iter()
        .map(|d| DiagnosticRecord::from_diagnostic(d, SAMPLE_PATH, &index))
        .collect()
}

/// Analyze, repair once and return the new text.
pub fn fix_once(source: &str) -> String {
    fix_once_observed(source, &NoopObserver)
}

pub fn fix_once_observed(source: &str, observer: &dyn RepairObserver) -> String {
    let model = model_of(source);
    repair_file(&model, source, &records_of(source), observer).text
}

/// Repair until the text stops changing; returns the text and pass count.
pub fn fix_until_stable(source: &str, max_passes: usize) -> (String, usize) {
    let mut text = source.to_string();
    for pass in 1..=max_passes {
        let next = fix_once(&text);
        if next == text {
            return (text, pass);
        }
        text = next;
    }
    panic!("repair did not converge within {max_passes} passes:\n{text}");
}

/// Wrap members in a fully documented `class C`.
pub fn in_documented_class(members: &str) -> String {
    format!(
        "{}\npublic class C\n{{\n{members}}}\n",
        crate::helpers::source_fixtures::COMPLETE_TYPE_DOC
    )
}

/// Assert a source has no findings at all.
pub fn assert_clean(source: &str) {
    let diagnostics = diagnostics_of(source);
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics, got {}:\n{}\n--- source ---\n{source}",
        diagnostics.len(),
        diagnostics
            .iter()
            .map(|d| format!("  {}: {}", d.rule, d.message))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

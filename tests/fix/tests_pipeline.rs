#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use docwarden::{FileFilter, FixConfig, FixPipeline, Workspace, WorkspaceLoader};

use crate::helpers::fix_helpers::assert_clean;
use crate::helpers::source_fixtures::{
    BARE_CLASS, BARE_CLASS_WITH_MEMBERS, BROKEN_ENUM, TWO_TOP_LEVEL_ENUMS,
};

fn write(dir: &Path, name: &str, text: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn load(dir: &Path) -> Workspace {
    let mut ws = Workspace::new();
    WorkspaceLoader::new().load_directory(dir, &mut ws).unwrap();
    ws
}

// ============================================================================
// LOADING
// ============================================================================

#[test]
fn test_load_directory_skips_build_output() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Foo.cs", BARE_CLASS);
    write(dir.path(), "Shop/Cart.cs", BARE_CLASS_WITH_MEMBERS);
    write(dir.path(), "obj/Generated.cs", BARE_CLASS);
    write(dir.path(), "README.md", "# not code");

    let ws = load(dir.path());
    assert_eq!(ws.len(), 2);
    assert!(ws.paths().all(|p| !p.ends_with("Generated.cs")));
}

#[test]
fn test_load_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut ws = Workspace::new();
    let err = WorkspaceLoader::new()
        .load_directory(dir.path().join("absent"), &mut ws)
        .unwrap_err();
    assert!(err.to_string().starts_with("Directory not found"));
}

// ============================================================================
// FIX RUN
// ============================================================================

#[test]
fn test_run_repairs_directory_and_writes_back() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Foo.cs", &format!("\u{feff}{BARE_CLASS}"));
    write(dir.path(), "Shop/Cart.cs", BARE_CLASS_WITH_MEMBERS);
    let mut ws = load(dir.path());

    let report = FixPipeline::new(FixConfig::default()).run(&mut ws).unwrap();
    assert_eq!(report.summary.issues_before, 7);
    assert_eq!(report.summary.issues_after, 0);
    assert_eq!(report.summary.issues_fixed, 7);
    assert_eq!(report.summary.files_processed, 2);
    assert_eq!(report.summary.files_successful, 2);
    assert_eq!(report.fixes_applied(), 7);

    assert_eq!(ws.write_back().unwrap(), 2);
    let foo = fs::read_to_string(dir.path().join("Foo.cs")).unwrap();
    assert!(foo.starts_with("\u{feff}/// <summary>"));
    assert_clean(foo.trim_start_matches('\u{feff}'));
    assert_clean(&fs::read_to_string(dir.path().join("Shop/Cart.cs")).unwrap());
}

#[test]
fn test_run_sequential_matches_parallel() {
    let files = [("A.cs", BARE_CLASS), ("B.cs", BARE_CLASS_WITH_MEMBERS)];
    let mut parallel = Workspace::new();
    let mut sequential = Workspace::new();
    for (path, text) in files {
        parallel.insert(path, text);
        sequential.insert(path, text);
    }

    let a = FixPipeline::new(FixConfig::default()).run(&mut parallel).unwrap();
    let b = FixPipeline::new(FixConfig::default().with_parallel(false))
        .run(&mut sequential)
        .unwrap();
    assert_eq!(a, b);
    for (x, y) in parallel.iter().zip(sequential.iter()) {
        assert_eq!(x.text, y.text);
    }
}

#[test]
fn test_run_reports_unrepairable_and_broken_files() {
    let mut ws = Workspace::new();
    ws.insert("Enums.cs", TWO_TOP_LEVEL_ENUMS);
    ws.insert("Broken.cs", BROKEN_ENUM);
    ws.insert("Foo.cs", BARE_CLASS);

    let report = FixPipeline::default().run(&mut ws).unwrap();
    let failed: Vec<&str> = report.failed_files().map(|r| r.file_path.as_str()).collect();
    assert_eq!(failed, vec!["Broken.cs"]);
    assert!(
        report
            .remaining_issues
            .iter()
            .any(|i| i.file == "Enums.cs" && i.id == "PROJECT_TYPE_MULTI_ENUM_FILE")
    );
    assert!(!ws.get("Enums.cs").unwrap().is_changed());
    assert!(!ws.get("Broken.cs").unwrap().is_changed());
    assert!(ws.get("Foo.cs").unwrap().is_changed());
}

#[test]
fn test_filter_restricts_repair_but_not_analysis() {
    let mut ws = Workspace::new();
    ws.insert("src/A.cs", BARE_CLASS);
    ws.insert("src/B.cs", BARE_CLASS);
    let config = FixConfig::default().with_file_filter(FileFilter::parse(r"SRC\a.cs"));

    let report = FixPipeline::new(config).run(&mut ws).unwrap();
    assert_eq!(report.summary.issues_before, 2);
    assert_eq!(report.summary.issues_after, 1);
    assert_eq!(report.remaining_issues[0].file, "src/B.cs");
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[cfg(feature = "interchange")]
#[test]
fn test_run_persists_logs_and_report() {
    use docwarden::fix::{FixReport, post_log_path};
    use docwarden::interchange::{DiagnosticLog, DocumentFormat, JsonReport};

    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("diagnostics.xml");
    let report_path = dir.path().join("report.json");
    let mut ws = Workspace::new();
    ws.insert("Foo.cs", BARE_CLASS);
    ws.insert("Enums.cs", TWO_TOP_LEVEL_ENUMS);

    let config = FixConfig::default()
        .with_diagnostic_log(&log)
        .with_report_path(&report_path);
    let report = FixPipeline::new(config).run(&mut ws).unwrap();

    let before = DiagnosticLog.read_file(&log).unwrap();
    assert_eq!(before.len(), 2);
    assert!(before.iter().any(|r| r.rule_id == "PROJECT_TYPE_NO_COMMENT_BLOCK"
        && r.file_path == "Foo.cs"
        && r.line == 1));

    let after = DiagnosticLog.read_file(&post_log_path(&log)).unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].rule_id, "PROJECT_TYPE_MULTI_ENUM_FILE");

    let json = fs::read_to_string(&report_path).unwrap();
    assert!(json.contains("\"IssuesBefore\": 2"));
    assert!(json.contains("\"RemainingIssues\""));
    let read_back: FixReport = JsonReport.read_file(&report_path).unwrap();
    assert_eq!(read_back, report);
}

#[cfg(feature = "interchange")]
#[test]
fn test_foreign_diagnostics_in_log_are_ignored() {
    use docwarden::interchange::{DiagnosticLog, DocumentFormat};

    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<Diagnostics>
  <Diagnostic Id="CS1591">
    <Message>Missing XML comment for publicly visible type or member 'Foo'</Message>
    <FilePath>Foo.cs</FilePath>
    <Location Line="1" Character="14"/>
  </Diagnostic>
  <Diagnostic Id="PROJECT_TYPE_NO_COMMENT_BLOCK">
    <Message>Class 'Foo' has no XML documentation comment block</Message>
    <FilePath>Foo.cs</FilePath>
    <Location Line="1" Character="14"/>
  </Diagnostic>
</Diagnostics>
"#;
    let records = DiagnosticLog.read(xml.as_bytes()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "Class 'Foo' has no XML documentation comment block");
    assert_eq!(records[0].character, 14);
}

// ============================================================================
// CLEAN
// ============================================================================

#[test]
fn test_clean_then_fix_regenerates_templates() {
    let mut ws = Workspace::new();
    ws.insert("Foo.cs", BARE_CLASS);
    let pipeline = FixPipeline::default();
    pipeline.run(&mut ws).unwrap();
    let documented = ws.get("Foo.cs").unwrap().text.clone();

    let summary = pipeline.clean(&mut ws, &FileFilter::all());
    assert_eq!(summary.files_changed, 1);
    assert_eq!(summary.lines_removed, documented.lines().count() - BARE_CLASS.lines().count());
    assert_eq!(&*ws.get("Foo.cs").unwrap().text, BARE_CLASS);

    pipeline.run(&mut ws).unwrap();
    assert_eq!(ws.get("Foo.cs").unwrap().text, documented);
}

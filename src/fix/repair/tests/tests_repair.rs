#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::super::*;
use crate::base::{FileId, LineIndex};
use crate::fix::observer::{CollectingObserver, NoopObserver};
use crate::hir::{build_file_model, evaluate_file};

// ============================================================================
// Helpers
// ============================================================================

fn model(source: &str) -> FileModel {
    build_file_model(FileId::new(0), "T.cs", source)
}

fn records(model: &FileModel, source: &str) -> Vec<DiagnosticRecord> {
    let index = LineIndex::new(source);
    evaluate_file(model)
        .iter()
        .map(|d| DiagnosticRecord::from_diagnostic(d, &model.path, &index))
        .collect()
}

fn fix(source: &str) -> String {
    let model = model(source);
    let records = records(&model, source);
    repair_file(&model, source, &records, &NoopObserver).text
}

fn remaining(source: &str) -> Vec<RuleId> {
    evaluate_file(&model(source)).iter().map(|d| d.rule).collect()
}

fn type_doc(indent: &str) -> String {
    let mut doc = format!("{indent}/// <summary>S</summary>\n{indent}/// <remarks>\n");
    for marker in REMARKS_MARKERS {
        doc.push_str(&format!("{indent}/// {marker} x\n"));
    }
    doc.push_str(&format!("{indent}/// </remarks>\n"));
    doc
}

fn in_class(members: &str) -> String {
    format!("{}class C\n{{\n{members}}}\n", type_doc(""))
}

// ============================================================================
// Full synthesis
// ============================================================================

#[test]
fn test_undocumented_class_gets_full_template() {
    let fixed = fix("public class Foo\n{\n}\n");
    assert!(fixed.starts_with("/// <summary>\n/// Foo —— [class职责简述]\n/// </summary>\n/// <remarks>\n"));
    assert!(fixed.ends_with("/// </remarks>\npublic class Foo\n{\n}\n"));
    assert_eq!(fixed.matches("[待补充]").count(), REMARKS_MARKERS.len());
    assert!(!fixed.contains("<param") && !fixed.contains("<returns"));
    assert!(remaining(&fixed).is_empty());
}

#[test]
fn test_synthesis_follows_indentation() {
    let fixed = fix("namespace N\n{\n    class Foo { }\n}\n");
    assert!(fixed.contains("{\n    /// <summary>\n    /// Foo —— [class职责简述]\n"));
    assert!(fixed.contains("    /// </remarks>\n    class Foo { }\n"));
}

#[test]
fn test_synthesis_moves_declaration_after_code() {
    let fixed = fix("class C { int f; }\n");
    assert!(fixed.contains("class C {\n/// <summary>\n/// f —— [field职责简述]\n"));
    assert!(fixed.ends_with("/// </remarks>\nint f; }\n"));
    assert!(remaining(&fixed).is_empty());
}

#[test]
fn test_synthesis_keeps_crlf() {
    let fixed = fix("class Foo\r\n{\r\n}\r\n");
    assert!(fixed.starts_with("/// <summary>\r\n/// Foo"));
    assert!(fixed.contains("/// </remarks>\r\nclass Foo\r\n"));
    assert!(!fixed.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_overloads_get_their_own_blocks() {
    let source = in_class("    void M(int a) { }\n    void M(string b) { }\n");
    let fixed = fix(&source);
    let a_tag = fixed.find("<param name=\"a\">").unwrap();
    let first = fixed.find("void M(int a)").unwrap();
    let b_tag = fixed.find("<param name=\"b\">").unwrap();
    let second = fixed.find("void M(string b)").unwrap();
    assert!(a_tag < first && first < b_tag && b_tag < second);
    assert_eq!(fixed.matches("<param name=").count(), 2);
    assert!(remaining(&fixed).is_empty());
}

// ============================================================================
// Targeted patch
// ============================================================================

#[test]
fn test_patch_appends_signature_tags() {
    let source = in_class("    /// <summary>Parses s.</summary>\n    int Bar(string s) => 0;\n");
    let fixed = fix(&source);
    let expected = "    /// <summary>Parses s.</summary>\n    /// <remarks>\n    /// 功能: [待补充]\n    /// </remarks>\n    /// <param name=\"s\">[参数说明]</param>\n    /// <returns>[返回值说明]</returns>\n    int Bar(string s) => 0;\n";
    assert!(fixed.contains(expected), "{fixed}");
    assert!(fixed.starts_with(&type_doc("")));
    assert!(remaining(&fixed).is_empty());
}

#[test]
fn test_duplicate_remarks_keeps_first() {
    let source = in_class(
        "    /// <summary>S</summary>\n    /// <remarks>功能: first</remarks>\n    /// <remarks>功能: second</remarks>\n    int f;\n",
    );
    let fixed = fix(&source);
    assert!(fixed.contains(
        "    /// <summary>S</summary>\n    /// <remarks>功能: first</remarks>\n    int f;\n"
    ));
    assert!(!fixed.contains("second"));
}

#[test]
fn test_duplicate_multiline_summary_keeps_first() {
    let source = in_class(
        "    /// <summary>\n    /// First\n    /// </summary>\n    /// <summary>\n    /// Second\n    /// </summary>\n    /// <remarks>功能: x</remarks>\n    int f;\n",
    );
    let fixed = fix(&source);
    assert!(fixed.contains(
        "    /// <summary>\n    /// First\n    /// </summary>\n    /// <remarks>功能: x</remarks>\n    int f;\n"
    ));
    assert!(remaining(&fixed).is_empty());
}

#[test]
fn test_empty_summary_is_filled_inline() {
    let source = in_class("    /// <summary></summary>\n    /// <remarks>功能: x</remarks>\n    int f;\n");
    let fixed = fix(&source);
    assert!(fixed.contains("    /// <summary>f —— [field职责简述]</summary>\n    /// <remarks>功能: x</remarks>\n"));
}

#[test]
fn test_missing_markers_inserted_before_close() {
    let source = "/// <summary>S</summary>\n/// <remarks>功能: x</remarks>\nclass Foo { }\n";
    let fixed = fix(source);
    assert!(fixed.starts_with("/// <summary>S</summary>\n/// <remarks>功能: x\n/// 架构层级: [待补充]\n"));
    assert!(fixed.contains("/// 使用示例: [待补充]\n/// </remarks>\nclass Foo { }"));
    assert_eq!(fixed.matches("功能:").count(), 1);
    assert!(remaining(&fixed).is_empty());
}

#[test]
fn test_duplicate_remarks_defers_marker_completion() {
    let source = "/// <summary>S</summary>\n/// <remarks>功能: a</remarks>\n/// <remarks>b</remarks>\nclass Foo { }\n";
    let first = fix(source);
    assert_eq!(first, "/// <summary>S</summary>\n/// <remarks>功能: a</remarks>\nclass Foo { }\n");
    let second = fix(&first);
    assert!(second.contains("/// 数据流: [待补充]"));
    assert_eq!(fix(&second), second);
}

#[test]
fn test_unclosed_remarks_is_closed() {
    let source = in_class(
        "    /// <summary>S</summary>\n    /// <remarks>\n    /// 功能: x\n    /// <param name=\"a\">A</param>\n    void M(int a, int b) { }\n",
    );
    let fixed = fix(&source);
    let expected = "    /// <remarks>\n    /// 功能: x\n    /// </remarks>\n    /// <param name=\"a\">A</param>\n    /// <param name=\"b\">[参数说明]</param>\n    void M";
    assert!(fixed.contains(expected), "{fixed}");
}

#[test]
fn test_unrecoverable_block_is_abandoned() {
    let source = in_class("    /// <summary>S\n    /// <remarks>功能: x</remarks>\n    int f;\n");
    let model = model(&source);
    let records = records(&model, &source);
    let observer = CollectingObserver::new();
    let result = repair_file(&model, &source, &records, &observer);

    assert_eq!(result.text, source);
    assert_eq!(result.abandoned, 1);
    let abandoned = observer.events().into_iter().any(|(_, e)| {
        matches!(e, RepairEvent::Abandoned { ref reason, .. } if reason.contains("unclosed <summary>"))
    });
    assert!(abandoned);
}

#[test]
fn test_trailing_doc_comment_belongs_to_no_declaration() {
    let source = in_class("    int x; /// <summary></summary>\n    int y;\n");
    let fixed = fix(&source);
    assert!(fixed.contains(
        "    int x; /// <summary></summary>\n    /// <summary>\n    /// y —— [field职责简述]\n"
    ));
    assert!(remaining(&fixed).is_empty(), "{:?}", remaining(&fixed));
}

#[test]
fn test_self_closing_remarks_gets_markers() {
    let source = "/// <summary>S</summary>\n/// <remarks/>\npublic class Foo { }\n";
    assert_eq!(remaining(source).len(), REMARKS_MARKERS.len());

    let fixed = fix(source);
    assert!(fixed.contains("/// <remarks>\n/// 功能: [待补充]\n"), "{fixed}");
    assert!(fixed.ends_with("/// </remarks>\npublic class Foo { }\n"), "{fixed}");
    assert_eq!(fixed.matches("[待补充]").count(), REMARKS_MARKERS.len());
    assert!(remaining(&fixed).is_empty(), "{:?}", remaining(&fixed));
    assert_eq!(fix(&fixed), fixed);
}

#[test]
fn test_self_closing_remarks_keeps_trailing_content() {
    let source = "    /// <summary>S</summary>\n    /// <remarks /> <example>E</example>\n    class Foo { }\n";
    let fixed = fix(&format!("namespace N\n{{\n{source}}}\n"));
    assert!(fixed.contains("    /// <remarks>\n    /// 功能: [待补充]\n"), "{fixed}");
    assert!(fixed.contains("    /// </remarks> <example>E</example>\n    class Foo { }\n"), "{fixed}");
}

#[test]
fn test_repair_is_idempotent() {
    let source = in_class(
        "    /// <summary>S</summary>\n    /// <summary>T</summary>\n    int f;\n    T Get<T>(int key) => default;\n    /// <summary></summary>\n    void Set(int key, string value) { }\n",
    );
    let once = fix(&source);
    assert!(remaining(&once).is_empty(), "{:?}", remaining(&once));
    assert_eq!(fix(&once), once);
}

#[test]
fn test_no_change_without_applicable_rules() {
    let source = in_class("    /// <summary>S</summary>\n    /// <remarks>功能: x</remarks>\n    /// <param name=\"a\">A</param>\n    void M(int a) { }\n");
    let model = model(&source);
    let method = &model.declarations[1];
    assert_eq!(repair(method, &[RuleId::MemberMissingParam], &source).unwrap(), None);
    assert_eq!(repair(method, &[RuleId::TypeNestedEnum], &source).unwrap(), None);
}

#[test]
fn test_plan_reports_patch_ops() {
    let source = in_class("    /// <summary>S</summary>\n    int Count(int a) => a;\n");
    let model = model(&source);
    let method = &model.declarations[1];
    let rules = [
        RuleId::MemberMissingRemarks,
        RuleId::MemberMissingParam,
        RuleId::MemberMissingReturns,
    ];
    let repair = plan_repair(method, &rules, &source).unwrap().unwrap();
    assert_eq!(
        repair.action,
        RepairAction::Patched(vec![
            PatchOp::InsertRemarks,
            PatchOp::InsertParams(1),
            PatchOp::InsertReturns,
        ])
    );
    let mut text = source.clone();
    repair.edit.apply(&mut text);
    assert!(remaining(&text).is_empty());
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use docwarden::hir::RuleScope;
use docwarden::{RuleId, Severity};
use rstest::rstest;

use crate::helpers::fix_helpers::{
    assert_clean, diagnostics_of, in_documented_class, model_of, rules_of,
};
use crate::helpers::source_fixtures::{
    BARE_CLASS, BARE_CLASS_WITH_MEMBERS, CONDITIONAL_CLASS, TWO_TOP_LEVEL_ENUMS,
};

// ============================================================================
// EXISTENCE GATE
// ============================================================================

#[test]
fn test_bare_class_reports_only_missing_block() {
    let diagnostics = diagnostics_of(BARE_CLASS);
    assert_eq!(diagnostics.len(), 1);
    let diag = &diagnostics[0];
    assert_eq!(diag.rule, RuleId::TypeNoCommentBlock);
    assert_eq!(&*diag.declaration_name, "Foo");
    assert!(diag.message.contains("Class 'Foo'"), "{}", diag.message);
    assert_eq!(&BARE_CLASS[diag.range], "Foo");
}

#[test]
fn test_every_undocumented_declaration_gets_one_finding() {
    let diagnostics = diagnostics_of(BARE_CLASS_WITH_MEMBERS);
    let names: Vec<&str> = diagnostics.iter().map(|d| d.declaration_name.as_str()).collect();
    assert_eq!(names, vec!["Cart", "count", "Cart", "Count", "Find", "Clear"]);
    assert!(diagnostics.iter().all(|d| d.rule.is_no_comment_block()));
    assert_eq!(diagnostics[0].rule, RuleId::TypeNoCommentBlock);
    assert!(diagnostics[1..].iter().all(|d| d.rule == RuleId::MemberNoCommentBlock));
}

#[rstest]
#[case::private_field("    private int hidden;\n")]
#[case::internal_method("    internal void Run() { }\n")]
#[case::protected_property("    protected string Name { get; set; }\n")]
fn test_every_accessibility_is_checked(#[case] member: &str) {
    assert_eq!(
        rules_of(&in_documented_class(member)),
        vec![RuleId::MemberNoCommentBlock]
    );
}

// ============================================================================
// COMPLETENESS GATE
// ============================================================================

#[test]
fn test_summary_only_method() {
    let source = in_documented_class("    /// <summary>Parses s.</summary>\n    public int Bar(string s) => 0;\n");
    let diagnostics = diagnostics_of(&source);
    assert_eq!(
        diagnostics.iter().map(|d| d.rule).collect::<Vec<_>>(),
        vec![
            RuleId::MemberMissingRemarks,
            RuleId::MemberMissingParam,
            RuleId::MemberMissingReturns,
        ]
    );
    assert!(diagnostics[1].message.contains("'s'"));
    assert!(diagnostics.iter().all(|d| d.declaration_name.as_str() == "Bar"));
}

#[rstest]
#[case::with_returns("    /// <summary>M</summary>\n    /// <remarks>功能: x</remarks>\n    /// <returns>none</returns>\n    public void M() { }\n")]
#[case::without_returns("    /// <summary>M</summary>\n    /// <remarks>功能: x</remarks>\n    public void M() { }\n")]
#[case::qualified_void("    /// <summary>M</summary>\n    /// <remarks>功能: x</remarks>\n    public System.Void M() { }\n")]
fn test_void_method_never_needs_returns(#[case] member: &str) {
    let source = in_documented_class(member);
    assert!(!rules_of(&source).contains(&RuleId::MemberMissingReturns));
    assert_clean(&source);
}

#[test]
fn test_member_remarks_need_no_markers() {
    assert_clean(&in_documented_class(
        "    /// <summary>N</summary>\n    /// <remarks>free text</remarks>\n    public int N;\n",
    ));
}

#[test]
fn test_empty_summary_counts_as_missing() {
    let source = in_documented_class(
        "    /// <summary></summary>\n    /// <remarks>功能: x</remarks>\n    public int N;\n",
    );
    assert_eq!(rules_of(&source), vec![RuleId::MemberMissingSummary]);
}

#[test]
fn test_duplicate_remarks_reported_once() {
    let source = in_documented_class(
        "    /// <summary>N</summary>\n    /// <remarks>功能: a</remarks>\n    /// <remarks>功能: b</remarks>\n    public int N;\n",
    );
    let diagnostics = diagnostics_of(&source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, RuleId::MemberDuplicateRemarks);
    let model = model_of(&source);
    let field = model.declarations.iter().find(|d| d.name.as_str() == "N").unwrap();
    assert_eq!(diagnostics[0].range, field.doc.as_ref().unwrap().range);
}

// ============================================================================
// FILE-LEVEL FINDINGS
// ============================================================================

#[test]
fn test_two_enums_one_finding_at_first() {
    let diagnostics = diagnostics_of(TWO_TOP_LEVEL_ENUMS);
    assert_eq!(diagnostics.len(), 1);
    let diag = &diagnostics[0];
    assert_eq!(diag.rule, RuleId::TypeMultiEnumFile);
    assert_eq!(diag.rule.scope(), RuleScope::File);
    assert_eq!(&TWO_TOP_LEVEL_ENUMS[diag.range], "Color");
    assert!(diag.message.contains("'Color', 'Shape'"), "{}", diag.message);
}

#[test]
fn test_conditional_directives_single_advisory() {
    let diagnostics = diagnostics_of(CONDITIONAL_CLASS);
    assert_eq!(diagnostics.len(), 1);
    let diag = &diagnostics[0];
    assert_eq!(diag.rule, RuleId::ConditionalCompilationWarning);
    assert_eq!(diag.severity, Severity::Info);
    assert_eq!(u32::from(diag.range.start()), 0);
}

#[rstest]
#[case(RuleId::TypeNoCommentBlock, "PROJECT_TYPE_NO_COMMENT_BLOCK")]
#[case(RuleId::MemberMissingTypeParam, "PROJECT_MEMBER_MISSING_TYPEPARAM")]
#[case(RuleId::ConditionalCompilationWarning, "PROJECT_CONDITIONAL_COMPILATION_WARNING")]
fn test_rule_ids_are_stable(#[case] rule: RuleId, #[case] id: &str) {
    assert_eq!(rule.as_str(), id);
    assert_eq!(RuleId::parse(id), Some(rule));
}

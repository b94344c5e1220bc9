#![allow(clippy::unwrap_used, clippy::expect_used)]

use docwarden::fix::{
    CollectingObserver, NoopObserver, RejectReason, RepairEvent, match_diagnostic, repair_file,
};
use docwarden::hir::{DeclaredSymbol, SymbolCategory};
use docwarden::{DiagnosticRecord, RuleId, strip_doc_comments};
use rstest::rstest;

use crate::helpers::fix_helpers::{
    SAMPLE_PATH, assert_clean, fix_once, fix_until_stable, in_documented_class, model_of,
    records_of, rules_of,
};
use crate::helpers::source_fixtures::{
    BARE_CLASS, BARE_CLASS_WITH_MEMBERS, CONDITIONAL_CLASS, TWO_TOP_LEVEL_ENUMS,
};

// ============================================================================
// IDEMPOTENCE AND COMPLETENESS
// ============================================================================

#[rstest]
#[case::bare_class(BARE_CLASS)]
#[case::members(BARE_CLASS_WITH_MEMBERS)]
#[case::summary_only(
    "/// <summary>Only a summary.</summary>\npublic class Partial<TKey>\n{\n    /// <summary>Get.</summary>\n    public TKey Get(int index) => default;\n}\n"
)]
#[case::crlf("public class Win\r\n{\r\n    public int Size(int w) => w;\r\n}\r\n")]
fn test_repair_reaches_clean_fixed_point(#[case] source: &str) {
    let (fixed, passes) = fix_until_stable(source, 4);
    assert_clean(&fixed);
    assert!(passes <= 2, "took {passes} passes");
    assert_eq!(fix_once(&fixed), fixed);
}

#[rstest]
#[case::multi_enum(TWO_TOP_LEVEL_ENUMS, RuleId::TypeMultiEnumFile)]
#[case::conditional(CONDITIONAL_CLASS, RuleId::ConditionalCompilationWarning)]
fn test_unrepairable_rules_leave_text_alone(#[case] source: &str, #[case] rule: RuleId) {
    assert_eq!(rules_of(source), vec![rule]);
    let observer = CollectingObserver::new();
    let model = model_of(source);
    let repaired = repair_file(&model, source, &records_of(source), &observer);
    assert_eq!(repaired.text, source);
    assert!(matches!(
        observer.events().as_slice(),
        [(_, RepairEvent::RuleSkipped { .. })]
    ));
}

#[test]
fn test_crlf_is_kept() {
    let fixed = fix_once("public class Win\r\n{\r\n}\r\n");
    assert!(!fixed.replace("\r\n", "").contains('\n'), "{fixed:?}");
}

// ============================================================================
// NO DATA LOSS
// ============================================================================

#[test]
fn test_existing_text_survives_repair() {
    let source = in_documented_class(
        "    // keep this comment\n    /// <summary>Sums <c>a</c> and <c>b</c>.</summary>\n    /// <example>Add(1, 2)</example>\n    public int Add(int a, int b) => a + b;\n",
    );
    let fixed = fix_once(&source);

    for line in source.lines() {
        assert!(fixed.contains(line), "lost {line:?}");
    }
    let stripped = strip_doc_comments(&fixed).text;
    assert_eq!(stripped, strip_doc_comments(&source).text);
}

#[test]
fn test_first_summary_kept_on_duplicates() {
    let source = in_documented_class(
        "    /// <summary>First wins.</summary>\n    /// <remarks>功能: x</remarks>\n    /// <summary>Second loses.</summary>\n    public int N;\n",
    );
    let fixed = fix_once(&source);
    assert!(fixed.contains("First wins."));
    assert!(!fixed.contains("Second loses."));
    assert_clean(&fixed);
}

// ============================================================================
// MATCHING
// ============================================================================

#[test]
fn test_inconsistent_symbol_is_never_repaired() {
    let mut model = model_of(BARE_CLASS);
    model.declarations[0].symbol = Some(DeclaredSymbol::new(SymbolCategory::Field));
    let records = records_of(BARE_CLASS);

    let rule = records[0].rule().unwrap();
    assert!(match_diagnostic(rule, &records[0].message, &model.declarations).is_none());

    let observer = CollectingObserver::new();
    let repaired = repair_file(&model, BARE_CLASS, &records, &observer);
    assert_eq!(repaired.text, BARE_CLASS);
    assert_eq!(repaired.fixes_applied, 0);
    assert!(observer.events().iter().any(|(_, e)| matches!(
        e,
        RepairEvent::MatchRejected {
            reason: RejectReason::InconsistentSymbol {
                expected: SymbolCategory::NamedType,
                found: Some(SymbolCategory::Field),
            },
            ..
        }
    )));
}

#[test]
fn test_record_for_missing_declaration_is_unmatched() {
    let observer = CollectingObserver::new();
    let record = DiagnosticRecord {
        rule_id: RuleId::TypeNoCommentBlock.as_str().to_string(),
        message: "Class 'Gone' has no XML documentation comment block".to_string(),
        file_path: SAMPLE_PATH.to_string(),
        line: 1,
        character: 14,
    };
    let repaired = repair_file(&model_of(BARE_CLASS), BARE_CLASS, &[record], &observer);

    assert!(!repaired.changed());
    assert!(matches!(
        observer.events().as_slice(),
        [(_, RepairEvent::Unmatched { rule: RuleId::TypeNoCommentBlock, .. })]
    ));
}

#[test]
fn test_overloads_each_repaired_once() {
    let source = in_documented_class(
        "    public void Log(string message) { }\n\n    public void Log(string format, int arg) { }\n",
    );
    let model = model_of(&source);
    let records = records_of(&source);
    assert_eq!(records.len(), 2);

    let repaired = repair_file(&model, &source, &records, &NoopObserver);
    assert_eq!(repaired.fixes_applied, 2);
    assert_eq!(repaired.text.matches("/// Log —— [method职责简述]").count(), 2);
    assert!(repaired.text.contains("<param name=\"format\">"));
    assert_clean(&repaired.text);
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use docwarden::fix::template::SECTION_PLACEHOLDER;
use docwarden::fix::{CollectingObserver, PatchOp, RepairEvent, plan_repair};
use docwarden::hir::REMARKS_MARKERS;
use docwarden::{RuleId, repair};

use crate::helpers::fix_helpers::{
    assert_clean, fix_once, fix_once_observed, in_documented_class, model_of, rules_of,
};
use crate::helpers::source_fixtures::{BARE_CLASS, BARE_CLASS_WITH_MEMBERS};

// ============================================================================
// UNDOCUMENTED CLASS
// ============================================================================

#[test]
fn test_bare_class_gets_full_template() {
    let fixed = fix_once(BARE_CLASS);

    assert!(fixed.ends_with(BARE_CLASS));
    assert!(fixed.contains("/// Foo —— [class职责简述]"));
    for marker in REMARKS_MARKERS {
        assert!(fixed.contains(&format!("/// {marker} {SECTION_PLACEHOLDER}")), "{marker}");
    }
    assert!(!fixed.contains("<param"));
    assert!(!fixed.contains("<returns"));
    assert_clean(&fixed);
}

#[test]
fn test_repair_edit_for_single_declaration() {
    let model = model_of(BARE_CLASS);
    let edit = repair(&model.declarations[0], &[RuleId::TypeNoCommentBlock], BARE_CLASS)
        .unwrap()
        .expect("an edit for an undocumented class");
    assert_eq!(u32::from(edit.range.start()), 0);
    assert!(edit.range.is_empty());

    let mut text = BARE_CLASS.to_string();
    edit.apply(&mut text);
    assert_eq!(text, fix_once(BARE_CLASS));
}

#[test]
fn test_nested_members_indented_like_declaration() {
    let fixed = fix_once(BARE_CLASS_WITH_MEMBERS);

    assert!(fixed.contains("    /// <summary>\n    /// Cart —— [class职责简述]\n"));
    assert!(fixed.contains("        /// Find —— [method职责简述]\n"));
    assert!(fixed.contains(
        "        /// <typeparam name=\"T\">[类型参数说明]</typeparam>\n        /// <param name=\"key\">[参数说明]</param>\n        /// <returns>[返回值说明]</returns>\n        public T Find<T>"
    ));
    assert!(fixed.contains("        /// <param name=\"initial\">[参数说明]</param>\n        public Cart(int initial)"));
    assert_clean(&fixed);
}

// ============================================================================
// SUMMARY-ONLY METHOD
// ============================================================================

#[test]
fn test_summary_only_method_gets_missing_tags() {
    let source = in_documented_class(
        "    /// <summary>Parses <paramref name=\"s\"/> into a number.</summary>\n    public int Bar(string s) => 0;\n",
    );
    let observer = CollectingObserver::new();
    let fixed = fix_once_observed(&source, &observer);

    assert!(fixed.contains(
        "    /// <summary>Parses <paramref name=\"s\"/> into a number.</summary>\n    /// <remarks>\n    /// 功能: [待补充]\n    /// </remarks>\n    /// <param name=\"s\">[参数说明]</param>\n    /// <returns>[返回值说明]</returns>\n    public int Bar(string s) => 0;\n"
    ), "{fixed}");
    assert_clean(&fixed);

    let patched: Vec<Vec<PatchOp>> = observer
        .events()
        .into_iter()
        .filter_map(|(_, event)| match event {
            RepairEvent::Patched { ops, .. } => Some(ops),
            _ => None,
        })
        .collect();
    assert_eq!(
        patched,
        vec![vec![PatchOp::InsertRemarks, PatchOp::InsertParams(1), PatchOp::InsertReturns]]
    );
}

#[test]
fn test_plan_repair_only_acts_on_given_rules() {
    let source = in_documented_class("    /// <summary>B</summary>\n    public int Bar(string s) => 0;\n");
    let model = model_of(&source);
    let bar = model.declarations.iter().find(|d| d.name.as_str() == "Bar").unwrap();

    let plan = plan_repair(bar, &[RuleId::MemberMissingReturns], &source)
        .unwrap()
        .unwrap();
    let mut text = source.clone();
    plan.edit.apply(&mut text);
    assert_eq!(
        rules_of(&text),
        vec![RuleId::MemberMissingRemarks, RuleId::MemberMissingParam]
    );
}

// ============================================================================
// DUPLICATE REMARKS
// ============================================================================

#[test]
fn test_duplicate_remarks_keeps_first_verbatim() {
    let first = "    /// <remarks>\n    /// 功能: keeps  <b>spacing</b>\n    /// </remarks>\n";
    let source = in_documented_class(&format!(
        "    /// <summary>N</summary>\n{first}    /// <remarks>功能: dropped</remarks>\n    public int N;\n"
    ));
    let fixed = fix_once(&source);

    assert!(fixed.contains(&format!("    /// <summary>N</summary>\n{first}    public int N;\n")));
    assert!(!fixed.contains("dropped"));
    assert_clean(&fixed);
}

//! Rule engine: the documentation policy.
//!
//! Per-declaration evaluation is a two-gate state machine:
//!
//! 1. **Existence**: a declaration without a documentation block gets exactly
//!    one `*_NO_COMMENT_BLOCK` finding and nothing else.
//! 2. **Completeness**: a declaration with a block is checked for summary,
//!    remarks (with the ten section markers for types), signature tags and
//!    duplicate summary/remarks tags. Types also report the types nested
//!    directly inside them.
//!
//! File-level checks (several top-level enums, conditional compilation) run
//! once per file after all declarations were evaluated.
//!
//! Every level of accessibility is checked; only compiler-synthesized
//! declarations and declarations without a resolvable symbol are skipped.

use rayon::prelude::*;

use super::declarations::{DeclKind, Declaration, FileModel, TypeKind};
use super::diagnostics::{Diagnostic, DiagnosticCollector};

/// Sections every type's `<remarks>` must contain, in template order.
pub const REMARKS_MARKERS: [&str; 10] = [
    "功能:",
    "架构层级:",
    "模块:",
    "继承/实现关系:",
    "依赖:",
    "扩展点:",
    "特性:",
    "重要逻辑:",
    "数据流:",
    "使用示例:",
];

/// The single marker a member's remarks template carries.
pub const MEMBER_REMARKS_MARKER: &str = "功能:";

/// Evaluate one declaration.
pub fn evaluate(decl: &Declaration) -> Vec<Diagnostic> {
    let mut acc = DiagnosticCollector::new();
    evaluate_into(decl, &mut acc);
    acc.into_diagnostics()
}

/// Evaluate a whole file: per-declaration findings in document order, then
/// the file-level checks.
pub fn evaluate_file(model: &FileModel) -> Vec<Diagnostic> {
    evaluate_file_with(model, true)
}

/// Like [`evaluate_file`], optionally without the rayon fan-out.
pub fn evaluate_file_with(model: &FileModel, parallel: bool) -> Vec<Diagnostic> {
    let per_decl: Vec<Vec<Diagnostic>> = if parallel {
        model.declarations.par_iter().map(evaluate).collect()
    } else {
        model.declarations.iter().map(evaluate).collect()
    };

    let mut acc = DiagnosticCollector::new();
    for diag in per_decl.into_iter().flatten() {
        acc.add(diag);
    }
    check_multi_enum(model, &mut acc);
    check_conditional_compilation(model, &mut acc);
    acc.into_diagnostics()
}

fn is_eligible(decl: &Declaration) -> bool {
    decl.symbol.is_some_and(|s| !s.implicitly_declared)
}

fn evaluate_into(decl: &Declaration, acc: &mut DiagnosticCollector) {
    if !is_eligible(decl) {
        return;
    }

    // Gate 1
    let Some(doc) = &decl.doc else {
        acc.no_comment_block(decl);
        return;
    };

    // Gate 2
    if !doc.tags_named("summary").any(|t| t.has_body()) {
        let at = doc.first("summary").map_or(doc.range, |t| t.range);
        acc.missing_summary(decl, at);
    }
    match doc.first("remarks") {
        None => acc.missing_remarks(decl, doc.range),
        Some(remarks) if decl.kind.is_type() => {
            for marker in REMARKS_MARKERS {
                if !remarks.body.contains(marker) {
                    acc.missing_remarks_marker(decl, remarks.range, marker);
                }
            }
        }
        Some(_) => {}
    }

    if decl.kind.requires_param_tags() {
        for param in &decl.parameters {
            if !doc.references("param", &param.name) {
                acc.missing_param(decl, param);
            }
        }
    }
    if decl.kind.requires_signature_tags() {
        for type_param in &decl.type_parameters {
            if !doc.references("typeparam", &type_param.name) {
                acc.missing_type_param(decl, type_param);
            }
        }
        if !decl.returns_void && doc.count("returns") == 0 {
            let at = decl.return_type.as_ref().map_or(decl.name_range, |t| t.range);
            acc.missing_returns(decl, at);
        }
    }

    for tag in ["summary", "remarks"] {
        let count = doc.count(tag);
        if count > 1 {
            acc.duplicate_tag(decl, doc.range, tag, count);
        }
    }

    if decl.kind.is_container() {
        for nested in &decl.nested_types {
            acc.nested_type(decl, nested);
        }
    }
}

fn check_multi_enum(model: &FileModel, acc: &mut DiagnosticCollector) {
    let enums: Vec<&Declaration> = model
        .declarations
        .iter()
        .filter(|d| d.kind == DeclKind::Type(TypeKind::Enum) && d.is_top_level())
        .collect();
    if let [first, _, ..] = enums.as_slice() {
        let names: Vec<&str> = enums.iter().map(|d| d.name.as_str()).collect();
        acc.multi_enum_file(model.file, model.file_name(), first.name_range, &names);
    }
}

fn check_conditional_compilation(model: &FileModel, acc: &mut DiagnosticCollector) {
    let Some(first) = model.directives.first() else {
        return;
    };
    let mut kinds: Vec<&str> = Vec::new();
    for directive in &model.directives {
        let kind = directive.kind.as_str();
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    acc.conditional_compilation(model.file, model.file_name(), first.range, &kinds);
}

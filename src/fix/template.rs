//! Placeholder documentation text.
//!
//! Templates produce line *contents*: the text after `///`. Callers add
//! indentation, the `///` prefix and line breaks.

use crate::hir::{Declaration, MEMBER_REMARKS_MARKER, REMARKS_MARKERS};

pub const SECTION_PLACEHOLDER: &str = "[待补充]";
pub const TYPE_PARAM_PLACEHOLDER: &str = "[类型参数说明]";
pub const PARAM_PLACEHOLDER: &str = "[参数说明]";
pub const RETURNS_PLACEHOLDER: &str = "[返回值说明]";

/// `Foo —— [class职责简述]`
pub fn summary_text(decl: &Declaration) -> String {
    format!("{} —— [{}职责简述]", decl.name, decl.template_kind())
}

pub fn summary_lines(decl: &Declaration) -> Vec<String> {
    vec![
        " <summary>".to_string(),
        format!(" {}", summary_text(decl)),
        " </summary>".to_string(),
    ]
}

pub fn marker_line(marker: &str) -> String {
    format!(" {marker} {SECTION_PLACEHOLDER}")
}

/// Types get every section marker, members only the functional one.
pub fn remarks_lines(decl: &Declaration) -> Vec<String> {
    let markers: &[&str] = if decl.kind.is_type() {
        &REMARKS_MARKERS
    } else {
        &[MEMBER_REMARKS_MARKER]
    };
    let mut lines = Vec::with_capacity(markers.len() + 2);
    lines.push(" <remarks>".to_string());
    lines.extend(markers.iter().map(|m| marker_line(m)));
    lines.push(" </remarks>".to_string());
    lines
}

pub fn type_param_line(name: &str) -> String {
    format!(" <typeparam name=\"{name}\">{TYPE_PARAM_PLACEHOLDER}</typeparam>")
}

pub fn param_line(name: &str) -> String {
    format!(" <param name=\"{name}\">{PARAM_PLACEHOLDER}</param>")
}

pub fn returns_line() -> String {
    format!(" <returns>{RETURNS_PLACEHOLDER}</returns>")
}

/// Every line of a complete block for `decl`, in template order.
pub fn full_block(decl: &Declaration) -> Vec<String> {
    let mut lines = summary_lines(decl);
    lines.extend(remarks_lines(decl));
    if decl.kind.requires_signature_tags() {
        lines.extend(decl.type_parameters.iter().map(|t| type_param_line(&t.name)));
    }
    if decl.kind.requires_param_tags() {
        lines.extend(decl.parameters.iter().map(|p| param_line(&p.name)));
    }
    if decl.kind.requires_signature_tags() && !decl.returns_void {
        lines.push(returns_line());
    }
    lines
}

/// Render contents as `///` lines, each preceded by `indent`.
pub fn render(lines: &[String], indent: &str, newline: &str) -> String {
    lines
        .iter()
        .map(|content| format!("{indent}///{content}"))
        .collect::<Vec<_>>()
        .join(newline)
}

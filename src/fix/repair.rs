//! Incremental repair engine.
//!
//! A declaration without a block gets a complete template (full synthesis).
//! A declaration with a block gets a targeted patch: the block is rebuilt
//! line by line, touching only the tags its diagnostics ask for, and spliced
//! back in place of the old block. Text outside the block is never touched.
//!
//! Patch order inside one block:
//!
//! 1. close an unterminated `<remarks>`
//! 2. drop duplicate `<summary>` / `<remarks>` elements (first one wins)
//! 3. insert or fill `<summary>`
//! 4. insert `<remarks>`
//! 5. complete the remarks section markers
//! 6. insert `<typeparam>`, `<param>` and `<returns>` tags
//! 7. collapse runs of blank `///` lines
//! 8. reject the result if any tag is left open

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use smol_str::SmolStr;

use super::error::FixError;
use super::matcher::NodeMatcher;
use super::observer::{PatchOp, RepairEvent, RepairObserver};
use super::record::DiagnosticRecord;
use super::template;
use crate::base::{TextRange, TextSize};
use crate::core::text_utils::{
    detect_newline, is_tag_name_character, leading_indent, line_start, only_indent_before,
};
use crate::hir::{Declaration, DocBlock, FileModel, REMARKS_MARKERS, RuleId};

/// Replace `range` of a text with `insert`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub insert: String,
}

impl TextEdit {
    pub fn apply(&self, text: &mut String) {
        text.replace_range(std::ops::Range::<usize>::from(self.range), &self.insert);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepairAction {
    Synthesized,
    Patched(Vec<PatchOp>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repair {
    pub edit: TextEdit,
    pub action: RepairAction,
}

/// Repair one declaration for the rules matched to it.
///
/// Returns `Ok(None)` when nothing needs to change.
pub fn repair(
    decl: &Declaration,
    rules: &[RuleId],
    source: &str,
) -> Result<Option<TextEdit>, FixError> {
    Ok(plan_repair(decl, rules, source)?.map(|r| r.edit))
}

/// Like [`repair`], also telling how the edit was produced.
pub fn plan_repair(
    decl: &Declaration,
    rules: &[RuleId],
    source: &str,
) -> Result<Option<Repair>, FixError> {
    plan(decl, rules, source, detect_newline(source))
}

fn plan(
    decl: &Declaration,
    rules: &[RuleId],
    source: &str,
    newline: &str,
) -> Result<Option<Repair>, FixError> {
    match &decl.doc {
        None if rules.iter().any(|r| r.is_no_comment_block()) => {
            Ok(Some(synthesize(decl, source, newline)))
        }
        None => Ok(None),
        Some(doc) => patch(decl, doc, rules, source, newline),
    }
}

// ============================================================================
// Full synthesis
// ============================================================================

fn synthesize(decl: &Declaration, source: &str, newline: &str) -> Repair {
    let start = usize::from(decl.range.start());
    let line = line_start(source, start);
    let lines = template::full_block(decl);

    let edit = if only_indent_before(source, start) {
        let indent = &source[line..start];
        TextEdit {
            range: TextRange::new(offset(line), decl.range.start()),
            insert: format!(
                "{}{newline}{indent}",
                template::render(&lines, indent, newline)
            ),
        }
    } else {
        // Code precedes the declaration on its line: move it to a new line.
        let indent = leading_indent(&source[line..]);
        let trimmed = source[..start].trim_end_matches([' ', '\t']).len();
        TextEdit {
            range: TextRange::new(offset(trimmed), decl.range.start()),
            insert: format!(
                "{newline}{}{newline}{indent}",
                template::render(&lines, indent, newline)
            ),
        }
    };
    Repair {
        edit,
        action: RepairAction::Synthesized,
    }
}

fn offset(at: usize) -> TextSize {
    TextSize::from(at as u32)
}

// ============================================================================
// Targeted patch
// ============================================================================

fn patch(
    decl: &Declaration,
    doc: &DocBlock,
    rules: &[RuleId],
    source: &str,
    newline: &str,
) -> Result<Option<Repair>, FixError> {
    let relevant: Vec<RuleId> = rules
        .iter()
        .copied()
        .filter(|r| r.is_repairable() && !r.is_no_comment_block())
        .collect();
    if relevant.is_empty() {
        return Ok(None);
    }

    let start = usize::from(doc.range.start());
    if !only_indent_before(source, start) {
        return Err(FixError::malformed(
            decl.name.as_str(),
            "documentation block does not start its own line",
        ));
    }
    let region = TextRange::new(offset(line_start(source, start)), doc.range.end());

    let mut block = Block::new(doc, source);
    let mut ops = Vec::new();

    if block.close_remarks() > 0 {
        ops.push(PatchOp::CloseRemarks);
    }
    block.validate(decl)?;

    let duplicates = [
        ("summary", [RuleId::TypeDuplicateSummary, RuleId::MemberDuplicateSummary]),
        ("remarks", [RuleId::TypeDuplicateRemarks, RuleId::MemberDuplicateRemarks]),
    ];
    for (tag, flagged) in duplicates {
        if has_any(&relevant, &flagged) {
            let removed = block.deduplicate(tag);
            if removed > 0 {
                ops.push(PatchOp::Deduplicate {
                    tag: SmolStr::new_static(tag),
                    removed,
                });
            }
        }
    }

    if has_any(&relevant, &[RuleId::TypeMissingSummary, RuleId::MemberMissingSummary])
        && let Some(op) = block.ensure_summary(decl)
    {
        ops.push(op);
    }
    if has_any(&relevant, &[RuleId::TypeMissingRemarks, RuleId::MemberMissingRemarks])
        && block.ensure_remarks(decl)
    {
        ops.push(PatchOp::InsertRemarks);
    }

    // Marker completion and deduplication must not compose in one pass.
    let only_duplicates = relevant.iter().all(|r| r.is_duplicate());
    if has_any(&relevant, &[RuleId::TypeMissingRemarksTag])
        && !has_any(&relevant, &[RuleId::TypeDuplicateRemarks])
        && !only_duplicates
    {
        let added = block.complete_markers();
        if added > 0 {
            ops.push(PatchOp::CompleteMarkers(added));
        }
    }

    if has_any(&relevant, &[RuleId::MemberMissingTypeParam]) {
        let added = block.insert_type_params(decl);
        if added > 0 {
            ops.push(PatchOp::InsertTypeParams(added));
        }
    }
    if has_any(&relevant, &[RuleId::MemberMissingParam]) {
        let added = block.insert_params(decl);
        if added > 0 {
            ops.push(PatchOp::InsertParams(added));
        }
    }
    if has_any(&relevant, &[RuleId::MemberMissingReturns]) && block.insert_returns(decl) {
        ops.push(PatchOp::InsertReturns);
    }

    if ops.is_empty() {
        return Ok(None);
    }
    if block.collapse_blank_lines() {
        ops.push(PatchOp::CollapseBlankLines);
    }
    block.validate(decl)?;

    let text = block.render(newline);
    if text == source[region] {
        return Ok(None);
    }
    Ok(Some(Repair {
        edit: TextEdit {
            range: region,
            insert: text,
        },
        action: RepairAction::Patched(ops),
    }))
}

fn has_any(rules: &[RuleId], wanted: &[RuleId]) -> bool {
    rules.iter().any(|r| wanted.contains(r))
}

/// Tags that start a new top-level section of a block.
const TOP_LEVEL_TAGS: &[&str] = &[
    "summary",
    "remarks",
    "param",
    "typeparam",
    "returns",
    "value",
    "example",
    "exception",
    "seealso",
    "permission",
    "inheritdoc",
    "include",
];

static SUMMARY_ELEMENT: LazyLock<Regex> = LazyLock::new(|| element_pattern("summary"));
static REMARKS_ELEMENT: LazyLock<Regex> = LazyLock::new(|| element_pattern("remarks"));

fn element_pattern(tag: &str) -> Regex {
    Regex::new(&format!(
        r"(?is)<{tag}\b[^>]*?/>|<{tag}\b[^>]*>.*?</{tag}\s*>"
    ))
    .expect("element pattern is valid")
}

fn is_blank(token: &str) -> bool {
    token.strip_prefix("///").unwrap_or(token).trim().is_empty()
}

fn starts_top_level_tag(token: &str) -> bool {
    let content = token.strip_prefix("///").unwrap_or(token).trim_start();
    let Some(rest) = content.strip_prefix('<') else {
        return false;
    };
    let name: String = rest
        .chars()
        .take_while(|&c| is_tag_name_character(c))
        .collect();
    TOP_LEVEL_TAGS.contains(&name.to_ascii_lowercase().as_str())
}

#[derive(Clone, Debug)]
struct Line {
    indent: String,
    /// The whole `///...` token.
    token: String,
}

/// The lines of one block while it is being patched.
///
/// Tags are located by rescanning a virtual text: the tokens joined with
/// `\n`, without indentation. Offsets into it map back to `(line, column)`.
#[derive(Debug)]
struct Block {
    lines: Vec<Line>,
    /// Indentation for inserted lines.
    indent: String,
}

impl Block {
    fn new(doc: &DocBlock, source: &str) -> Self {
        let lines: Vec<Line> = doc
            .lines
            .iter()
            .map(|l| {
                let start = usize::from(l.range.start());
                Line {
                    indent: source[line_start(source, start)..start].to_string(),
                    token: format!("///{}", l.content),
                }
            })
            .collect();
        let indent = lines.first().map(|l| l.indent.clone()).unwrap_or_default();
        Self { lines, indent }
    }

    fn virtual_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.token.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn scan(&self) -> Option<DocBlock> {
        let mut at = 0usize;
        let tokens: Vec<(TextSize, &str)> = self
            .lines
            .iter()
            .map(|l| {
                let start = offset(at);
                at += l.token.len() + 1;
                (start, l.token.as_str())
            })
            .collect();
        DocBlock::from_lines(tokens)
    }

    /// `(line, column)` of a virtual offset.
    fn position(&self, at: usize) -> (usize, usize) {
        let mut start = 0;
        for (i, line) in self.lines.iter().enumerate() {
            let end = start + line.token.len();
            if at <= end {
                return (i, at.saturating_sub(start));
            }
            start = end + 1;
        }
        let last = self.lines.len().saturating_sub(1);
        (last, self.lines.last().map_or(0, |l| l.token.len()))
    }

    fn line_of(&self, at: TextSize) -> usize {
        self.position(usize::from(at)).0
    }

    /// Replace a virtual range, merging the lines it spans into one.
    ///
    /// The merged line is dropped when nothing but `///` is left of it.
    fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        let (first, head) = self.position(start);
        let (last, tail) = self.position(end);
        let merged = format!(
            "{}{}{}",
            &self.lines[first].token[..head],
            replacement,
            &self.lines[last].token[tail..]
        );
        let line = Line {
            indent: self.lines[first].indent.clone(),
            token: merged,
        };
        if replacement.is_empty() && is_blank(&line.token) {
            self.lines.drain(first..=last);
        } else {
            self.lines.splice(first..=last, [line]);
        }
    }

    fn insert(&mut self, at: usize, contents: Vec<String>) {
        let lines = contents.into_iter().map(|content| Line {
            indent: self.indent.clone(),
            token: format!("///{content}"),
        });
        let at = at.min(self.lines.len());
        self.lines.splice(at..at, lines);
    }

    /// Line index just below the last tag named by the first present anchor.
    fn after_last(&self, doc: &DocBlock, anchors: &[&str]) -> usize {
        anchors
            .iter()
            .find_map(|name| doc.tags_named(name).last())
            .map_or(self.lines.len(), |t| self.line_of(t.range.end()) + 1)
    }

    fn close_remarks(&mut self) -> usize {
        let mut closed = 0;
        while closed < self.lines.len() {
            let Some(doc) = self.scan() else { break };
            let Some(open) = doc.tags_named("remarks").find(|t| !t.closed) else {
                break;
            };
            let from = self.line_of(open.range.start());
            let at = self
                .lines
                .iter()
                .enumerate()
                .skip(from + 1)
                .find(|(_, l)| starts_top_level_tag(&l.token))
                .map_or(self.lines.len(), |(i, _)| i);
            self.insert(at, vec![" </remarks>".to_string()]);
            closed += 1;
        }
        closed
    }

    fn deduplicate(&mut self, tag: &str) -> usize {
        let pattern: &Regex = if tag == "summary" {
            &SUMMARY_ELEMENT
        } else {
            &REMARKS_ELEMENT
        };
        let text = self.virtual_text();
        let spans: Vec<(usize, usize)> = pattern
            .find_iter(&text)
            .map(|m| (m.start(), m.end()))
            .collect();
        for &(start, end) in spans.iter().skip(1).rev() {
            self.splice(start, end, "");
        }
        spans.len().saturating_sub(1)
    }

    fn ensure_summary(&mut self, decl: &Declaration) -> Option<PatchOp> {
        let doc = self.scan()?;
        let Some(first) = doc.first("summary") else {
            self.insert(0, template::summary_lines(decl));
            return Some(PatchOp::InsertSummary);
        };
        if doc.tags_named("summary").any(|t| t.has_body()) {
            return None;
        }
        self.splice(
            usize::from(first.range.start()),
            usize::from(first.range.end()),
            &format!("<summary>{}</summary>", template::summary_text(decl)),
        );
        Some(PatchOp::FillSummary)
    }

    fn ensure_remarks(&mut self, decl: &Declaration) -> bool {
        let Some(doc) = self.scan() else {
            return false;
        };
        if doc.count("remarks") > 0 {
            return false;
        }
        let at = doc
            .first("summary")
            .map_or(0, |s| self.line_of(s.range.end()) + 1);
        self.insert(at, template::remarks_lines(decl));
        true
    }

    fn complete_markers(&mut self) -> usize {
        let Some(doc) = self.scan() else { return 0 };
        let mut remarks = doc.tags_named("remarks");
        let (Some(remarks), None) = (remarks.next(), remarks.next()) else {
            return 0;
        };
        let missing: Vec<String> = REMARKS_MARKERS
            .iter()
            .filter(|m| !remarks.body.contains(*m))
            .map(|m| template::marker_line(m))
            .collect();
        if missing.is_empty() || !remarks.closed {
            return 0;
        }

        let text = self.virtual_text();
        let (start, end) = (
            usize::from(remarks.range.start()),
            usize::from(remarks.range.end()),
        );
        let close = match text[start..end].rfind("</") {
            Some(i) => start + i,
            None => {
                // Self-closing `<remarks/>`: open it up so markers have a body to go in.
                self.splice(start, end, "<remarks></remarks>");
                start + "<remarks>".len()
            }
        };
        let (line, column) = self.position(close);
        let at = if is_blank(&self.lines[line].token[..column]) {
            line
        } else {
            self.split_line(line, column);
            line + 1
        };
        let added = missing.len();
        self.insert(at, missing);
        added
    }

    /// Move everything from `column` on to a new line below.
    fn split_line(&mut self, line: usize, column: usize) {
        let token = std::mem::take(&mut self.lines[line].token);
        let tail = Line {
            indent: self.lines[line].indent.clone(),
            token: format!("/// {}", &token[column..]),
        };
        self.lines[line].token = token[..column].trim_end().to_string();
        self.lines.insert(line + 1, tail);
    }

    fn insert_type_params(&mut self, decl: &Declaration) -> usize {
        let Some(doc) = self.scan() else { return 0 };
        let missing: Vec<String> = decl
            .type_parameters
            .iter()
            .filter(|t| !doc.references("typeparam", &t.name))
            .map(|t| template::type_param_line(&t.name))
            .collect();
        let added = missing.len();
        if added > 0 {
            let at = self.after_last(&doc, &["typeparam", "remarks", "summary"]);
            self.insert(at, missing);
        }
        added
    }

    fn insert_params(&mut self, decl: &Declaration) -> usize {
        let Some(doc) = self.scan() else { return 0 };
        let missing: Vec<String> = decl
            .parameters
            .iter()
            .filter(|p| !doc.references("param", &p.name))
            .map(|p| template::param_line(&p.name))
            .collect();
        let added = missing.len();
        if added > 0 {
            let at = self.after_last(&doc, &["param", "typeparam", "remarks", "summary"]);
            self.insert(at, missing);
        }
        added
    }

    fn insert_returns(&mut self, decl: &Declaration) -> bool {
        let Some(doc) = self.scan() else {
            return false;
        };
        if decl.returns_void || doc.count("returns") > 0 {
            return false;
        }
        let at = self.after_last(&doc, &["param", "typeparam"]);
        self.insert(at, vec![template::returns_line()]);
        true
    }

    fn collapse_blank_lines(&mut self) -> bool {
        let before = self.lines.len();
        let mut previous_blank = false;
        self.lines.retain(|l| {
            let blank = is_blank(&l.token);
            let keep = !(blank && previous_blank);
            previous_blank = blank;
            keep
        });
        self.lines.len() != before
    }

    fn validate(&self, decl: &Declaration) -> Result<(), FixError> {
        let doc = self
            .scan()
            .ok_or_else(|| FixError::malformed(decl.name.as_str(), "empty documentation block"))?;
        match doc.tags.iter().find(|t| !t.closed) {
            Some(open) => Err(FixError::malformed(
                decl.name.as_str(),
                format!("unclosed <{}> tag", open.name),
            )),
            None => Ok(()),
        }
    }

    fn render(&self, newline: &str) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}{}", l.indent, l.token))
            .collect::<Vec<_>>()
            .join(newline)
    }
}

// ============================================================================
// Whole-file repair
// ============================================================================

/// Outcome of repairing one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileRepair {
    pub text: String,
    /// Declarations whose documentation changed.
    pub fixes_applied: usize,
    /// Declarations whose repair was abandoned.
    pub abandoned: usize,
}

impl FileRepair {
    pub fn changed(&self) -> bool {
        self.fixes_applied > 0
    }
}

/// Match `records` to the declarations of `model` and repair them.
///
/// The file is analyzed once and rewritten once: every edit is computed
/// against `source`, then all edits are spliced back to front.
pub fn repair_file(
    model: &FileModel,
    source: &str,
    records: &[DiagnosticRecord],
    observer: &dyn RepairObserver,
) -> FileRepair {
    let path = &*model.path;
    let mut matcher = NodeMatcher::new(path, &model.declarations, observer);
    let mut matched: IndexMap<usize, Vec<RuleId>> = IndexMap::new();
    for record in records {
        let Some(rule) = record.rule() else { continue };
        if let Some(index) = matcher.match_one(rule, &record.message) {
            matched.entry(index).or_default().push(rule);
        }
    }

    let newline = detect_newline(source);
    let mut abandoned = 0;
    let mut edits: Vec<(SmolStr, TextEdit)> = Vec::new();
    for (&index, rules) in &matched {
        let decl = &model.declarations[index];
        match plan(decl, rules, source, newline) {
            Ok(Some(repair)) => {
                let event = match repair.action {
                    RepairAction::Synthesized => RepairEvent::Synthesized {
                        declaration: decl.name.clone(),
                    },
                    RepairAction::Patched(ops) => RepairEvent::Patched {
                        declaration: decl.name.clone(),
                        ops,
                    },
                };
                observer.on_event(path, &event);
                edits.push((decl.name.clone(), repair.edit));
            }
            Ok(None) => {}
            Err(err) => {
                abandoned += 1;
                observer.on_event(
                    path,
                    &RepairEvent::Abandoned {
                        declaration: decl.name.clone(),
                        reason: err.to_string(),
                    },
                );
            }
        }
    }

    edits.sort_by_key(|(_, edit)| std::cmp::Reverse(edit.range.start()));
    let mut text = source.to_string();
    let mut fixes_applied = 0;
    let mut floor = TextSize::of(source);
    for (declaration, edit) in edits {
        if edit.range.end() > floor {
            abandoned += 1;
            observer.on_event(
                path,
                &RepairEvent::Abandoned {
                    declaration,
                    reason: "edit overlaps another repair".to_string(),
                },
            );
            continue;
        }
        floor = edit.range.start();
        edit.apply(&mut text);
        fixes_applied += 1;
    }

    FileRepair {
        text,
        fixes_applied,
        abandoned,
    }
}

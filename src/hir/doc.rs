//! Documentation block model.
//!
//! A [`DocBlock`] is the structured view of the `///` lines in front of a
//! declaration: the raw lines with their source ranges, and the top-level
//! XML tags found in their concatenated content. Nothing here validates the
//! documentation schema; counting and checking tags is the rule engine's job.

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};
use crate::core::text_utils::{is_identifier_start, is_tag_name_character};

/// One `///` line of a documentation block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocLine {
    /// Range of the whole `///...` token.
    pub range: TextRange,
    /// Text after the `///` prefix.
    pub content: String,
}

/// A top-level XML element in a documentation block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased element name.
    pub name: SmolStr,
    /// Value of the `name` attribute (`param`, `typeparam`).
    pub attribute_name: Option<String>,
    /// Inner text with `///` prefixes removed, each line trimmed.
    pub body: String,
    /// From `<` of the opening tag to `>` of the closing tag.
    pub range: TextRange,
    /// `false` when the element is never closed.
    pub closed: bool,
}

impl Tag {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocBlock {
    pub lines: Vec<DocLine>,
    pub tags: Vec<Tag>,
    /// From the first `///` to the end of the last doc line.
    pub range: TextRange,
}

impl DocBlock {
    /// Build a block from `///` tokens given as `(start offset, token text)`.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = (TextSize, &'a str)>) -> Option<Self> {
        let lines: Vec<DocLine> = lines
            .into_iter()
            .map(|(start, text)| DocLine {
                range: TextRange::at(start, TextSize::of(text)),
                content: text.strip_prefix("///").unwrap_or(text).to_string(),
            })
            .collect();
        let first = lines.first()?.range.start();
        let last = lines.last()?.range.end();
        let tags = scan_tags(&lines);
        Some(Self {
            lines,
            tags,
            range: TextRange::new(first, last),
        })
    }

    /// Tags with the given (case-insensitive) name, in document order.
    pub fn tags_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Tag> {
        self.tags.iter().filter(move |t| t.is(name))
    }

    pub fn first(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.is(name))
    }

    pub fn count(&self, name: &str) -> usize {
        self.tags_named(name).count()
    }

    /// Whether some `<kind name="...">` tag references `target`.
    pub fn references(&self, kind: &str, target: &str) -> bool {
        self.tags_named(kind)
            .any(|t| t.attribute_name.as_deref() == Some(target))
    }

    /// All opened tags are closed.
    pub fn is_well_formed(&self) -> bool {
        self.tags.iter().all(|t| t.closed)
    }

    /// Concatenated line contents, joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Tag scanning
// ============================================================================

/// Maps positions in the joined content back to source offsets.
struct ContentMap {
    /// `(index in joined content, absolute offset)` of each line's content start.
    starts: Vec<(usize, TextSize)>,
}

impl ContentMap {
    fn offset(&self, index: usize) -> TextSize {
        let line = match self.starts.binary_search_by_key(&index, |(i, _)| *i) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let (joined, absolute) = self.starts[line];
        absolute + TextSize::from((index - joined) as u32)
    }
}

fn scan_tags(lines: &[DocLine]) -> Vec<Tag> {
    let mut content = String::new();
    let mut starts = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push('\n');
        }
        starts.push((content.len(), line.range.start() + TextSize::of("///")));
        content.push_str(&line.content);
    }
    let map = ContentMap { starts };

    let mut tags = Vec::new();
    let mut pos = 0;
    while let Some(found) = content[pos..].find('<') {
        let open = pos + found;
        let Some((name, name_end)) = tag_name(&content, open + 1) else {
            pos = open + 1;
            continue;
        };
        let Some(gt) = content[name_end..].find('>').map(|i| name_end + i) else {
            // Opening tag never terminated
            tags.push(Tag {
                name,
                attribute_name: None,
                body: String::new(),
                range: TextRange::new(map.offset(open), map.offset(content.len())),
                closed: false,
            });
            break;
        };
        let attributes = &content[name_end..gt];
        let attribute_name = name_attribute(attributes);

        if attributes.trim_end().ends_with('/') {
            tags.push(Tag {
                name,
                attribute_name,
                body: String::new(),
                range: TextRange::new(map.offset(open), map.offset(gt + 1)),
                closed: true,
            });
            pos = gt + 1;
            continue;
        }

        let (body_end, end, closed) = match find_close(&content, gt + 1, &name) {
            Some((close_start, close_end)) => (close_start, close_end, true),
            None => (content.len(), content.len(), false),
        };
        tags.push(Tag {
            name,
            attribute_name,
            body: clean_body(&content[gt + 1..body_end]),
            range: TextRange::new(map.offset(open), map.offset(end)),
            closed,
        });
        pos = end;
    }
    tags
}

/// Read a tag name starting at `at`, returning the lowercased name and its end.
fn tag_name(content: &str, at: usize) -> Option<(SmolStr, usize)> {
    let rest = content.get(at..)?;
    let first = rest.chars().next()?;
    if !is_identifier_start(first) {
        return None;
    }
    let len = rest
        .find(|c: char| !is_tag_name_character(c))
        .unwrap_or(rest.len());
    Some((SmolStr::new(rest[..len].to_ascii_lowercase()), at + len))
}

/// `name="x"` or `name='x'` inside an opening tag.
fn name_attribute(attributes: &str) -> Option<String> {
    let mut rest = attributes;
    while let Some(i) = rest.find("name") {
        let before_ok = rest[..i]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace());
        let after = rest[i + 4..].trim_start();
        if before_ok && let Some(value) = after.strip_prefix('=') {
            let value = value.trim_start();
            let quote = value.chars().next()?;
            if quote == '"' || quote == '\'' {
                let inner = &value[1..];
                let end = inner.find(quote)?;
                return Some(inner[..end].trim().to_string());
            }
        }
        rest = &rest[i + 4..];
    }
    None
}

/// Find the `</name>` closing the element opened before `from`, honouring
/// nested elements of the same name. Returns `(close start, close end)`.
fn find_close(content: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut pos = from;
    while let Some(found) = content[pos..].find('<') {
        let at = pos + found;
        let rest = &content[at + 1..];
        if let Some(close) = rest.strip_prefix('/') {
            if starts_with_name(close, name) {
                let after = &close[name.len()..];
                if let Some(gt) = after.find('>')
                    && after[..gt].trim().is_empty()
                {
                    depth -= 1;
                    if depth == 0 {
                        return Some((at, at + 2 + name.len() + gt + 1));
                    }
                }
            }
        } else if starts_with_name(rest, name) {
            let after = &rest[name.len()..];
            let self_closing = after
                .find('>')
                .is_some_and(|gt| after[..gt].trim_end().ends_with('/'));
            if !self_closing {
                depth += 1;
            }
        }
        pos = at + 1;
    }
    None
}

/// Case-insensitive `text` starts with tag `name` followed by a name boundary.
fn starts_with_name(text: &str, name: &str) -> bool {
    text.get(..name.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(name))
        && text[name.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_tag_name_character(c))
}

fn clean_body(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

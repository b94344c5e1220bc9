//! Block stripping: remove every documentation block from a file.
//!
//! The tree is rebuilt bottom-up from the green nodes; a `///` line that
//! stands on its own is dropped together with its indentation and line
//! break, one that trails code loses only itself and the whitespace before
//! it. Ordinary comments are kept.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use crate::parser::{SyntaxElement, SyntaxKind, SyntaxNode, parse};

/// Result of stripping one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripResult {
    pub text: String,
    /// Documentation lines removed.
    pub removed_lines: usize,
}

impl StripResult {
    pub fn changed(&self) -> bool {
        self.removed_lines > 0
    }
}

pub fn strip_doc_comments(text: &str) -> StripResult {
    let root = parse(text).syntax();
    let mut removed_lines = 0;
    let green = transform(&root, &mut removed_lines);
    StripResult {
        text: SyntaxNode::new_root(green).to_string(),
        removed_lines,
    }
}

fn transform(node: &SyntaxNode, removed: &mut usize) -> GreenNode {
    let children: Vec<SyntaxElement> = node.children_with_tokens().collect();
    let is_root = node.parent().is_none();
    let mut out: Vec<NodeOrToken<GreenNode, GreenToken>> = Vec::with_capacity(children.len());
    let mut skip_newline = false;

    for (i, child) in children.iter().enumerate() {
        match child {
            NodeOrToken::Node(n) => {
                skip_newline = false;
                out.push(NodeOrToken::Node(transform(n, removed)));
            }
            NodeOrToken::Token(t) if t.kind() == SyntaxKind::DOC_COMMENT => {
                *removed += 1;
                let kind_at = |back: usize| {
                    i.checked_sub(back)
                        .and_then(|j| children.get(j))
                        .map(|e| e.kind())
                };
                let indented = kind_at(1) == Some(SyntaxKind::WHITESPACE);
                if indented {
                    out.pop();
                }
                let before = kind_at(if indented { 2 } else { 1 });
                skip_newline = match before {
                    Some(kind) => kind == SyntaxKind::NEWLINE,
                    None => is_root,
                };
            }
            NodeOrToken::Token(t) => {
                if skip_newline && t.kind() == SyntaxKind::NEWLINE {
                    skip_newline = false;
                    continue;
                }
                skip_newline = false;
                out.push(NodeOrToken::Token(t.green().to_owned()));
            }
        }
    }
    GreenNode::new(node.kind().into(), out)
}

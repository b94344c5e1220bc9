//! Text utilities shared by the documentation scanner and the repair engine.
//!
//! Identifier checks follow Unicode's XID classes (the same classes C# builds
//! its identifier grammar on), via `unicode-ident`.

/// Check if a character can start an identifier (letter or underscore).
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Check if a character can continue an identifier.
#[inline]
pub fn is_identifier_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Check if a character may appear in an XML tag name.
#[inline]
pub fn is_tag_name_character(c: char) -> bool {
    is_identifier_continue(c) || c == ':' || c == '-' || c == '.'
}

/// Check if a whole string is a plain identifier.
///
/// # Example
/// ```
/// use docwarden::core::text_utils::is_identifier;
///
/// assert!(is_identifier("_value"));
/// assert!(is_identifier("café"));
/// assert!(!is_identifier("2nd"));
/// assert!(!is_identifier(""));
/// ```
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_continue),
        _ => false,
    }
}

/// The newline sequence a file predominantly uses.
///
/// Counts `\r\n` against bare `\n`; ties and files without any line break
/// fall back to `\n`.
pub fn detect_newline(text: &str) -> &'static str {
    let crlf = text.matches("\r\n").count();
    let lf = text.matches('\n').count() - crlf;
    if crlf > lf { "\r\n" } else { "\n" }
}

/// Byte offset of the start of the line containing `offset`.
pub fn line_start(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text[..offset]
        .rfind(['\n', '\r'])
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Byte offset just past the line terminator of the line containing `offset`.
///
/// Returns `text.len()` for the last line when it has no terminator.
pub fn line_end_inclusive(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    match text[offset..].find(['\n', '\r']) {
        Some(i) => {
            let at = offset + i;
            if text[at..].starts_with("\r\n") {
                at + 2
            } else {
                at + 1
            }
        }
        None => text.len(),
    }
}

/// The run of spaces and tabs at the start of a line.
pub fn leading_indent(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Check whether `text[..offset]` on the current line is only indentation.
pub fn only_indent_before(text: &str, offset: usize) -> bool {
    let start = line_start(text, offset);
    text[start..offset.min(text.len())]
        .chars()
        .all(|c| c == ' ' || c == '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_characters() {
        assert!(is_identifier_start('a'));
        assert!(is_identifier_start('_'));
        assert!(is_identifier_start('α'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_continue('1'));
        assert!(!is_identifier_continue(' '));
        assert!(is_tag_name_character(':'));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Foo"));
        assert!(is_identifier("foo_bar2"));
        assert!(!is_identifier("foo bar"));
        assert!(!is_identifier("9lives"));
    }

    #[test]
    fn test_detect_newline() {
        assert_eq!(detect_newline("a\r\nb\r\nc\n"), "\r\n");
        assert_eq!(detect_newline("a\nb\r\n"), "\n");
        assert_eq!(detect_newline("no breaks"), "\n");
    }

    #[test]
    fn test_line_bounds() {
        let text = "first\r\n    second\nthird";
        assert_eq!(line_start(text, 0), 0);
        assert_eq!(line_start(text, 11), 7);
        assert_eq!(line_end_inclusive(text, 0), 7);
        assert_eq!(line_end_inclusive(text, 9), 18);
        assert_eq!(line_end_inclusive(text, 20), text.len());
    }

    #[test]
    fn test_indentation() {
        assert_eq!(leading_indent("\t  x"), "\t  ");
        assert_eq!(leading_indent("x"), "");
        let text = "class C\n    void M();";
        assert!(only_indent_before(text, 12));
        assert!(!only_indent_before(text, 17));
    }
}

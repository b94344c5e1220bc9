#![allow(clippy::unwrap_used)]

use docwarden::parser::{SyntaxKind, parse};
use rstest::rstest;

use crate::helpers::source_fixtures::{
    BARE_CLASS_WITH_MEMBERS, CONDITIONAL_CLASS, TWO_TOP_LEVEL_ENUMS,
};

#[rstest]
#[case::members(BARE_CLASS_WITH_MEMBERS)]
#[case::enums(TWO_TOP_LEVEL_ENUMS)]
#[case::directives(CONDITIONAL_CLASS)]
#[case::crlf("/// <summary>A</summary>\r\nclass A\r\n{\r\n    int x;\r\n}\r\n")]
#[case::file_scoped_namespace("namespace Shop;\n\npublic record Item(string Name);\n")]
fn test_round_trip(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "{:?}", parse.errors);
    assert_eq!(parse.syntax().to_string(), source);
}

#[rstest]
#[case::missing_enum_body("enum E\n")]
#[case::stray_token("class A { } )\n")]
fn test_round_trip_with_errors(#[case] source: &str) {
    let parse = parse(source);
    assert!(!parse.ok());
    assert_eq!(parse.syntax().to_string(), source);
}

#[test]
fn test_doc_lines_are_tokens() {
    let parse = parse("/// <summary>A</summary>\n//// not doc\nclass A { }\n");
    let kinds: Vec<SyntaxKind> = parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .map(|t| t.kind())
        .filter(|k| matches!(k, SyntaxKind::DOC_COMMENT | SyntaxKind::LINE_COMMENT))
        .collect();
    assert_eq!(kinds, vec![SyntaxKind::DOC_COMMENT, SyntaxKind::LINE_COMMENT]);
}

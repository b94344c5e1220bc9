use super::*;
use crate::parser::parse;

fn source_file(source: &str) -> SourceFile {
    SourceFile::cast(parse(source).syntax()).unwrap()
}

fn first_type(file: &SourceFile) -> TypeDecl {
    file.syntax()
        .descendants()
        .find_map(TypeDecl::cast)
        .unwrap()
}

#[test]
fn test_type_decl_accessors() {
    let file = source_file("public sealed class Repo<TKey, TValue> : IRepo where TKey : notnull { }");
    let class = first_type(&file);
    assert_eq!(class.kind(), SyntaxKind::CLASS_DECL);
    assert_eq!(class.name().unwrap().text(), "Repo");
    let params: Vec<_> = class
        .type_params()
        .unwrap()
        .type_params()
        .filter_map(|p| p.name())
        .map(|n| n.text())
        .collect();
    assert_eq!(params, vec!["TKey", "TValue"]);
    assert_eq!(
        class.modifiers(),
        vec![SyntaxKind::PUBLIC_KW, SyntaxKind::SEALED_KW]
    );
}

#[test]
fn test_member_decl_accessors() {
    let file = source_file("class C { protected internal static int Sum(int a, params int[] rest) => 0; }");
    let class = first_type(&file);
    let members = class.members();
    let Member::Member(method) = &members[0] else {
        panic!("expected member");
    };
    assert_eq!(method.kind(), SyntaxKind::METHOD_DECL);
    assert_eq!(method.name().unwrap().text(), "Sum");
    assert_eq!(method.return_type().unwrap().text(), "int");
    let params: Vec<_> = method
        .params()
        .unwrap()
        .params()
        .filter_map(|p| p.name())
        .map(|n| n.text())
        .collect();
    assert_eq!(params, vec!["a", "rest"]);
}

#[test]
fn test_type_ref_text_drops_trivia() {
    let file = source_file("class C { System . Collections.Generic.List< int > Items; }");
    let field = file
        .syntax()
        .descendants()
        .find_map(MemberDecl::cast)
        .unwrap();
    assert_eq!(
        field.type_ref().unwrap().text(),
        "System.Collections.Generic.List<int>"
    );
    let names: Vec<_> = field
        .declarators()
        .filter_map(|d| d.name())
        .map(|n| n.text())
        .collect();
    assert_eq!(names, vec!["Items"]);
}

#[test]
fn test_using_alias() {
    let file = source_file("using Nothing = global::System.Void;\nusing System;\n");
    let aliases: Vec<_> = file.usings().filter_map(|u| u.alias()).collect();
    assert_eq!(
        aliases,
        vec![("Nothing".to_string(), "global::System.Void".to_string())]
    );
}

#[test]
fn test_namespace_members() {
    let file = source_file("namespace A.B { class X { } enum Y { } }");
    let Member::Namespace(ns) = file.members().next().unwrap() else {
        panic!("expected namespace");
    };
    assert_eq!(ns.name().as_deref(), Some("A.B"));
    assert_eq!(ns.members().len(), 2);
}

#[test]
fn test_verbatim_name() {
    let file = source_file("class @event { }");
    assert_eq!(first_type(&file).name().unwrap().text(), "event");
}

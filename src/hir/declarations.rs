//! Declaration model: the documentable things in a file.
//!
//! [`build_file_model`] parses a file and flattens every type and member
//! declaration into a [`Declaration`], in document order. Declarations are
//! plain data: they are rebuilt on every parse and never mutated. Repairs
//! produce new text, which is parsed again.

use std::path::Path;
use std::sync::Arc;

use smol_str::SmolStr;

use super::doc::DocBlock;
use super::semantic::{DeclaredSymbol, SemanticModel, SymbolCategory, VoidOracle};
use crate::base::{FileId, TextRange};
use crate::parser::{
    self, AstNode, Member, MemberDecl, SourceFile, SyntaxError, SyntaxKind, SyntaxNode, SyntaxToken,
    TypeDecl,
};

// ============================================================================
// KINDS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Property,
    Field,
    Event,
    Constructor,
    Destructor,
    Indexer,
    Operator,
    ConversionOperator,
}

/// Closed set of declaration kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Type(TypeKind),
    Member(MemberKind),
}

impl DeclKind {
    /// Name used in diagnostic messages.
    pub fn display(self) -> &'static str {
        match self {
            DeclKind::Type(TypeKind::Class) => "Class",
            DeclKind::Type(TypeKind::Struct) => "Struct",
            DeclKind::Type(TypeKind::Interface) => "Interface",
            DeclKind::Type(TypeKind::Enum) => "Enum",
            DeclKind::Type(TypeKind::Delegate) => "Delegate",
            DeclKind::Member(MemberKind::Method) => "Method",
            DeclKind::Member(MemberKind::Property) => "Property",
            DeclKind::Member(MemberKind::Field) => "Field",
            DeclKind::Member(MemberKind::Event) => "Event",
            DeclKind::Member(MemberKind::Constructor) => "Constructor",
            DeclKind::Member(MemberKind::Destructor) => "Destructor",
            DeclKind::Member(MemberKind::Indexer) => "Indexer",
            DeclKind::Member(MemberKind::Operator) => "Operator",
            DeclKind::Member(MemberKind::ConversionOperator) => "ConversionOperator",
        }
    }

    pub fn is_type(self) -> bool {
        matches!(self, DeclKind::Type(_))
    }

    /// The only symbol category a declaration of this kind may declare.
    pub fn expected_category(self) -> SymbolCategory {
        match self {
            DeclKind::Type(_) => SymbolCategory::NamedType,
            DeclKind::Member(MemberKind::Field) => SymbolCategory::Field,
            DeclKind::Member(
                MemberKind::Method
                | MemberKind::Constructor
                | MemberKind::Destructor
                | MemberKind::Operator
                | MemberKind::ConversionOperator,
            ) => SymbolCategory::Method,
            DeclKind::Member(MemberKind::Property | MemberKind::Indexer) => {
                SymbolCategory::Property
            }
            DeclKind::Member(MemberKind::Event) => SymbolCategory::Event,
        }
    }

    /// Whether every formal parameter needs a `<param>` tag.
    pub fn requires_param_tags(self) -> bool {
        matches!(
            self,
            DeclKind::Type(TypeKind::Delegate)
                | DeclKind::Member(
                    MemberKind::Method
                        | MemberKind::Constructor
                        | MemberKind::Destructor
                        | MemberKind::Operator
                        | MemberKind::ConversionOperator
                )
        )
    }

    /// Whether type parameters and the return value need tags.
    pub fn requires_signature_tags(self) -> bool {
        matches!(
            self,
            DeclKind::Type(TypeKind::Delegate) | DeclKind::Member(MemberKind::Method)
        )
    }

    /// Types that can contain other types.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            DeclKind::Type(TypeKind::Class | TypeKind::Struct | TypeKind::Interface)
        )
    }

    fn from_syntax(node: &SyntaxNode) -> Option<DeclKind> {
        let kind = match node.kind() {
            SyntaxKind::CLASS_DECL => DeclKind::Type(TypeKind::Class),
            SyntaxKind::STRUCT_DECL => DeclKind::Type(TypeKind::Struct),
            SyntaxKind::INTERFACE_DECL => DeclKind::Type(TypeKind::Interface),
            SyntaxKind::ENUM_DECL => DeclKind::Type(TypeKind::Enum),
            SyntaxKind::DELEGATE_DECL => DeclKind::Type(TypeKind::Delegate),
            SyntaxKind::RECORD_DECL => {
                let is_struct = TypeDecl::cast(node.clone())?.has_struct_keyword();
                DeclKind::Type(if is_struct {
                    TypeKind::Struct
                } else {
                    TypeKind::Class
                })
            }
            SyntaxKind::METHOD_DECL => DeclKind::Member(MemberKind::Method),
            SyntaxKind::PROPERTY_DECL => DeclKind::Member(MemberKind::Property),
            SyntaxKind::FIELD_DECL => DeclKind::Member(MemberKind::Field),
            SyntaxKind::EVENT_DECL | SyntaxKind::EVENT_FIELD_DECL => {
                DeclKind::Member(MemberKind::Event)
            }
            SyntaxKind::CONSTRUCTOR_DECL => DeclKind::Member(MemberKind::Constructor),
            SyntaxKind::DESTRUCTOR_DECL => DeclKind::Member(MemberKind::Destructor),
            SyntaxKind::INDEXER_DECL => DeclKind::Member(MemberKind::Indexer),
            SyntaxKind::OPERATOR_DECL => DeclKind::Member(MemberKind::Operator),
            SyntaxKind::CONVERSION_OPERATOR_DECL => {
                DeclKind::Member(MemberKind::ConversionOperator)
            }
            _ => return None,
        };
        Some(kind)
    }
}

/// Declared accessibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    ProtectedInternal,
    Internal,
    Protected,
    PrivateProtected,
    Private,
}

impl Accessibility {
    fn from_modifiers(modifiers: &[SyntaxKind], context: Context) -> Self {
        let has = |k| modifiers.contains(&k);
        match (
            has(SyntaxKind::PUBLIC_KW),
            has(SyntaxKind::PROTECTED_KW),
            has(SyntaxKind::INTERNAL_KW),
            has(SyntaxKind::PRIVATE_KW),
        ) {
            (true, ..) => Accessibility::Public,
            (_, true, true, _) => Accessibility::ProtectedInternal,
            (_, true, _, true) => Accessibility::PrivateProtected,
            (_, true, ..) => Accessibility::Protected,
            (_, _, true, _) => Accessibility::Internal,
            (.., true) => Accessibility::Private,
            _ => match context {
                Context::TopLevel => Accessibility::Internal,
                Context::Interface => Accessibility::Public,
                Context::Type => Accessibility::Private,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    TopLevel,
    Type,
    Interface,
}

// ============================================================================
// DECLARATION
// ============================================================================

/// A named parameter or type parameter with its source range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: SmolStr,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnType {
    pub text: String,
    pub range: TextRange,
}

/// A type declared directly inside another type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestedType {
    pub name: SmolStr,
    pub name_range: TextRange,
    pub is_enum: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    /// Display name: `~Name` for destructors, `this` for indexers,
    /// `operator +` and `implicit operator T` for operators.
    pub name: SmolStr,
    pub name_range: TextRange,
    /// From the first attribute or modifier to the end of the declaration.
    pub range: TextRange,
    pub accessibility: Accessibility,
    pub parameters: Vec<Parameter>,
    pub type_parameters: Vec<Parameter>,
    pub return_type: Option<ReturnType>,
    /// `true` when there is nothing to document in a `<returns>` tag.
    pub returns_void: bool,
    pub file: FileId,
    pub doc: Option<DocBlock>,
    pub symbol: Option<DeclaredSymbol>,
    pub containing_type: Option<SmolStr>,
    pub nested_types: Vec<NestedType>,
}

impl Declaration {
    pub fn is_top_level(&self) -> bool {
        self.containing_type.is_none()
    }

    /// Lowercase kind used in generated placeholder text.
    pub fn template_kind(&self) -> &'static str {
        match self.kind {
            DeclKind::Type(TypeKind::Class) => "class",
            DeclKind::Type(TypeKind::Struct) => "struct",
            DeclKind::Type(TypeKind::Interface) => "interface",
            DeclKind::Type(TypeKind::Enum) => "enum",
            DeclKind::Type(TypeKind::Delegate) => "delegate",
            DeclKind::Member(_) => match self.kind.expected_category() {
                SymbolCategory::Property => "property",
                SymbolCategory::Field => "field",
                SymbolCategory::Event => "event",
                _ => "method",
            },
        }
    }
}

// ============================================================================
// FILE MODEL
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    If,
    Elif,
    Else,
    Endif,
}

impl DirectiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::If => "#if",
            DirectiveKind::Elif => "#elif",
            DirectiveKind::Else => "#else",
            DirectiveKind::Endif => "#endif",
        }
    }

    fn from_line(text: &str) -> Option<Self> {
        let word = text
            .strip_prefix('#')?
            .trim_start()
            .split(|c: char| !c.is_ascii_alphabetic())
            .next()?;
        match word {
            "if" => Some(DirectiveKind::If),
            "elif" => Some(DirectiveKind::Elif),
            "else" => Some(DirectiveKind::Else),
            "endif" => Some(DirectiveKind::Endif),
            _ => None,
        }
    }
}

/// A conditional compilation directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub range: TextRange,
}

/// Everything the rule engine needs to know about one file.
#[derive(Clone, Debug)]
pub struct FileModel {
    pub file: FileId,
    pub path: Arc<str>,
    pub declarations: Vec<Declaration>,
    pub directives: Vec<Directive>,
    pub errors: Vec<SyntaxError>,
}

impl FileModel {
    /// File name component of the path, as shown in file-level messages.
    pub fn file_name(&self) -> &str {
        Path::new(&*self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&*self.path)
    }
}

/// Parse `text` and build its declaration model.
pub fn build_file_model(file: FileId, path: impl Into<Arc<str>>, text: &str) -> FileModel {
    build_file_model_with(file, path, text, VoidOracle::default())
}

/// Like [`build_file_model`] with a custom void-oracle chain.
pub fn build_file_model_with(
    file: FileId,
    path: impl Into<Arc<str>>,
    text: &str,
    oracle: VoidOracle,
) -> FileModel {
    let parse = parser::parse(text);
    let root = parse.syntax();
    let mut declarations = Vec::new();
    if let Some(source) = SourceFile::cast(root.clone()) {
        let model = SemanticModel::with_oracle(&source, oracle);
        let extractor = Extractor { file, model: &model };
        for member in source.members() {
            extractor.member(&member, Context::TopLevel, None, &mut declarations);
        }
    }
    let directives = root
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::PREPROCESSOR)
        .filter_map(|t| {
            Some(Directive {
                kind: DirectiveKind::from_line(t.text())?,
                range: t.text_range(),
            })
        })
        .collect();

    FileModel {
        file,
        path: path.into(),
        declarations,
        directives,
        errors: parse.errors,
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

struct Extractor<'a> {
    file: FileId,
    model: &'a SemanticModel,
}

impl Extractor<'_> {
    fn member(
        &self,
        member: &Member,
        context: Context,
        containing: Option<&SmolStr>,
        out: &mut Vec<Declaration>,
    ) {
        match member {
            Member::Namespace(ns) => {
                for inner in ns.members() {
                    self.member(&inner, Context::TopLevel, None, out);
                }
            }
            Member::Type(decl) => {
                let members = decl.members();
                let Some(declaration) = self.type_decl(decl, &members, context, containing) else {
                    return;
                };
                let inner_context = if decl.kind() == SyntaxKind::INTERFACE_DECL {
                    Context::Interface
                } else {
                    Context::Type
                };
                let name = declaration.name.clone();
                out.push(declaration);
                for inner in &members {
                    self.member(inner, inner_context, Some(&name), out);
                }
            }
            Member::Member(decl) => {
                if let Some(declaration) = self.member_decl(decl, context, containing) {
                    out.push(declaration);
                }
            }
        }
    }

    fn type_decl(
        &self,
        decl: &TypeDecl,
        members: &[Member],
        context: Context,
        containing: Option<&SmolStr>,
    ) -> Option<Declaration> {
        let node = decl.syntax();
        let kind = DeclKind::from_syntax(node)?;
        let name = decl.name()?;
        let return_type = decl.return_type().map(|t| ReturnType {
            text: t.text(),
            range: t.range(),
        });
        let returns_void = return_type
            .as_ref()
            .is_none_or(|t| self.model.returns_void(&t.text));
        let nested_types = members
            .iter()
            .filter_map(|m| match m {
                Member::Type(inner) => {
                    let name = inner.name()?;
                    Some(NestedType {
                        name: name.text().into(),
                        name_range: name.range(),
                        is_enum: inner.kind() == SyntaxKind::ENUM_DECL,
                    })
                }
                _ => None,
            })
            .collect();

        Some(Declaration {
            kind,
            name: name.text().into(),
            name_range: name.range(),
            range: node.text_range(),
            accessibility: Accessibility::from_modifiers(&decl.modifiers(), context),
            parameters: decl
                .params()
                .map(|p| collect_params(p.params().filter_map(|p| p.name())))
                .unwrap_or_default(),
            type_parameters: decl
                .type_params()
                .map(|p| collect_params(p.type_params().filter_map(|p| p.name())))
                .unwrap_or_default(),
            return_type,
            returns_void,
            file: self.file,
            doc: leading_doc(node),
            symbol: self.model.declared_symbol(node),
            containing_type: containing.cloned(),
            nested_types,
        })
    }

    fn member_decl(
        &self,
        decl: &MemberDecl,
        context: Context,
        containing: Option<&SmolStr>,
    ) -> Option<Declaration> {
        let node = decl.syntax();
        let kind = DeclKind::from_syntax(node)?;
        let (name, name_range) = display_name(decl, kind)?;
        let return_type = decl.return_type().map(|t| ReturnType {
            text: t.text(),
            range: t.range(),
        });
        let returns_void = return_type
            .as_ref()
            .is_none_or(|t| self.model.returns_void(&t.text));

        Some(Declaration {
            kind,
            name,
            name_range,
            range: node.text_range(),
            accessibility: Accessibility::from_modifiers(&decl.modifiers(), context),
            parameters: decl
                .params()
                .map(|p| collect_params(p.params().filter_map(|p| p.name())))
                .unwrap_or_default(),
            type_parameters: decl
                .type_params()
                .map(|p| collect_params(p.type_params().filter_map(|p| p.name())))
                .unwrap_or_default(),
            return_type,
            returns_void,
            file: self.file,
            doc: leading_doc(node),
            symbol: self.model.declared_symbol(node),
            containing_type: containing.cloned(),
            nested_types: Vec::new(),
        })
    }
}

fn collect_params(names: impl Iterator<Item = parser::Name>) -> Vec<Parameter> {
    names
        .map(|n| Parameter {
            name: n.text().into(),
            range: n.range(),
        })
        .collect()
}

/// Display name and the range diagnostics point at.
fn display_name(decl: &MemberDecl, kind: DeclKind) -> Option<(SmolStr, TextRange)> {
    match kind {
        DeclKind::Member(MemberKind::Field | MemberKind::Event) if decl.name().is_none() => {
            let name = decl.declarators().next()?.name()?;
            Some((name.text().into(), name.range()))
        }
        DeclKind::Member(MemberKind::Destructor) => {
            let name = decl.name()?;
            Some((format!("~{}", name.text()).into(), name.range()))
        }
        DeclKind::Member(MemberKind::Operator) => {
            let name = decl.name()?;
            Some((format!("operator {}", name.text()).into(), name.range()))
        }
        DeclKind::Member(MemberKind::ConversionOperator) => {
            let target = decl.type_ref()?;
            let direction = if decl.is_implicit() {
                "implicit"
            } else {
                "explicit"
            };
            Some((
                format!("{direction} operator {}", target.text()).into(),
                target.range(),
            ))
        }
        _ => {
            let name = decl.name()?;
            Some((name.text().into(), name.range()))
        }
    }
}

/// The documentation block attached to a declaration node.
///
/// Walks backwards from the node's first token through the leading trivia
/// and keeps the nearest contiguous group of `///` lines. A blank line or
/// another comment between two doc lines ends the group, and so does a
/// `///` comment trailing code on its line.
pub fn leading_doc(node: &SyntaxNode) -> Option<DocBlock> {
    let first = node.first_token()?;
    let mut docs = Vec::new();
    let mut newlines = 0;
    let mut token = first.prev_token();
    while let Some(t) = token {
        match t.kind() {
            SyntaxKind::DOC_COMMENT => {
                if (!docs.is_empty() && newlines > 1) || !starts_line(&t) {
                    break;
                }
                docs.push(t.clone());
                newlines = 0;
            }
            SyntaxKind::NEWLINE => newlines += 1,
            SyntaxKind::WHITESPACE => {}
            kind if kind.is_trivia() => {
                if !docs.is_empty() {
                    break;
                }
            }
            _ => break,
        }
        token = t.prev_token();
    }
    docs.reverse();
    DocBlock::from_lines(docs.iter().map(|t| (t.text_range().start(), t.text())))
}

fn starts_line(token: &SyntaxToken) -> bool {
    let mut prev = token.prev_token();
    while let Some(t) = prev {
        match t.kind() {
            SyntaxKind::WHITESPACE => prev = t.prev_token(),
            SyntaxKind::NEWLINE => return true,
            _ => return false,
        }
    }
    true
}

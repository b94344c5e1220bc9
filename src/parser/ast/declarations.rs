use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(members, Member);

    /// All using directives in the file, including those inside namespaces.
    pub fn usings(&self) -> impl Iterator<Item = UsingDirective> + '_ {
        self.0.descendants().filter_map(UsingDirective::cast)
    }
}

// ============================================================================
// Members
// ============================================================================

/// Anything that can appear in a namespace or type body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    Member(MemberDecl),
}

impl AstNode for Member {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::NAMESPACE_DECL || kind.is_type_decl() || kind.is_member_decl()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::NAMESPACE_DECL => Some(Member::Namespace(NamespaceDecl(node))),
            kind if kind.is_type_decl() => Some(Member::Type(TypeDecl(node))),
            kind if kind.is_member_decl() => Some(Member::Member(MemberDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Member::Namespace(n) => n.syntax(),
            Member::Type(n) => n.syntax(),
            Member::Member(n) => n.syntax(),
        }
    }
}

ast_node!(UsingDirective, USING_DIRECTIVE);

impl UsingDirective {
    /// `using Alias = Target;` as `(Alias, Target)`
    pub fn alias(&self) -> Option<(String, String)> {
        let tokens: Vec<SyntaxToken> = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .collect();
        let eq = tokens.iter().position(|t| t.kind() == SyntaxKind::EQ)?;
        let alias = tokens[..eq]
            .iter()
            .rev()
            .find(|t| t.kind() == SyntaxKind::IDENT)?
            .text()
            .to_string();
        let target: String = tokens[eq + 1..]
            .iter()
            .take_while(|t| t.kind() != SyntaxKind::SEMICOLON)
            .map(|t| t.text())
            .collect();
        (!target.is_empty()).then_some((alias, target))
    }
}

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    first_child_method!(body, DeclBody);

    pub fn name(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::QUALIFIED_NAME)
            .map(|n| text_without_trivia(&n))
    }

    /// Members of a block-scoped namespace. File-scoped namespaces have none;
    /// their members follow as siblings in the source file.
    pub fn members(&self) -> Vec<Member> {
        self.body()
            .map(|body| body.members().collect())
            .unwrap_or_default()
    }
}

ast_node!(DeclBody, DECL_BODY);

impl DeclBody {
    children_method!(members, Member);
}

// ============================================================================
// Type declarations
// ============================================================================

ast_node!(
    TypeDecl,
    [CLASS_DECL, STRUCT_DECL, INTERFACE_DECL, RECORD_DECL, ENUM_DECL, DELEGATE_DECL]
);

impl TypeDecl {
    first_child_method!(name, Name);
    first_child_method!(type_params, TypeParamList);
    first_child_method!(params, ParamList);
    first_child_method!(body, DeclBody);
    has_token_method!(has_struct_keyword, STRUCT_KW);

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// Return type of a delegate
    pub fn return_type(&self) -> Option<TypeRef> {
        if self.kind() == SyntaxKind::DELEGATE_DECL {
            self.0.children().find_map(TypeRef::cast)
        } else {
            None
        }
    }

    pub fn members(&self) -> Vec<Member> {
        self.body()
            .map(|body| body.members().collect())
            .unwrap_or_default()
    }

    pub fn modifiers(&self) -> Vec<SyntaxKind> {
        modifiers(&self.0)
    }
}

// ============================================================================
// Member declarations
// ============================================================================

ast_node!(
    MemberDecl,
    [
        METHOD_DECL,
        CONSTRUCTOR_DECL,
        DESTRUCTOR_DECL,
        PROPERTY_DECL,
        INDEXER_DECL,
        FIELD_DECL,
        EVENT_DECL,
        EVENT_FIELD_DECL,
        OPERATOR_DECL,
        CONVERSION_OPERATOR_DECL,
    ]
);

impl MemberDecl {
    first_child_method!(name, Name);
    first_child_method!(type_params, TypeParamList);
    first_child_method!(params, ParamList);
    first_child_method!(type_ref, TypeRef);
    children_method!(declarators, VariableDeclarator);
    has_token_method!(is_implicit, IMPLICIT_KW);

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// Declared return type of methods, operators and conversions
    pub fn return_type(&self) -> Option<TypeRef> {
        match self.kind() {
            SyntaxKind::METHOD_DECL
            | SyntaxKind::OPERATOR_DECL
            | SyntaxKind::CONVERSION_OPERATOR_DECL => self.type_ref(),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Vec<SyntaxKind> {
        modifiers(&self.0)
    }
}

/// Modifier keywords written directly on a declaration
fn modifiers(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .map(|t| t.kind())
        .filter(|k| k.is_modifier())
        .collect()
}

// ============================================================================
// Pieces
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    /// Name text with any `@` verbatim prefix removed
    pub fn text(&self) -> String {
        let text = text_without_trivia(&self.0);
        text.strip_prefix('@').map(str::to_string).unwrap_or(text)
    }
}

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    pub fn text(&self) -> String {
        text_without_trivia(&self.0)
    }
}

ast_node!(TypeParamList, TYPE_PARAM_LIST);

impl TypeParamList {
    children_method!(type_params, TypeParam);
}

ast_node!(TypeParam, TYPE_PARAM);

impl TypeParam {
    first_child_method!(name, Name);
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    children_method!(params, Param);
}

ast_node!(Param, PARAM);

impl Param {
    first_child_method!(name, Name);
}

ast_node!(VariableDeclarator, VARIABLE_DECLARATOR);

impl VariableDeclarator {
    first_child_method!(name, Name);
}

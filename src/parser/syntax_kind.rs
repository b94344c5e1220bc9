//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! Only the declaration-level structure of C# is modelled; statement and
//! expression bodies are kept as flat token runs inside `BLOCK` and
//! `EXPR_BODY` nodes.

/// All syntax kinds (tokens and nodes) of the C# declaration grammar
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (namespaces, type declarations, members).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DOC_COMMENT,  // /// line
    PREPROCESSOR, // #if, #region, ...

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,  // identifier, including predefined type names
    NUMBER, // 42, 0x1F, 3.14f
    STRING, // "a", @"a", $"a"
    CHAR,   // 'a'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,           // {
    R_BRACE,           // }
    L_BRACKET,         // [
    R_BRACKET,         // ]
    L_PAREN,           // (
    R_PAREN,           // )
    SEMICOLON,         // ;
    COLON,             // :
    COLON_COLON,       // ::
    DOT,               // .
    COMMA,             // ,
    EQ,                // =
    EQ_EQ,             // ==
    BANG_EQ,           // !=
    LT,                // <
    GT,                // >
    LT_EQ,             // <=
    FAT_ARROW,         // =>
    ARROW,             // ->
    PLUS,              // +
    PLUS_PLUS,         // ++
    MINUS,             // -
    MINUS_MINUS,       // --
    STAR,              // *
    SLASH,             // /
    PERCENT,           // %
    CARET,             // ^
    TILDE,             // ~
    QUESTION,          // ?
    QUESTION_QUESTION, // ??
    BANG,              // !
    PIPE,              // |
    PIPE_PIPE,         // ||
    AMP,               // &
    AMP_AMP,           // &&
    AT,                // @

    // =========================================================================
    // KEYWORDS - declarations
    // =========================================================================
    USING_KW,
    NAMESPACE_KW,
    CLASS_KW,
    STRUCT_KW,
    INTERFACE_KW,
    ENUM_KW,
    DELEGATE_KW,
    EVENT_KW,
    OPERATOR_KW,
    IMPLICIT_KW,
    EXPLICIT_KW,
    THIS_KW,
    BASE_KW,
    NEW_KW,
    RETURN_KW,

    // =========================================================================
    // KEYWORDS - modifiers
    // =========================================================================
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    STATIC_KW,
    ABSTRACT_KW,
    SEALED_KW,
    VIRTUAL_KW,
    OVERRIDE_KW,
    READONLY_KW,
    CONST_KW,
    EXTERN_KW,
    UNSAFE_KW,
    VOLATILE_KW,
    FIXED_KW,

    // =========================================================================
    // KEYWORDS - parameter modifiers
    // =========================================================================
    REF_KW,
    OUT_KW,
    IN_KW,
    PARAMS_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    SOURCE_FILE,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    ATTRIBUTE_LIST,
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    RECORD_DECL,
    ENUM_DECL,
    DELEGATE_DECL,
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
    NAME,
    QUALIFIED_NAME,
    TYPE_REF,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    PARAM_LIST,
    PARAM,
    VARIABLE_DECLARATOR,
    BASE_LIST,
    CONSTRAINT_CLAUSE,
    DECL_BODY, // { members } of a type or namespace
    BLOCK,     // skipped { ... }
    EXPR_BODY, // skipped => ... ;
    INITIALIZER,

    // Error recovery
    ERROR,

    // Must be last - used for bounds checking
    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is trivia (whitespace, line breaks, comments, directives)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE
                | Self::NEWLINE
                | Self::LINE_COMMENT
                | Self::BLOCK_COMMENT
                | Self::DOC_COMMENT
                | Self::PREPROCESSOR
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::USING_KW as u16) && (self as u16) <= (Self::PARAMS_KW as u16)
    }

    /// Check if this is a declaration modifier keyword
    pub fn is_modifier(self) -> bool {
        (self as u16) >= (Self::PUBLIC_KW as u16) && (self as u16) <= (Self::FIXED_KW as u16)
            || matches!(self, Self::NEW_KW | Self::REF_KW)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::AT as u16)
    }

    /// Check if this node kind is a type declaration
    pub fn is_type_decl(self) -> bool {
        matches!(
            self,
            Self::CLASS_DECL
                | Self::STRUCT_DECL
                | Self::INTERFACE_DECL
                | Self::RECORD_DECL
                | Self::ENUM_DECL
                | Self::DELEGATE_DECL
        )
    }

    /// Check if this node kind is a member declaration
    pub fn is_member_decl(self) -> bool {
        matches!(
            self,
            Self::METHOD_DECL
                | Self::CONSTRUCTOR_DECL
                | Self::DESTRUCTOR_DECL
                | Self::PROPERTY_DECL
                | Self::INDEXER_DECL
                | Self::FIELD_DECL
                | Self::EVENT_DECL
                | Self::EVENT_FIELD_DECL
                | Self::OPERATOR_DECL
                | Self::CONVERSION_OPERATOR_DECL
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharpLanguage {}

impl rowan::Language for CSharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<CSharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CSharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CSharpLanguage>;

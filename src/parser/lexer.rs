//! Logos-based lexer for C#
//!
//! Fast tokenization using the logos crate. The lexer is lossless: every
//! byte of the input ends up in exactly one token, so the CST built on top
//! of it reproduces the source text verbatim.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            // `////` is an ordinary comment, not documentation
            Ok(LogosToken::DocComment) if text.starts_with("////") => SyntaxKind::LINE_COMMENT,
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"///[^\r\n]*")]
    DocComment,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"#[^\r\n]*")]
    Preprocessor,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"@?[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9][0-9a-zA-Z_]*)?")]
    Number,

    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"\$"([^"\\\r\n]|\\.)*""#)]
    #[regex(r#"\$@"([^"]|"")*""#)]
    #[regex(r#"@\$"([^"]|"")*""#)]
    String,

    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    Char,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("::")]
    ColonColon,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token("=>")]
    FatArrow,

    #[token("->")]
    Arrow,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("??")]
    QuestionQuestion,

    #[token("||")]
    PipePipe,

    #[token("&&")]
    AmpAmp,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token("=")]
    Eq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,

    #[token("?")]
    Question,

    #[token("!")]
    Bang,

    #[token("|")]
    Pipe,

    #[token("&")]
    Amp,

    #[token("@")]
    At,

    // =========================================================================
    // KEYWORDS - declarations
    // =========================================================================
    #[token("using")]
    UsingKw,

    #[token("namespace")]
    NamespaceKw,

    #[token("class")]
    ClassKw,

    #[token("struct")]
    StructKw,

    #[token("interface")]
    InterfaceKw,

    #[token("enum")]
    EnumKw,

    #[token("delegate")]
    DelegateKw,

    #[token("event")]
    EventKw,

    #[token("operator")]
    OperatorKw,

    #[token("implicit")]
    ImplicitKw,

    #[token("explicit")]
    ExplicitKw,

    #[token("this")]
    ThisKw,

    #[token("base")]
    BaseKw,

    #[token("new")]
    NewKw,

    #[token("return")]
    ReturnKw,

    // =========================================================================
    // KEYWORDS - modifiers
    // =========================================================================
    #[token("public")]
    PublicKw,

    #[token("private")]
    PrivateKw,

    #[token("protected")]
    ProtectedKw,

    #[token("internal")]
    InternalKw,

    #[token("static")]
    StaticKw,

    #[token("abstract")]
    AbstractKw,

    #[token("sealed")]
    SealedKw,

    #[token("virtual")]
    VirtualKw,

    #[token("override")]
    OverrideKw,

    #[token("readonly")]
    ReadonlyKw,

    #[token("const")]
    ConstKw,

    #[token("extern")]
    ExternKw,

    #[token("unsafe")]
    UnsafeKw,

    #[token("volatile")]
    VolatileKw,

    #[token("fixed")]
    FixedKw,

    // =========================================================================
    // KEYWORDS - parameter modifiers
    // =========================================================================
    #[token("ref")]
    RefKw,

    #[token("out")]
    OutKw,

    #[token("in")]
    InKw,

    #[token("params")]
    ParamsKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            DocComment => SyntaxKind::DOC_COMMENT,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Preprocessor => SyntaxKind::PREPROCESSOR,

            // Literals
            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,
            String => SyntaxKind::STRING,
            Char => SyntaxKind::CHAR,

            // Multi-char punctuation
            ColonColon => SyntaxKind::COLON_COLON,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtEq => SyntaxKind::LT_EQ,
            FatArrow => SyntaxKind::FAT_ARROW,
            Arrow => SyntaxKind::ARROW,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            PipePipe => SyntaxKind::PIPE_PIPE,
            AmpAmp => SyntaxKind::AMP_AMP,

            // Single-char punctuation
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,
            Question => SyntaxKind::QUESTION,
            Bang => SyntaxKind::BANG,
            Pipe => SyntaxKind::PIPE,
            Amp => SyntaxKind::AMP,
            At => SyntaxKind::AT,

            // Keywords
            UsingKw => SyntaxKind::USING_KW,
            NamespaceKw => SyntaxKind::NAMESPACE_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            DelegateKw => SyntaxKind::DELEGATE_KW,
            EventKw => SyntaxKind::EVENT_KW,
            OperatorKw => SyntaxKind::OPERATOR_KW,
            ImplicitKw => SyntaxKind::IMPLICIT_KW,
            ExplicitKw => SyntaxKind::EXPLICIT_KW,
            ThisKw => SyntaxKind::THIS_KW,
            BaseKw => SyntaxKind::BASE_KW,
            NewKw => SyntaxKind::NEW_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            AbstractKw => SyntaxKind::ABSTRACT_KW,
            SealedKw => SyntaxKind::SEALED_KW,
            VirtualKw => SyntaxKind::VIRTUAL_KW,
            OverrideKw => SyntaxKind::OVERRIDE_KW,
            ReadonlyKw => SyntaxKind::READONLY_KW,
            ConstKw => SyntaxKind::CONST_KW,
            ExternKw => SyntaxKind::EXTERN_KW,
            UnsafeKw => SyntaxKind::UNSAFE_KW,
            VolatileKw => SyntaxKind::VOLATILE_KW,
            FixedKw => SyntaxKind::FIXED_KW,
            RefKw => SyntaxKind::REF_KW,
            OutKw => SyntaxKind::OUT_KW,
            InKw => SyntaxKind::IN_KW,
            ParamsKw => SyntaxKind::PARAMS_KW,
        }
    }
}

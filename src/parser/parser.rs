//! Recursive descent parser for C# declarations
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST. Only the
//! declaration skeleton is parsed; bodies and initializers are skipped with
//! bracket balancing.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse C# source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Identifiers that act as modifiers when followed by another declaration token
const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "async", "required", "file", "scoped"];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Index of the n-th non-trivia token at or after the cursor
    fn nth_index(&self, n: usize) -> Option<usize> {
        let mut count = 0;
        for idx in self.pos..self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
        }
        None
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        self.nth_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn nth_text(&self, n: usize) -> &str {
        self.nth_index(n)
            .map(|idx| self.tokens[idx].text)
            .unwrap_or("")
    }

    fn nth_is_word(&self, n: usize, word: &str) -> bool {
        self.nth(n) == SyntaxKind::IDENT && self.nth_text(n) == word
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_any(&mut self) {
        self.bump();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Consume the next significant token if it has the given kind.
    ///
    /// Trivia is only pulled into the current node when the token matches,
    /// so a node never ends on trailing trivia.
    fn eat_next(&mut self, kind: SyntaxKind) -> bool {
        if self.nth(0) == kind {
            self.skip_trivia();
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_next(&mut self, kind: SyntaxKind) -> bool {
        if self.eat_next(kind) {
            true
        } else {
            self.skip_trivia();
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump_any();
            consumed = true;
        }
        // If we didn't consume anything and we're not at EOF, consume one token
        // to prevent infinite loops
        if !consumed && !self.at_eof() {
            self.bump_any();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Wrap the next significant token in a `NAME` node
    fn parse_name(&mut self) {
        if self.nth(0) == SyntaxKind::IDENT {
            self.skip_trivia();
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else {
            self.skip_trivia();
            self.error("expected name");
        }
    }

    /// Consume a bracketed run starting at `open`, keeping nesting balanced.
    fn bump_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
        self.error(format!("unterminated {:?}", open));
    }

    /// Consume tokens until one of `stops` at bracket depth zero (not consumed).
    ///
    /// Generic argument lists (`Dictionary<int, string>`) count as brackets
    /// so their commas never end the run.
    fn bump_until(&mut self, stops: &[SyntaxKind], stop_words: &[&str]) {
        let mut depth = 0usize;
        let mut prev = SyntaxKind::ERROR;
        while !self.at_eof() {
            let token = &self.tokens[self.pos];
            let kind = token.kind;
            if depth == 0
                && (stops.contains(&kind)
                    || (kind == SyntaxKind::IDENT && stop_words.contains(&token.text)))
            {
                return;
            }
            match kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                SyntaxKind::LT if prev == SyntaxKind::IDENT => {
                    if let Some(close) = self.generic_close(self.pos) {
                        while self.pos <= close {
                            self.bump();
                        }
                        prev = SyntaxKind::GT;
                        continue;
                    }
                }
                _ => {}
            }
            if !kind.is_trivia() {
                prev = kind;
            }
            self.bump();
        }
    }

    /// Index of the `>` closing a generic argument list opened at `open`,
    /// if the tokens in between can only be type arguments.
    fn generic_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (idx, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(idx);
                    }
                }
                SyntaxKind::IDENT
                | SyntaxKind::DOT
                | SyntaxKind::COMMA
                | SyntaxKind::COLON_COLON
                | SyntaxKind::QUESTION
                | SyntaxKind::STAR
                | SyntaxKind::L_BRACKET
                | SyntaxKind::R_BRACKET
                | SyntaxKind::L_PAREN
                | SyntaxKind::R_PAREN => {}
                kind if kind.is_trivia() => {}
                _ => return None,
            }
        }
        None
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = Member*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_member_list(false, false);
        self.skip_trivia();
        self.finish_node();
    }

    /// Members of a namespace or type body, up to `}` when `closing`
    fn parse_member_list(&mut self, in_type: bool, closing: bool) {
        loop {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() || (closing && self.at(SyntaxKind::R_BRACE)) {
                break;
            }
            self.parse_member(in_type);
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump_any();
            }
        }
    }

    /// Member = UsingDirective | Namespace | Declaration
    fn parse_member(&mut self, in_type: bool) {
        match self.current_kind() {
            SyntaxKind::USING_KW if !in_type => self.parse_using(),
            SyntaxKind::IDENT
                if !in_type && self.nth_is_word(0, "global") && self.nth(1) == SyntaxKind::USING_KW =>
            {
                self.parse_using()
            }
            SyntaxKind::NAMESPACE_KW => self.parse_namespace(),
            SyntaxKind::SEMICOLON => self.bump(),
            _ => self.parse_declaration(),
        }
    }

    /// UsingDirective = 'global'? 'using' ... ';'
    fn parse_using(&mut self) {
        self.start_node(SyntaxKind::USING_DIRECTIVE);
        self.bump_until(&[SyntaxKind::SEMICOLON, SyntaxKind::L_BRACE], &[]);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Namespace = 'namespace' QualifiedName ( ';' | '{' Member* '}' )
    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_DECL);
        self.bump();
        self.skip_trivia();

        self.start_node(SyntaxKind::QUALIFIED_NAME);
        self.expect(SyntaxKind::IDENT);
        while self.nth(0) == SyntaxKind::DOT && self.nth(1) == SyntaxKind::IDENT {
            self.eat_next(SyntaxKind::DOT);
            self.eat_next(SyntaxKind::IDENT);
        }
        self.finish_node();

        if !self.eat_next(SyntaxKind::SEMICOLON) {
            if self.nth(0) == SyntaxKind::L_BRACE {
                self.parse_decl_body(false);
                self.eat_next(SyntaxKind::SEMICOLON);
            } else {
                self.skip_trivia();
                self.error("expected namespace body");
            }
        }
        self.finish_node();
    }

    /// DeclBody = '{' Member* '}'
    fn parse_decl_body(&mut self, in_type: bool) {
        self.skip_trivia();
        self.start_node(SyntaxKind::DECL_BODY);
        self.expect(SyntaxKind::L_BRACE);
        self.parse_member_list(in_type, true);
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Declaration = AttributeList* Modifier* (TypeDecl | MemberDecl)
    fn parse_declaration(&mut self) {
        let cp = self.checkpoint();
        let start_pos = self.pos;

        while self.at(SyntaxKind::L_BRACKET) {
            self.parse_attribute_list();
            self.skip_trivia();
        }
        let attributes_only = self.pos != start_pos;

        let mut has_modifiers = false;
        loop {
            let kind = self.current_kind();
            let contextual = kind == SyntaxKind::IDENT
                && CONTEXTUAL_MODIFIERS.contains(&self.nth_text(0))
                && (self.nth(1) == SyntaxKind::IDENT || self.nth(1).is_keyword());
            if kind.is_modifier() || contextual {
                self.bump();
                self.skip_trivia();
                has_modifiers = true;
            } else {
                break;
            }
        }

        match self.current_kind() {
            SyntaxKind::CLASS_KW => self.parse_type_decl(cp, SyntaxKind::CLASS_DECL),
            SyntaxKind::STRUCT_KW => self.parse_type_decl(cp, SyntaxKind::STRUCT_DECL),
            SyntaxKind::INTERFACE_KW => self.parse_type_decl(cp, SyntaxKind::INTERFACE_DECL),
            SyntaxKind::ENUM_KW => self.parse_enum(cp),
            SyntaxKind::DELEGATE_KW => self.parse_delegate(cp),
            SyntaxKind::EVENT_KW => self.parse_event(cp),
            SyntaxKind::TILDE => self.parse_destructor(cp),
            SyntaxKind::IMPLICIT_KW | SyntaxKind::EXPLICIT_KW => self.parse_conversion(cp),
            SyntaxKind::IDENT
                if self.nth_is_word(0, "record")
                    && matches!(
                        self.nth(1),
                        SyntaxKind::IDENT | SyntaxKind::CLASS_KW | SyntaxKind::STRUCT_KW
                    ) =>
            {
                self.parse_type_decl(cp, SyntaxKind::RECORD_DECL)
            }
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::L_PAREN => self.parse_constructor(cp),
            SyntaxKind::IDENT | SyntaxKind::L_PAREN => self.parse_typed_member(cp),
            // Assembly-level attributes stand on their own
            SyntaxKind::NAMESPACE_KW | SyntaxKind::USING_KW | SyntaxKind::R_BRACE
                if attributes_only && !has_modifiers => {}
            _ if self.at_eof() && attributes_only => {}
            _ => {
                self.error_recover(
                    format!("unexpected token: {:?}", self.current_kind()),
                    &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
                );
            }
        }
    }

    /// AttributeList = '[' ... ']'
    fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE_LIST);
        self.bump_balanced(SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET);
        self.finish_node();
    }

    /// TypeDecl = ('class' | 'struct' | 'interface' | 'record' ('class'|'struct')?) Name
    ///            TypeParams? Params? BaseList? Constraint* (Body | ';')
    fn parse_type_decl(&mut self, cp: Checkpoint, kind: SyntaxKind) {
        self.start_node_at(cp, kind);
        self.bump();
        if kind == SyntaxKind::RECORD_DECL && !self.eat_next(SyntaxKind::CLASS_KW) {
            self.eat_next(SyntaxKind::STRUCT_KW);
        }
        self.parse_name();
        if self.nth(0) == SyntaxKind::LT {
            self.parse_type_param_list();
        }
        if self.nth(0) == SyntaxKind::L_PAREN {
            self.parse_param_list(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
        }
        if self.nth(0) == SyntaxKind::COLON {
            self.parse_base_list();
        }
        self.parse_constraints();

        if self.nth(0) == SyntaxKind::L_BRACE {
            self.parse_decl_body(true);
            self.eat_next(SyntaxKind::SEMICOLON);
        } else {
            self.expect_next(SyntaxKind::SEMICOLON);
        }
        self.finish_node();
    }

    /// Enum = 'enum' Name BaseList? '{' ... '}' ';'?
    fn parse_enum(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::ENUM_DECL);
        self.bump();
        self.parse_name();
        if self.nth(0) == SyntaxKind::COLON {
            self.parse_base_list();
        }
        if self.nth(0) == SyntaxKind::L_BRACE {
            self.parse_skipped_block();
            self.eat_next(SyntaxKind::SEMICOLON);
        } else {
            self.skip_trivia();
            self.error("expected enum body");
        }
        self.finish_node();
    }

    /// Delegate = 'delegate' Type Name TypeParams? Params Constraint* ';'
    fn parse_delegate(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::DELEGATE_DECL);
        self.bump();
        self.parse_type_ref();
        self.parse_name();
        if self.nth(0) == SyntaxKind::LT {
            self.parse_type_param_list();
        }
        self.parse_param_list(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
        self.parse_constraints();
        self.expect_next(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Event = 'event' Type (Name AccessorBlock | Declarator (',' Declarator)* ';')
    fn parse_event(&mut self, cp: Checkpoint) {
        self.bump();
        self.parse_type_ref();
        self.bump_explicit_interface_prefix();

        if self.nth(1) == SyntaxKind::L_BRACE {
            self.start_node_at(cp, SyntaxKind::EVENT_DECL);
            self.parse_name();
            self.parse_skipped_block();
        } else {
            self.start_node_at(cp, SyntaxKind::EVENT_FIELD_DECL);
            self.parse_declarators();
        }
        self.finish_node();
    }

    /// Destructor = '~' Name '(' ')' Body
    fn parse_destructor(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::DESTRUCTOR_DECL);
        self.bump();
        self.parse_name();
        self.parse_param_list(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
        self.parse_body();
        self.finish_node();
    }

    /// Conversion = ('implicit' | 'explicit') 'operator' Type Params Body
    fn parse_conversion(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::CONVERSION_OPERATOR_DECL);
        self.bump();
        self.expect_next(SyntaxKind::OPERATOR_KW);
        self.parse_type_ref();
        self.parse_param_list(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
        self.parse_body();
        self.finish_node();
    }

    /// Constructor = Name Params (':' ('base'|'this') Args)? Body
    fn parse_constructor(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::CONSTRUCTOR_DECL);
        self.parse_name();
        self.parse_param_list(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
        if self.nth(0) == SyntaxKind::COLON {
            self.skip_trivia();
            self.start_node(SyntaxKind::INITIALIZER);
            self.bump();
            self.bump_until(
                &[SyntaxKind::L_BRACE, SyntaxKind::FAT_ARROW, SyntaxKind::SEMICOLON],
                &[],
            );
            self.finish_node();
        }
        self.parse_body();
        self.finish_node();
    }

    /// TypedMember = Type ( 'operator' Op Params Body
    ///                    | 'this' '[' Params ']' AccessorBody
    ///                    | Name TypeParams? Params Constraint* Body
    ///                    | Name AccessorBody
    ///                    | Declarator (',' Declarator)* ';' )
    fn parse_typed_member(&mut self, cp: Checkpoint) {
        self.parse_type_ref();
        self.bump_explicit_interface_prefix();

        match self.nth(0) {
            SyntaxKind::OPERATOR_KW => {
                self.start_node_at(cp, SyntaxKind::OPERATOR_DECL);
                self.skip_trivia();
                self.bump();
                self.skip_trivia();
                self.start_node(SyntaxKind::NAME);
                while !self.at_eof() && !self.at(SyntaxKind::L_PAREN) {
                    self.bump();
                    if self.nth(0) == SyntaxKind::L_PAREN {
                        break;
                    }
                    self.skip_trivia();
                }
                self.finish_node();
                self.parse_param_list(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
                self.parse_body();
            }
            SyntaxKind::THIS_KW => {
                self.start_node_at(cp, SyntaxKind::INDEXER_DECL);
                self.skip_trivia();
                self.start_node(SyntaxKind::NAME);
                self.bump();
                self.finish_node();
                self.parse_param_list(SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET);
                self.parse_accessor_body();
            }
            SyntaxKind::IDENT => match self.nth(1) {
                SyntaxKind::L_PAREN | SyntaxKind::LT => {
                    self.start_node_at(cp, SyntaxKind::METHOD_DECL);
                    self.parse_name();
                    if self.nth(0) == SyntaxKind::LT {
                        self.parse_type_param_list();
                    }
                    self.parse_param_list(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
                    self.parse_constraints();
                    self.parse_body();
                }
                SyntaxKind::L_BRACE | SyntaxKind::FAT_ARROW => {
                    self.start_node_at(cp, SyntaxKind::PROPERTY_DECL);
                    self.parse_name();
                    self.parse_accessor_body();
                }
                _ => {
                    self.start_node_at(cp, SyntaxKind::FIELD_DECL);
                    self.parse_declarators();
                }
            },
            _ => {
                self.start_node_at(cp, SyntaxKind::ERROR);
                self.skip_trivia();
                self.error_recover(
                    format!("expected member name, found {:?}", self.current_kind()),
                    &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
                );
                self.eat(SyntaxKind::SEMICOLON);
            }
        }
        self.finish_node();
    }

    /// `IFoo.` prefixes of explicit interface implementations
    fn bump_explicit_interface_prefix(&mut self) {
        while self.nth(0) == SyntaxKind::IDENT && self.nth(1) == SyntaxKind::DOT {
            self.eat_next(SyntaxKind::IDENT);
            self.eat_next(SyntaxKind::DOT);
        }
    }

    /// Declarators = VariableDeclarator (',' VariableDeclarator)* ';'
    fn parse_declarators(&mut self) {
        loop {
            self.skip_trivia();
            self.start_node(SyntaxKind::VARIABLE_DECLARATOR);
            self.parse_name();
            if self.nth(0) == SyntaxKind::L_BRACKET {
                self.skip_trivia();
                self.bump_balanced(SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET);
            }
            if self.nth(0) == SyntaxKind::EQ {
                self.skip_trivia();
                self.start_node(SyntaxKind::INITIALIZER);
                self.bump();
                self.bump_until(&[SyntaxKind::COMMA, SyntaxKind::SEMICOLON], &[]);
                self.finish_node();
            }
            self.finish_node();
            if !self.eat_next(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect_next(SyntaxKind::SEMICOLON);
    }

    /// Body = Block | '=>' Expr ';' | ';'
    fn parse_body(&mut self) {
        match self.nth(0) {
            SyntaxKind::L_BRACE => self.parse_skipped_block(),
            SyntaxKind::FAT_ARROW => self.parse_expr_body(),
            _ => {
                self.expect_next(SyntaxKind::SEMICOLON);
            }
        }
    }

    /// AccessorBody = Block ('=' Initializer ';')? | '=>' Expr ';'
    fn parse_accessor_body(&mut self) {
        match self.nth(0) {
            SyntaxKind::L_BRACE => {
                self.parse_skipped_block();
                if self.nth(0) == SyntaxKind::EQ {
                    self.skip_trivia();
                    self.start_node(SyntaxKind::INITIALIZER);
                    self.bump();
                    self.bump_until(&[SyntaxKind::SEMICOLON], &[]);
                    self.finish_node();
                    self.expect_next(SyntaxKind::SEMICOLON);
                }
            }
            SyntaxKind::FAT_ARROW => self.parse_expr_body(),
            _ => {
                self.skip_trivia();
                self.error("expected accessor body");
            }
        }
    }

    /// Block = '{' ... '}' (contents are not parsed)
    fn parse_skipped_block(&mut self) {
        self.skip_trivia();
        self.start_node(SyntaxKind::BLOCK);
        self.bump_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// ExprBody = '=>' ... ';'
    fn parse_expr_body(&mut self) {
        self.skip_trivia();
        self.start_node(SyntaxKind::EXPR_BODY);
        self.bump();
        self.bump_until(&[SyntaxKind::SEMICOLON], &[]);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Type = (Name TypeArgs? (('.'|'::') Name TypeArgs?)* | Tuple) ('?' | '*' | '[' ','* ']')*
    fn parse_type_ref(&mut self) {
        self.skip_trivia();
        self.start_node(SyntaxKind::TYPE_REF);
        if self.at(SyntaxKind::L_PAREN) {
            self.bump_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
        } else if self.at(SyntaxKind::IDENT) {
            loop {
                self.bump();
                if self.nth(0) == SyntaxKind::LT {
                    self.skip_trivia();
                    self.bump_balanced(SyntaxKind::LT, SyntaxKind::GT);
                }
                let separator = matches!(self.nth(0), SyntaxKind::DOT | SyntaxKind::COLON_COLON);
                if separator && self.nth(1) == SyntaxKind::IDENT {
                    self.skip_trivia();
                    self.bump();
                    self.skip_trivia();
                } else {
                    break;
                }
            }
        } else {
            self.error("expected type");
        }

        loop {
            match self.nth(0) {
                SyntaxKind::QUESTION | SyntaxKind::STAR => {
                    self.skip_trivia();
                    self.bump();
                }
                SyntaxKind::L_BRACKET
                    if matches!(self.nth(1), SyntaxKind::R_BRACKET | SyntaxKind::COMMA) =>
                {
                    self.skip_trivia();
                    self.bump_balanced(SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET);
                }
                _ => break,
            }
        }
        self.finish_node();
    }

    /// TypeParams = '<' TypeParam (',' TypeParam)* '>'
    fn parse_type_param_list(&mut self) {
        self.skip_trivia();
        self.start_node(SyntaxKind::TYPE_PARAM_LIST);
        self.bump();
        loop {
            self.skip_trivia();
            self.start_node(SyntaxKind::TYPE_PARAM);
            while self.at(SyntaxKind::L_BRACKET) {
                self.parse_attribute_list();
                self.skip_trivia();
            }
            if self.at_any(&[SyntaxKind::IN_KW, SyntaxKind::OUT_KW]) {
                self.bump();
            }
            self.parse_name();
            self.finish_node();
            if self.eat_next(SyntaxKind::COMMA) {
                continue;
            }
            self.expect_next(SyntaxKind::GT);
            break;
        }
        self.finish_node();
    }

    /// Params = open (Param (',' Param)*)? close
    fn parse_param_list(&mut self, open: SyntaxKind, close: SyntaxKind) {
        self.skip_trivia();
        self.start_node(SyntaxKind::PARAM_LIST);
        if !self.expect(open) {
            self.finish_node();
            return;
        }
        if !self.eat_next(close) {
            loop {
                self.parse_param(close);
                if self.eat_next(SyntaxKind::COMMA) {
                    continue;
                }
                if !self.eat_next(close) {
                    self.skip_trivia();
                    self.error_recover(
                        format!("expected {:?}", close),
                        &[close, SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON],
                    );
                    self.eat(close);
                }
                break;
            }
        }
        self.finish_node();
    }

    /// Param = Attributes? Modifier* Type Name ('=' Default)?
    ///
    /// The parameter name is the last identifier at depth zero before the
    /// default value.
    fn parse_param(&mut self, close: SyntaxKind) {
        self.skip_trivia();
        let start = self.pos;
        let mut end = start;
        let mut last_significant = start;
        let mut name_idx = None;
        let mut depth = 0usize;
        let mut in_default = false;

        while end < self.tokens.len() {
            let token = &self.tokens[end];
            let kind = token.kind;
            if depth == 0 && (kind == SyntaxKind::COMMA || kind == close) {
                break;
            }
            match kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::LT if !in_default => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                SyntaxKind::GT if !in_default => depth = depth.saturating_sub(1),
                SyntaxKind::EQ if depth == 0 => in_default = true,
                SyntaxKind::IDENT if depth == 0 && !in_default => name_idx = Some(end),
                _ => {}
            }
            if !kind.is_trivia() {
                last_significant = end + 1;
            }
            end += 1;
        }

        self.start_node(SyntaxKind::PARAM);
        while self.pos < last_significant {
            if Some(self.pos) == name_idx {
                self.start_node(SyntaxKind::NAME);
                self.bump();
                self.finish_node();
            } else {
                self.bump();
            }
        }
        if name_idx.is_none() {
            self.error("expected parameter name");
        }
        self.finish_node();
    }

    /// BaseList = ':' Type (',' Type)*
    fn parse_base_list(&mut self) {
        self.skip_trivia();
        self.start_node(SyntaxKind::BASE_LIST);
        self.bump();
        self.bump_until(
            &[SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON],
            &["where"],
        );
        self.finish_node();
    }

    /// Constraint = 'where' Name ':' ...
    fn parse_constraints(&mut self) {
        while self.nth_is_word(0, "where") {
            self.skip_trivia();
            self.start_node(SyntaxKind::CONSTRAINT_CLAUSE);
            self.bump();
            self.bump_until(
                &[SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON, SyntaxKind::FAT_ARROW],
                &["where"],
            );
            self.finish_node();
        }
    }
}

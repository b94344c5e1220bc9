//! Semantic model: declared symbols and return-type void-ness.
//!
//! The parser gives us syntax only. This module adds the two pieces of
//! semantic information the rule engine consumes:
//!
//! - the **declared symbol** of a declaration node (its category, or `None`
//!   when the node is too broken to name anything), and
//! - the **void oracle**, deciding whether a return type is `void` through
//!   an ordered chain of [`VoidStrategy`] implementations.

use rustc_hash::FxHashMap;

use crate::parser::{AstNode, MemberDecl, SourceFile, SyntaxKind, SyntaxNode, TypeDecl};

// ============================================================================
// Declared symbols
// ============================================================================

/// Category of a declared symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    NamedType,
    Method,
    Property,
    Field,
    Event,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeclaredSymbol {
    pub category: SymbolCategory,
    /// Compiler-synthesized; never required to carry documentation.
    pub implicitly_declared: bool,
}

impl DeclaredSymbol {
    pub fn new(category: SymbolCategory) -> Self {
        Self {
            category,
            implicitly_declared: false,
        }
    }
}

/// Per-file semantic information.
#[derive(Debug, Default)]
pub struct SemanticModel {
    /// `using Alias = Target;` directives, alias to target.
    aliases: FxHashMap<String, String>,
    oracle: VoidOracle,
}

impl SemanticModel {
    pub fn new(file: &SourceFile) -> Self {
        Self::with_oracle(file, VoidOracle::default())
    }

    pub fn with_oracle(file: &SourceFile, oracle: VoidOracle) -> Self {
        let aliases = file.usings().filter_map(|u| u.alias()).collect();
        Self { aliases, oracle }
    }

    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// The symbol a declaration node declares.
    ///
    /// Returns `None` when the node lacks what the symbol would be named
    /// after, which happens only for syntax the parser recovered from.
    pub fn declared_symbol(&self, node: &SyntaxNode) -> Option<DeclaredSymbol> {
        let kind = node.kind();
        if kind.is_type_decl() {
            let decl = TypeDecl::cast(node.clone())?;
            decl.name()?;
            return Some(DeclaredSymbol::new(SymbolCategory::NamedType));
        }

        let decl = MemberDecl::cast(node.clone())?;
        let category = match kind {
            SyntaxKind::METHOD_DECL => {
                decl.name()?;
                decl.params()?;
                SymbolCategory::Method
            }
            SyntaxKind::CONSTRUCTOR_DECL
            | SyntaxKind::DESTRUCTOR_DECL
            | SyntaxKind::OPERATOR_DECL
            | SyntaxKind::CONVERSION_OPERATOR_DECL => {
                decl.params()?;
                SymbolCategory::Method
            }
            SyntaxKind::PROPERTY_DECL => {
                decl.name()?;
                SymbolCategory::Property
            }
            SyntaxKind::INDEXER_DECL => {
                decl.params()?;
                SymbolCategory::Property
            }
            SyntaxKind::FIELD_DECL => {
                decl.declarators().next()?.name()?;
                SymbolCategory::Field
            }
            SyntaxKind::EVENT_FIELD_DECL => {
                decl.declarators().next()?.name()?;
                SymbolCategory::Event
            }
            SyntaxKind::EVENT_DECL => {
                decl.name()?;
                SymbolCategory::Event
            }
            _ => return None,
        };
        Some(DeclaredSymbol::new(category))
    }

    /// Whether a declared return type is `void`.
    pub fn returns_void(&self, type_text: &str) -> bool {
        self.oracle.is_void(type_text, self)
    }
}

// ============================================================================
// Void oracle
// ============================================================================

/// One way of deciding whether a type is `void`.
///
/// Returns `None` when the strategy cannot tell, handing over to the next
/// strategy in the chain.
pub trait VoidStrategy: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;
    fn is_void(&self, type_text: &str, model: &SemanticModel) -> Option<bool>;
}

/// Ordered chain of strategies; an undecided chain means "not void".
#[derive(Debug)]
pub struct VoidOracle {
    strategies: Vec<Box<dyn VoidStrategy>>,
}

impl VoidOracle {
    pub fn new(strategies: Vec<Box<dyn VoidStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn is_void(&self, type_text: &str, model: &SemanticModel) -> bool {
        self.strategies
            .iter()
            .find_map(|s| s.is_void(type_text, model))
            .unwrap_or(false)
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

impl Default for VoidOracle {
    fn default() -> Self {
        Self::new(vec![
            Box::new(LiteralText),
            Box::new(ResolvedSymbol),
            Box::new(InferredAlias),
        ])
    }
}

const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "nint",
    "nuint", "long", "ulong", "short", "ushort", "object", "string", "dynamic",
];

/// Compares the type text against the `void` keyword.
///
/// Also settles the question for predefined keyword types and for any type
/// spelled with generic arguments, array ranks, pointers or nullability.
#[derive(Debug, Clone, Copy)]
pub struct LiteralText;

impl VoidStrategy for LiteralText {
    fn name(&self) -> &'static str {
        "literal-text"
    }

    fn is_void(&self, type_text: &str, _model: &SemanticModel) -> Option<bool> {
        let text = type_text.trim();
        if text == "void" {
            return Some(true);
        }
        if PREDEFINED_TYPES.contains(&text) || text.contains(['<', '[', '?', '(']) {
            return Some(false);
        }
        None
    }
}

/// Resolves `System.Void` spelled out with or without `global::`.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSymbol;

impl VoidStrategy for ResolvedSymbol {
    fn name(&self) -> &'static str {
        "resolved-symbol"
    }

    fn is_void(&self, type_text: &str, _model: &SemanticModel) -> Option<bool> {
        let text = strip_global(type_text.trim());
        match text.strip_prefix("System.") {
            Some("Void") => Some(true),
            Some(_) => Some(false),
            None => None,
        }
    }
}

/// Follows a `using` alias to its target.
#[derive(Debug, Clone, Copy)]
pub struct InferredAlias;

impl VoidStrategy for InferredAlias {
    fn name(&self) -> &'static str {
        "inferred-alias"
    }

    fn is_void(&self, type_text: &str, model: &SemanticModel) -> Option<bool> {
        let target = model.alias_target(type_text.trim())?;
        Some(strip_global(target) == "System.Void")
    }
}

fn strip_global(text: &str) -> &str {
    text.strip_prefix("global::").unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn model(source: &str) -> (SemanticModel, SourceFile) {
        let file = SourceFile::cast(parse(source).syntax()).unwrap();
        (SemanticModel::new(&file), file)
    }

    #[test]
    fn test_void_strategies_in_order() {
        let (model, _) = model("using Nothing = global::System.Void;\nusing Num = System.Int32;\n");
        assert!(model.returns_void("void"));
        assert!(model.returns_void("System.Void"));
        assert!(model.returns_void("global::System.Void"));
        assert!(model.returns_void("Nothing"));
        assert!(!model.returns_void("Num"));
        assert!(!model.returns_void("int"));
        assert!(!model.returns_void("Task"));
        assert!(!model.returns_void("List<void>"));
    }

    #[test]
    fn test_default_chain_names() {
        assert_eq!(
            VoidOracle::default().strategy_names(),
            vec!["literal-text", "resolved-symbol", "inferred-alias"]
        );
    }

    #[test]
    fn test_declared_symbol_categories() {
        let (model, file) = model(
            "class C { int f; event System.Action E; int P { get; } void M() { } C() { } int this[int i] => i; }",
        );
        let categories: Vec<_> = file
            .syntax()
            .descendants()
            .filter(|n| n.kind().is_type_decl() || n.kind().is_member_decl())
            .map(|n| model.declared_symbol(&n).map(|s| s.category))
            .collect();
        assert_eq!(
            categories,
            vec![
                Some(SymbolCategory::NamedType),
                Some(SymbolCategory::Field),
                Some(SymbolCategory::Event),
                Some(SymbolCategory::Property),
                Some(SymbolCategory::Method),
                Some(SymbolCategory::Method),
                Some(SymbolCategory::Property),
            ]
        );
    }
}

//! High-level IR (HIR): declarations, documentation blocks and rules.
//!
//! This module turns a parsed file into plain data the policy can be
//! evaluated against, and evaluates it.
//!
//! ## Key Types
//!
//! - [`FileModel`]: Declarations and directives of one file
//! - [`Declaration`]: A documentable type or member
//! - [`DocBlock`]: The `///` block in front of a declaration
//! - [`SemanticModel`]: Declared symbols and the void oracle
//! - [`Diagnostic`] / [`RuleId`]: Findings and their stable ids
//!
//! ## Layers
//!
//! ```text
//! text
//!     │
//!     ▼
//! parse(text)                 ← lossless CST
//!     │
//!     ▼
//! build_file_model(file)      ← declarations + doc blocks + symbols
//!     │
//!     ▼
//! evaluate / evaluate_file    ← diagnostics
//! ```

mod declarations;
mod diagnostics;
mod doc;
mod rules;
mod semantic;

pub use declarations::{
    Accessibility, DeclKind, Declaration, Directive, DirectiveKind, FileModel, MemberKind,
    NestedType, Parameter, ReturnType, TypeKind, build_file_model, build_file_model_with,
    leading_doc,
};
pub use diagnostics::{
    Diagnostic, DiagnosticCollector, RULE_ID_PREFIX, RuleId, RuleScope, Severity,
};
pub use doc::{DocBlock, DocLine, Tag};
pub use rules::{MEMBER_REMARKS_MARKER, REMARKS_MARKERS, evaluate, evaluate_file, evaluate_file_with};
pub use semantic::{
    DeclaredSymbol, InferredAlias, LiteralText, ResolvedSymbol, SemanticModel, SymbolCategory,
    VoidOracle, VoidStrategy,
};

//! # docwarden-base
//!
//! Core library for checking and repairing C# XML documentation comments.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! fix         → Node matcher, incremental repair, block stripping, pipeline
//!   ↓
//! interchange → Diagnostic log (XML) and fix report (JSON)
//!   ↓
//! project     → Workspace loading, file filters
//!   ↓
//! hir         → Declarations, documentation blocks, rule engine
//!   ↓
//! parser      → Logos lexer, recursive-descent parser, rowan CST
//!   ↓
//! core        → Text helpers shared by the layers above
//!   ↓
//! base        → Primitives (FileId, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → core → parser → hir → project → fix)
// ============================================================================

/// Foundation types: FileId, TextRange, LineIndex
pub mod base;

/// Text helpers: identifiers, line boundaries, newline detection
pub mod core;

/// Parser: Logos lexer, recursive-descent parser, rowan CST
pub mod parser;

/// High-level IR: declarations, documentation blocks, rules
pub mod hir;

/// Project management: workspace loading, file filters
pub mod project;

/// Repair: matching, patching, stripping, the fix pipeline
pub mod fix;

/// Interchange formats: diagnostic log, fix report
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the rule engine
pub use hir::{
    DeclKind, Declaration, Diagnostic, DocBlock, FileModel, RuleId, Severity, build_file_model,
    evaluate, evaluate_file,
};

// Re-export the workflow
pub use fix::{
    CleanSummary, DiagnosticRecord, FixConfig, FixError, FixPipeline, FixReport, repair,
    strip_doc_comments,
};
pub use project::{FileFilter, Workspace, WorkspaceLoader};

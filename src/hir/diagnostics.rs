//! Diagnostics: documentation compliance findings.
//!
//! A diagnostic names the violated rule, the declaration it concerns and the
//! exact source range to point at. Diagnostics carry no live reference to a
//! declaration: the repair stage re-derives one from the rule id, the name
//! and the message text.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use super::declarations::{Declaration, DeclKind, NestedType, Parameter};
use crate::base::{FileId, TextRange};

// ============================================================================
// RULE IDS
// ============================================================================

/// Prefix carried by every rule id in logs and reports.
pub const RULE_ID_PREFIX: &str = "PROJECT_";

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Info,
}

/// Which declarations a rule may be reported against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleScope {
    /// Classes, structs, interfaces, enums and delegates.
    Type,
    /// Methods, properties, fields, events and the other members.
    Member,
    /// Signature tags, reported for members and delegates alike.
    Signature,
    /// Whole-file findings with no single owning declaration.
    File,
}

macro_rules! rule_ids {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        /// Stable identifier of a documentation rule.
        ///
        /// External tooling keys off these ids; a rule never changes meaning
        /// without changing its id.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum RuleId {
            $($variant),+
        }

        impl RuleId {
            pub const ALL: &'static [RuleId] = &[$(RuleId::$variant),+];

            /// The full id, e.g. `PROJECT_TYPE_NO_COMMENT_BLOCK`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(RuleId::$variant => concat!("PROJECT_", $id)),+
                }
            }

            /// Parse an id with or without the `PROJECT_` prefix.
            pub fn parse(text: &str) -> Option<RuleId> {
                let text = text.trim();
                let bare = text.strip_prefix(RULE_ID_PREFIX).unwrap_or(text);
                match bare {
                    $($id => Some(RuleId::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

rule_ids! {
    TypeNoCommentBlock => "TYPE_NO_COMMENT_BLOCK",
    MemberNoCommentBlock => "MEMBER_NO_COMMENT_BLOCK",
    TypeMissingSummary => "TYPE_MISSING_SUMMARY",
    TypeMissingRemarks => "TYPE_MISSING_REMARKS",
    TypeMissingRemarksTag => "TYPE_MISSING_REMARKS_TAG",
    MemberMissingSummary => "MEMBER_MISSING_SUMMARY",
    MemberMissingRemarks => "MEMBER_MISSING_REMARKS",
    MemberMissingParam => "MEMBER_MISSING_PARAM",
    MemberMissingTypeParam => "MEMBER_MISSING_TYPEPARAM",
    MemberMissingReturns => "MEMBER_MISSING_RETURNS",
    TypeDuplicateSummary => "TYPE_DUPLICATE_SUMMARY",
    TypeDuplicateRemarks => "TYPE_DUPLICATE_REMARKS",
    MemberDuplicateSummary => "MEMBER_DUPLICATE_SUMMARY",
    MemberDuplicateRemarks => "MEMBER_DUPLICATE_REMARKS",
    TypeNestedType => "TYPE_NESTED_TYPE",
    TypeNestedEnum => "TYPE_NESTED_ENUM",
    TypeMultiEnumFile => "TYPE_MULTI_ENUM_FILE",
    ConditionalCompilationWarning => "CONDITIONAL_COMPILATION_WARNING",
}

impl RuleId {
    pub fn scope(self) -> RuleScope {
        use RuleId::*;
        match self {
            TypeNoCommentBlock | TypeMissingSummary | TypeMissingRemarks
            | TypeMissingRemarksTag | TypeDuplicateSummary | TypeDuplicateRemarks
            | TypeNestedType | TypeNestedEnum => RuleScope::Type,
            MemberNoCommentBlock | MemberMissingSummary | MemberMissingRemarks
            | MemberDuplicateSummary | MemberDuplicateRemarks => RuleScope::Member,
            MemberMissingParam | MemberMissingTypeParam | MemberMissingReturns => {
                RuleScope::Signature
            }
            TypeMultiEnumFile | ConditionalCompilationWarning => RuleScope::File,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            RuleId::ConditionalCompilationWarning => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Whether the repair engine can act on this rule.
    ///
    /// Structural and file-level findings need a human to move code around.
    pub fn is_repairable(self) -> bool {
        !matches!(
            self,
            RuleId::TypeNestedType
                | RuleId::TypeNestedEnum
                | RuleId::TypeMultiEnumFile
                | RuleId::ConditionalCompilationWarning
        )
    }

    /// Gate-1 finding: the declaration has no documentation block at all.
    pub fn is_no_comment_block(self) -> bool {
        matches!(self, RuleId::TypeNoCommentBlock | RuleId::MemberNoCommentBlock)
    }

    pub fn is_duplicate(self) -> bool {
        matches!(
            self,
            RuleId::TypeDuplicateSummary
                | RuleId::TypeDuplicateRemarks
                | RuleId::MemberDuplicateSummary
                | RuleId::MemberDuplicateRemarks
        )
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule: RuleId,
    /// Name of the declaration (or file) the finding concerns.
    pub declaration_name: SmolStr,
    pub message: Arc<str>,
    pub file: FileId,
    pub range: TextRange,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(
        rule: RuleId,
        file: FileId,
        range: TextRange,
        declaration_name: impl Into<SmolStr>,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            rule,
            declaration_name: declaration_name.into(),
            message: message.into(),
            file,
            range,
            severity: rule.severity(),
        }
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during rule evaluation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn for_declaration(
        &mut self,
        rule: RuleId,
        decl: &Declaration,
        range: TextRange,
        message: String,
    ) {
        self.add(Diagnostic::new(
            rule,
            decl.file,
            range,
            decl.name.clone(),
            message,
        ));
    }

    /// Gate 1: no documentation block, reported at the name.
    pub fn no_comment_block(&mut self, decl: &Declaration) {
        let rule = match decl.kind {
            DeclKind::Type(_) => RuleId::TypeNoCommentBlock,
            DeclKind::Member(_) => RuleId::MemberNoCommentBlock,
        };
        self.for_declaration(
            rule,
            decl,
            decl.name_range,
            format!(
                "{} '{}' has no XML documentation comment block",
                decl.kind.display(),
                decl.name
            ),
        );
    }

    pub fn missing_summary(&mut self, decl: &Declaration, at: TextRange) {
        let rule = match decl.kind {
            DeclKind::Type(_) => RuleId::TypeMissingSummary,
            DeclKind::Member(_) => RuleId::MemberMissingSummary,
        };
        self.for_declaration(
            rule,
            decl,
            at,
            format!(
                "{} '{}' is missing a <summary> tag in its XML documentation",
                decl.kind.display(),
                decl.name
            ),
        );
    }

    pub fn missing_remarks(&mut self, decl: &Declaration, at: TextRange) {
        let rule = match decl.kind {
            DeclKind::Type(_) => RuleId::TypeMissingRemarks,
            DeclKind::Member(_) => RuleId::MemberMissingRemarks,
        };
        self.for_declaration(
            rule,
            decl,
            at,
            format!(
                "{} '{}' is missing a <remarks> tag in its XML documentation",
                decl.kind.display(),
                decl.name
            ),
        );
    }

    pub fn missing_remarks_marker(&mut self, decl: &Declaration, remarks: TextRange, marker: &str) {
        self.for_declaration(
            RuleId::TypeMissingRemarksTag,
            decl,
            remarks,
            format!(
                "{} '{}' <remarks> is missing the required section '{}'",
                decl.kind.display(),
                decl.name,
                marker
            ),
        );
    }

    pub fn missing_param(&mut self, decl: &Declaration, param: &Parameter) {
        self.for_declaration(
            RuleId::MemberMissingParam,
            decl,
            param.range,
            format!(
                "{} '{}' is missing a <param> tag for parameter '{}'",
                decl.kind.display(),
                decl.name,
                param.name
            ),
        );
    }

    pub fn missing_type_param(&mut self, decl: &Declaration, type_param: &Parameter) {
        self.for_declaration(
            RuleId::MemberMissingTypeParam,
            decl,
            type_param.range,
            format!(
                "Generic {} '{}' is missing a <typeparam> tag for type parameter '{}'",
                decl.kind.display().to_ascii_lowercase(),
                decl.name,
                type_param.name
            ),
        );
    }

    pub fn missing_returns(&mut self, decl: &Declaration, at: TextRange) {
        self.for_declaration(
            RuleId::MemberMissingReturns,
            decl,
            at,
            format!(
                "{} '{}' returns a value but is missing a <returns> tag",
                decl.kind.display(),
                decl.name
            ),
        );
    }

    /// `tag` is `"summary"` or `"remarks"`.
    pub fn duplicate_tag(&mut self, decl: &Declaration, block: TextRange, tag: &str, count: usize) {
        let rule = match (decl.kind, tag) {
            (DeclKind::Type(_), "summary") => RuleId::TypeDuplicateSummary,
            (DeclKind::Type(_), _) => RuleId::TypeDuplicateRemarks,
            (DeclKind::Member(_), "summary") => RuleId::MemberDuplicateSummary,
            (DeclKind::Member(_), _) => RuleId::MemberDuplicateRemarks,
        };
        self.for_declaration(
            rule,
            decl,
            block,
            format!(
                "{} '{}' has {} <{}> tags in its XML documentation",
                decl.kind.display(),
                decl.name,
                count,
                tag
            ),
        );
    }

    /// Structural finding owned by the outer type.
    pub fn nested_type(&mut self, outer: &Declaration, nested: &NestedType) {
        let (rule, what) = if nested.is_enum {
            (RuleId::TypeNestedEnum, "Enum")
        } else {
            (RuleId::TypeNestedType, "Type")
        };
        self.add(Diagnostic::new(
            rule,
            outer.file,
            nested.name_range,
            nested.name.clone(),
            format!(
                "{} '{}' should not be nested inside type '{}'",
                what, nested.name, outer.name
            ),
        ));
    }

    pub fn multi_enum_file(
        &mut self,
        file: FileId,
        file_name: &str,
        first_enum: TextRange,
        enums: &[&str],
    ) {
        let names: Vec<String> = enums.iter().map(|n| format!("'{n}'")).collect();
        self.add(Diagnostic::new(
            RuleId::TypeMultiEnumFile,
            file,
            first_enum,
            file_name,
            format!(
                "File '{}' declares {} top-level enums ({}); each enum belongs in its own file",
                file_name,
                enums.len(),
                names.join(", ")
            ),
        ));
    }

    pub fn conditional_compilation(
        &mut self,
        file: FileId,
        file_name: &str,
        first_directive: TextRange,
        kinds: &[&str],
    ) {
        self.add(Diagnostic::new(
            RuleId::ConditionalCompilationWarning,
            file,
            first_directive,
            file_name,
            format!(
                "File '{}' contains conditional compilation directives ({}); documentation may be attached to the wrong declaration",
                file_name,
                kinds.join(", ")
            ),
        ));
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics for a specific file.
    pub fn diagnostics_for_file(&self, file: FileId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.file == file).collect()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Repair events and the sinks that receive them.
//!
//! Matching and patching never log directly. Every decision is reported as a
//! [`RepairEvent`] to the [`RepairObserver`] the pipeline was given.

use parking_lot::Mutex;
use smol_str::SmolStr;

use crate::hir::{RuleId, SymbolCategory};

/// One step of a targeted patch that changed the block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchOp {
    CloseRemarks,
    Deduplicate { tag: SmolStr, removed: usize },
    InsertSummary,
    FillSummary,
    InsertRemarks,
    CompleteMarkers(usize),
    InsertTypeParams(usize),
    InsertParams(usize),
    InsertReturns,
    CollapseBlankLines,
}

/// Why a structurally plausible candidate was turned down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The declared symbol is not of the category the declaration kind implies.
    InconsistentSymbol {
        expected: SymbolCategory,
        found: Option<SymbolCategory>,
    },
    /// An identical diagnostic already claimed this declaration.
    AlreadyClaimed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepairEvent {
    MatchAccepted {
        rule: RuleId,
        declaration: SmolStr,
        /// Re-evaluating the declaration reproduced the diagnostic.
        corroborated: bool,
    },
    MatchRejected {
        rule: RuleId,
        declaration: SmolStr,
        reason: RejectReason,
    },
    Unmatched {
        rule: RuleId,
        message: String,
    },
    /// The rule needs a human; nothing is attempted.
    RuleSkipped { rule: RuleId },
    Synthesized { declaration: SmolStr },
    Patched {
        declaration: SmolStr,
        ops: Vec<PatchOp>,
    },
    /// The declaration's text was left unchanged.
    Abandoned { declaration: SmolStr, reason: String },
}

pub trait RepairObserver: Send + Sync {
    fn on_event(&self, path: &str, event: &RepairEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl RepairObserver for NoopObserver {
    fn on_event(&self, _path: &str, _event: &RepairEvent) {}
}

/// Forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl RepairObserver for TracingObserver {
    fn on_event(&self, path: &str, event: &RepairEvent) {
        match event {
            RepairEvent::MatchAccepted {
                rule,
                declaration,
                corroborated,
            } => tracing::trace!(path, %rule, %declaration, corroborated, "matched diagnostic"),
            RepairEvent::MatchRejected {
                rule,
                declaration,
                reason,
            } => tracing::trace!(path, %rule, %declaration, ?reason, "rejected candidate"),
            RepairEvent::Unmatched { rule, message } => {
                tracing::debug!(path, %rule, message = message.as_str(), "unmatched diagnostic")
            }
            RepairEvent::RuleSkipped { rule } => {
                tracing::trace!(path, %rule, "rule not repairable")
            }
            RepairEvent::Synthesized { declaration } => {
                tracing::debug!(path, %declaration, "synthesized documentation block")
            }
            RepairEvent::Patched { declaration, ops } => {
                tracing::debug!(path, %declaration, ?ops, "patched documentation block")
            }
            RepairEvent::Abandoned {
                declaration,
                reason,
            } => tracing::debug!(path, %declaration, reason = reason.as_str(), "abandoned repair"),
        }
    }
}

/// Records every event in arrival order.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<(String, RepairEvent)>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, RepairEvent)> {
        self.events.lock().clone()
    }

    pub fn take(&self) -> Vec<(String, RepairEvent)> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl RepairObserver for CollectingObserver {
    fn on_event(&self, path: &str, event: &RepairEvent) {
        self.events.lock().push((path.to_string(), event.clone()));
    }
}

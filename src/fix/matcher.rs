//! Node matcher: attach a diagnostic to the declaration it was raised for.
//!
//! Diagnostics reach the repair stage as records (rule id and message, file
//! and position) after the file was re-parsed, so there is no handle to the
//! original node. Positions are not trusted either since earlier edits shift
//! them. Matching is structural instead:
//!
//! 1. the rule's scope selects type or member candidates,
//! 2. the message must quote the candidate's name,
//! 3. the candidate's declared symbol must be of the category its kind
//!    implies (a mismatch is rejected outright),
//! 4. among the survivors a candidate whose re-evaluation reproduces the
//!    diagnostic wins, else the first one.

use rustc_hash::{FxHashMap, FxHashSet};

use super::observer::{RejectReason, RepairEvent, RepairObserver};
use crate::hir::{DeclKind, Declaration, RuleId, RuleScope, evaluate};

/// Whether a rule may be reported against a declaration of this kind.
fn in_scope(rule: RuleId, kind: DeclKind) -> bool {
    match rule.scope() {
        RuleScope::Type => kind.is_type(),
        RuleScope::Member => !kind.is_type(),
        RuleScope::Signature => match rule {
            RuleId::MemberMissingParam => kind.requires_param_tags(),
            _ => kind.requires_signature_tags(),
        },
        RuleScope::File => false,
    }
}

fn quotes_name(message: &str, decl: &Declaration) -> bool {
    message.contains(&format!("'{}'", decl.name))
}

fn consistency(decl: &Declaration) -> Result<(), RejectReason> {
    let expected = decl.kind.expected_category();
    let found = decl.symbol.map(|s| s.category);
    if found == Some(expected) {
        Ok(())
    } else {
        Err(RejectReason::InconsistentSymbol { expected, found })
    }
}

/// Match a single diagnostic against a declaration list.
///
/// Stateless: no claims are recorded and no events are emitted.
pub fn match_diagnostic<'a>(
    rule: RuleId,
    message: &str,
    declarations: &'a [Declaration],
) -> Option<&'a Declaration> {
    if !rule.is_repairable() {
        return None;
    }
    let consistent: Vec<&Declaration> = declarations
        .iter()
        .filter(|d| in_scope(rule, d.kind) && quotes_name(message, d))
        .filter(|d| consistency(d).is_ok())
        .collect();
    consistent
        .iter()
        .find(|d| reproduces(d, rule, message))
        .or_else(|| consistent.first())
        .copied()
}

fn reproduces(decl: &Declaration, rule: RuleId, message: &str) -> bool {
    evaluate(decl)
        .iter()
        .any(|d| d.rule == rule && &*d.message == message)
}

/// Matches all diagnostics of one file.
///
/// A `(declaration, rule, message)` triple is claimed by the first diagnostic
/// matching it, so identical diagnostics raised for overloads land on
/// distinct declarations.
pub struct NodeMatcher<'a> {
    path: &'a str,
    declarations: &'a [Declaration],
    observer: &'a dyn RepairObserver,
    claimed: FxHashSet<(usize, RuleId, String)>,
    evaluated: FxHashMap<usize, Vec<(RuleId, String)>>,
}

impl<'a> NodeMatcher<'a> {
    pub fn new(
        path: &'a str,
        declarations: &'a [Declaration],
        observer: &'a dyn RepairObserver,
    ) -> Self {
        Self {
            path,
            declarations,
            observer,
            claimed: FxHashSet::default(),
            evaluated: FxHashMap::default(),
        }
    }

    fn emit(&self, event: RepairEvent) {
        self.observer.on_event(self.path, &event);
    }

    fn corroborates(&mut self, index: usize, rule: RuleId, message: &str) -> bool {
        let declarations = self.declarations;
        self.evaluated
            .entry(index)
            .or_insert_with(|| {
                evaluate(&declarations[index])
                    .into_iter()
                    .map(|d| (d.rule, d.message.to_string()))
                    .collect()
            })
            .iter()
            .any(|(r, m)| *r == rule && m == message)
    }

    /// Index of the declaration `rule`/`message` belongs to.
    pub fn match_one(&mut self, rule: RuleId, message: &str) -> Option<usize> {
        if !rule.is_repairable() {
            self.emit(RepairEvent::RuleSkipped { rule });
            return None;
        }

        let mut candidates = Vec::new();
        for (index, decl) in self.declarations.iter().enumerate() {
            if !in_scope(rule, decl.kind) || !quotes_name(message, decl) {
                continue;
            }
            if let Err(reason) = consistency(decl) {
                self.emit(RepairEvent::MatchRejected {
                    rule,
                    declaration: decl.name.clone(),
                    reason,
                });
                continue;
            }
            if self.claimed.contains(&(index, rule, message.to_string())) {
                self.emit(RepairEvent::MatchRejected {
                    rule,
                    declaration: decl.name.clone(),
                    reason: RejectReason::AlreadyClaimed,
                });
                continue;
            }
            candidates.push(index);
        }

        let corroborated = candidates
            .iter()
            .copied()
            .find(|&i| self.corroborates(i, rule, message));
        let chosen = corroborated.or_else(|| candidates.first().copied());
        match chosen {
            Some(index) => {
                self.claimed.insert((index, rule, message.to_string()));
                self.emit(RepairEvent::MatchAccepted {
                    rule,
                    declaration: self.declarations[index].name.clone(),
                    corroborated: corroborated.is_some(),
                });
                Some(index)
            }
            None => {
                self.emit(RepairEvent::Unmatched {
                    rule,
                    message: message.to_string(),
                });
                None
            }
        }
    }
}

//! Repair of documentation findings.
//!
//! ```text
//! Workspace ──analyze──▶ DiagnosticRecord* ──(log)──▶ group by file
//!                                                        │
//!                     NodeMatcher: record ─▶ declaration │
//!                                                        ▼
//!              repair: full synthesis | targeted patch ─▶ TextEdit*
//!                                                        │
//!                                   splice back to front ▼
//! Workspace ◀──────────── new text ──────── re-analyze ─▶ FixReport
//! ```
//!
//! [`strip_doc_comments`] is the reverse operation used by the clean
//! workflow; it does not take part in matching or repair.

mod error;
mod matcher;
mod observer;
mod pipeline;
mod record;
mod repair;
mod report;
mod strip;
pub mod template;

pub use error::FixError;
pub use matcher::{NodeMatcher, match_diagnostic};
pub use observer::{
    CollectingObserver, NoopObserver, PatchOp, RejectReason, RepairEvent, RepairObserver,
    TracingObserver,
};
pub use pipeline::{CleanSummary, FixConfig, FixPipeline, post_log_path};
pub use record::DiagnosticRecord;
pub use repair::{FileRepair, Repair, RepairAction, TextEdit, plan_repair, repair, repair_file};
pub use report::{FileResult, FixReport, FixSummary, RemainingIssue};
pub use strip::{StripResult, strip_doc_comments};

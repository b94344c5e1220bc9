//! Interchange formats for diagnostics and reports.
//!
//! Analysis and repair are separate stages; what the first produces is
//! persisted so the second (or an outside tool) can pick it up:
//!
//! - **Diagnostic log** - XML list of findings, one `<Diagnostic>` per issue
//! - **Fix report** - JSON summary of a fix run
//!
//! ```text
//! ┌────────────────┐        ┌────────────────┐
//! │ diagnostics.xml│        │  report.json   │
//! └───────┬────────┘        └───────┬────────┘
//!         │                         │
//!         ▼                         ▼
//! ┌──────────────────────────────────────────┐
//! │          DocumentFormat trait            │
//! │  - read(&[u8]) -> Result<Document>       │
//! │  - write(&Document) -> Result<Vec<u8>>   │
//! └──────────────────────────────────────────┘
//! ```

mod diagnostic_log;
mod error;
mod format;
mod json_report;

pub use diagnostic_log::DiagnosticLog;
pub use error::InterchangeError;
pub use format::DocumentFormat;
pub use json_report::JsonReport;

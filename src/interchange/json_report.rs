//! Fix report as JSON, with the key names downstream tooling reads.

use super::{DocumentFormat, InterchangeError};
use crate::fix::FixReport;

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonReport;

impl DocumentFormat for JsonReport {
    type Document = FixReport;

    fn name(&self) -> &'static str {
        "fix-report"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn read(&self, input: &[u8]) -> Result<FixReport, InterchangeError> {
        serde_json::from_slice(input)
            .map_err(|e| InterchangeError::json(format!("Failed to parse report: {e}")))
    }

    fn write(&self, report: &FixReport) -> Result<Vec<u8>, InterchangeError> {
        serde_json::to_vec_pretty(report)
            .map_err(|e| InterchangeError::json(format!("Failed to serialize report: {e}")))
    }
}

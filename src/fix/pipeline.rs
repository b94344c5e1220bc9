//! The fix workflow: analyze, repair, re-analyze, report.
//!
//! Stages are separated by full barriers. Repair never sees live
//! diagnostics, only [`DiagnosticRecord`]s (optionally round-tripped through
//! the diagnostic log on disk), and the second analysis re-parses the
//! repaired text from scratch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::error::FixError;
use super::observer::{RepairObserver, TracingObserver};
use super::record::DiagnosticRecord;
use super::repair::repair_file;
use super::report::{FileResult, FixReport};
use super::strip::strip_doc_comments;
use crate::base::LineIndex;
use crate::hir::{build_file_model, evaluate_file_with};
use crate::parser::parse;
use crate::project::{FileFilter, Workspace, WorkspaceFile};

#[cfg(feature = "interchange")]
use crate::interchange::{DiagnosticLog, DocumentFormat, JsonReport};

/// Settings of one fix run.
#[derive(Clone, Debug)]
pub struct FixConfig {
    /// Files to repair; an empty filter repairs every file.
    pub file_filter: FileFilter,
    /// Fan out over files and declarations with rayon.
    pub parallel: bool,
    /// Reject a repaired file that no longer parses cleanly.
    pub verify: bool,
    /// Where to persist the diagnostics between analysis and repair. The
    /// post-repair diagnostics go next to it as `<name>_post.<ext>`.
    pub diagnostic_log: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            file_filter: FileFilter::all(),
            parallel: true,
            verify: true,
            diagnostic_log: None,
            report_path: None,
        }
    }
}

impl FixConfig {
    pub fn with_file_filter(mut self, filter: FileFilter) -> Self {
        self.file_filter = filter;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_diagnostic_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.diagnostic_log = Some(path.into());
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }
}

/// Outcome of stripping documentation from a workspace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub files_changed: usize,
    pub lines_removed: usize,
}

/// `diagnostics.xml` -> `diagnostics_post.xml`
pub fn post_log_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_post.{}", ext.to_string_lossy()),
        None => format!("{stem}_post"),
    };
    path.with_file_name(name)
}

pub struct FixPipeline {
    config: FixConfig,
    observer: Arc<dyn RepairObserver>,
}

impl Default for FixPipeline {
    fn default() -> Self {
        Self::new(FixConfig::default())
    }
}

impl FixPipeline {
    pub fn new(config: FixConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RepairObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &FixConfig {
        &self.config
    }

    fn map_files<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.config.parallel {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }

    /// Evaluate every file of the workspace.
    pub fn analyze(&self, workspace: &Workspace) -> Vec<DiagnosticRecord> {
        let files: Vec<&WorkspaceFile> = workspace.iter().collect();
        self.map_files(&files, |file| self.analyze_file(file))
            .into_iter()
            .flatten()
            .collect()
    }

    fn analyze_file(&self, file: &WorkspaceFile) -> Vec<DiagnosticRecord> {
        let model = build_file_model(file.id, file.path.clone(), &file.text);
        let index = LineIndex::new(&file.text);
        evaluate_file_with(&model, self.config.parallel)
            .iter()
            .map(|d| DiagnosticRecord::from_diagnostic(d, &file.path, &index))
            .collect()
    }

    /// Run the whole workflow over `workspace`, updating its texts.
    ///
    /// Per-file failures end up in the report; only failing to persist the
    /// log or the report is an error.
    pub fn run(&self, workspace: &mut Workspace) -> Result<FixReport, FixError> {
        info!(files = workspace.len(), "analyzing workspace");
        let before = self.analyze(workspace);
        info!(issues = before.len(), "analysis complete");
        let before = self.exchange_log(before)?;

        let groups = self.group_by_file(workspace, &before);
        info!(files = groups.len(), "repairing files");
        let outcomes = {
            let workspace: &Workspace = workspace;
            self.map_files(&groups, |(path, records)| match workspace.get(path) {
                Some(file) => self.repair_one(file, records),
                None => (FileResult::failed(&**path, "file is not in the workspace"), None),
            })
        };

        let mut file_results = Vec::with_capacity(outcomes.len());
        for (result, text) in outcomes {
            if let Some(text) = text {
                workspace.set_text(&result.file_path, text);
            }
            file_results.push(result);
        }

        let after = self.analyze(workspace);
        info!(
            before = before.len(),
            after = after.len(),
            "re-analysis complete"
        );
        self.write_post_log(&after)?;

        let report = FixReport::new(before.len(), &after, file_results);
        self.write_report(&report)?;
        Ok(report)
    }

    fn group_by_file(
        &self,
        workspace: &Workspace,
        records: &[DiagnosticRecord],
    ) -> Vec<(Arc<str>, Vec<DiagnosticRecord>)> {
        let mut groups: IndexMap<Arc<str>, Vec<DiagnosticRecord>> = IndexMap::new();
        for record in records {
            if !self.config.file_filter.admits(&record.file_path) {
                continue;
            }
            let Some(file) = workspace.get(&record.file_path) else {
                debug!(path = record.file_path.as_str(), "diagnostic for unknown file");
                continue;
            };
            groups
                .entry(file.path.clone())
                .or_default()
                .push(record.clone());
        }
        groups.into_iter().collect()
    }

    fn repair_one(
        &self,
        file: &WorkspaceFile,
        records: &[DiagnosticRecord],
    ) -> (FileResult, Option<String>) {
        let path = &*file.path;
        let model = build_file_model(file.id, file.path.clone(), &file.text);
        if !model.errors.is_empty() {
            let err = FixError::parse(path, &model.errors);
            warn!(path, error = %err, "skipping file");
            return (FileResult::failed(path, err), None);
        }

        let repaired = repair_file(&model, &file.text, records, self.observer.as_ref());
        if !repaired.changed() {
            return (FileResult::succeeded(path, 0), None);
        }
        if self.config.verify {
            let errors = parse(&repaired.text).errors;
            if !errors.is_empty() {
                let err = FixError::parse(path, &errors);
                warn!(path, error = %err, "repair broke the file, discarding it");
                return (FileResult::failed(path, err), None);
            }
        }
        debug!(path, fixes = repaired.fixes_applied, "repaired file");
        (
            FileResult::succeeded(path, repaired.fixes_applied),
            Some(repaired.text),
        )
    }

    /// Strip every documentation block from the files `filter` admits.
    pub fn clean(&self, workspace: &mut Workspace, filter: &FileFilter) -> CleanSummary {
        let files: Vec<(Arc<str>, Arc<str>)> = workspace
            .iter()
            .filter(|f| filter.admits(&f.path))
            .map(|f| (f.path.clone(), f.text.clone()))
            .collect();
        let stripped = self.map_files(&files, |(path, text)| {
            (path.clone(), strip_doc_comments(text))
        });

        let mut summary = CleanSummary::default();
        for (path, result) in stripped {
            if result.changed() && workspace.set_text(&path, result.text) {
                summary.files_changed += 1;
                summary.lines_removed += result.removed_lines;
            }
        }
        info!(
            files = summary.files_changed,
            lines = summary.lines_removed,
            "stripped documentation"
        );
        summary
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    #[cfg(feature = "interchange")]
    fn exchange_log(
        &self,
        records: Vec<DiagnosticRecord>,
    ) -> Result<Vec<DiagnosticRecord>, FixError> {
        let Some(path) = &self.config.diagnostic_log else {
            return Ok(records);
        };
        DiagnosticLog.write_file(path, &records)?;
        debug!(path = %path.display(), "wrote diagnostic log");
        Ok(DiagnosticLog.read_file(path)?)
    }

    #[cfg(feature = "interchange")]
    fn write_post_log(&self, records: &[DiagnosticRecord]) -> Result<(), FixError> {
        if let Some(path) = &self.config.diagnostic_log {
            let path = post_log_path(path);
            DiagnosticLog.write_file(&path, &records.to_vec())?;
            debug!(path = %path.display(), "wrote post-repair diagnostic log");
        }
        Ok(())
    }

    #[cfg(feature = "interchange")]
    fn write_report(&self, report: &FixReport) -> Result<(), FixError> {
        if let Some(path) = &self.config.report_path {
            JsonReport.write_file(path, report)?;
            info!(path = %path.display(), "wrote fix report");
        }
        Ok(())
    }

    #[cfg(not(feature = "interchange"))]
    fn exchange_log(
        &self,
        records: Vec<DiagnosticRecord>,
    ) -> Result<Vec<DiagnosticRecord>, FixError> {
        if self.config.diagnostic_log.is_some() {
            warn!("diagnostic log requires the `interchange` feature, keeping it in memory");
        }
        Ok(records)
    }

    #[cfg(not(feature = "interchange"))]
    fn write_post_log(&self, _records: &[DiagnosticRecord]) -> Result<(), FixError> {
        Ok(())
    }

    #[cfg(not(feature = "interchange"))]
    fn write_report(&self, _report: &FixReport) -> Result<(), FixError> {
        if self.config.report_path.is_some() {
            warn!("writing the report requires the `interchange` feature");
        }
        Ok(())
    }
}

//! Numbered on-disk persistence of operation reports

use chrono::Local;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConversionError, ConversionErrorKind};
use crate::report::ConversionReport;

use super::CliResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Files written for one persisted report
#[derive(Debug, Clone, PartialEq)]
pub struct SavedReport {
    pub index: usize,
    pub report_path: PathBuf,
    pub result_path: Option<PathBuf>,
}

/// Writes `<operation>_<n>.json` reports, plus `result_<operation>_<n>.<ext>`
/// for operations that produced a document.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Index the next report for `operation` will receive, starting at 1
    pub fn next_index(&self, operation: &str) -> CliResult<usize> {
        if !self.dir.exists() {
            return Ok(1);
        }

        let prefix = format!("{}_", operation);
        let entries = fs::read_dir(&self.dir).map_err(|e| self.io_error(e, &self.dir))?;
        let mut existing = 0;
        for entry in entries {
            let entry = entry.map_err(|e| self.io_error(e, &self.dir))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&prefix) && name.ends_with(".json") {
                existing += 1;
            }
        }
        Ok(existing + 1)
    }

    /// Persist a report, and the produced document when there is one
    pub fn save(
        &self,
        operation: &str,
        report: &ConversionReport,
        result: Option<(&[u8], &str)>,
    ) -> CliResult<SavedReport> {
        fs::create_dir_all(&self.dir).map_err(|e| self.io_error(e, &self.dir))?;
        let index = self.next_index(operation)?;

        let report_path = self.dir.join(format!("{}_{}.json", operation, index));
        let record = Self::record(operation, report);
        let text = serde_json::to_string_pretty(&record).map_err(|e| {
            ConversionError::conversion_with_source(
                ConversionErrorKind::serialization("failed to render report"),
                e.into(),
            )
        })?;
        fs::write(&report_path, text).map_err(|e| self.io_error(e, &report_path))?;

        let result_path = match result {
            Some((bytes, extension)) => {
                let path = self
                    .dir
                    .join(format!("result_{}_{}.{}", operation, index, extension));
                fs::write(&path, bytes).map_err(|e| self.io_error(e, &path))?;
                Some(path)
            }
            None => None,
        };

        tracing::debug!(operation, index, path = %report_path.display(), "report saved");
        Ok(SavedReport {
            index,
            report_path,
            result_path,
        })
    }

    fn record(operation: &str, report: &ConversionReport) -> Value {
        let mut record = report.to_value();
        if let Value::Object(map) = &mut record {
            map.insert("operation".to_string(), Value::from(operation));
            map.insert(
                "timestamp".to_string(),
                Value::from(Local::now().format(TIMESTAMP_FORMAT).to_string()),
            );
        }
        record
    }

    fn io_error(&self, error: std::io::Error, path: &Path) -> ConversionError {
        ConversionError::conversion(ConversionErrorKind::io(
            error.to_string(),
            Some(path.to_path_buf()),
        ))
    }
}

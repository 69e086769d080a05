//! JSON configuration, row loading and report helpers.

use crate::conversion::AngleConversion;
use crate::record::RowRecord;
use crate::validator::{CorrectionViolation, Diagnostic, RowData, RowError, ValidatorParams};
use serde::{Deserialize, Serialize};
use shoulder_isb_core::Segment;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum DatasetIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration of a dataset validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// JSON array of [`RowRecord`].
    pub rows_path: PathBuf,
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    #[serde(default)]
    pub params: ValidatorParams,
}

impl DatasetConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DatasetIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DatasetIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Output report path, `<rows>.report.json` when not configured.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| self.rows_path.with_extension("report.json"))
    }
}

pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<RowRecord>, DatasetIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Report entry of one row.
#[derive(Debug, Clone, Serialize)]
pub struct RowOutcome {
    pub author: String,
    pub joint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    pub valid: bool,
    pub segments_valid: bool,
    pub joint_valid: bool,
    pub corrections_valid: bool,
    pub usable_rotation_data: bool,
    pub usable_translation_data: bool,
    pub parent_definition_risk: bool,
    pub child_definition_risk: bool,
    pub total_deviation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<AngleConversion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<CorrectionViolation>,
    /// Set when the row was aborted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The row was aborted because its frames cannot be converted to ISB.
    pub unsupported_conversion: bool,
}

impl RowOutcome {
    pub fn from_result(result: &Result<RowData, RowError>) -> Self {
        match result {
            Ok(data) => Self {
                author: data.context.author.clone(),
                joint: data.context.joint.clone(),
                segment: None,
                valid: data.is_valid(),
                segments_valid: data.segments_valid,
                joint_valid: data.joint_valid,
                corrections_valid: data.corrections_valid(),
                usable_rotation_data: data.usable_rotation_data,
                usable_translation_data: data.usable_translation_data,
                parent_definition_risk: data.parent_definition_risk(),
                child_definition_risk: data.child_definition_risk(),
                total_deviation: data.total_deviation(),
                conversion: data.conversion.clone(),
                diagnostics: data.diagnostics.clone(),
                violations: data.violations().into_iter().cloned().collect(),
                error: None,
                unsupported_conversion: false,
            },
            Err(err) => Self {
                author: err.context.author.clone(),
                joint: err.context.joint.clone(),
                segment: err.context.segment,
                valid: false,
                segments_valid: false,
                joint_valid: false,
                corrections_valid: false,
                usable_rotation_data: false,
                usable_translation_data: false,
                parent_definition_risk: false,
                child_definition_risk: false,
                total_deviation: 0.0,
                conversion: None,
                diagnostics: Vec::new(),
                violations: Vec::new(),
                error: Some(err.kind.to_string()),
                unsupported_conversion: err.is_unsupported_conversion(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub valid: usize,
    pub usable_rotation: usize,
    pub usable_translation: usize,
    pub errors: usize,
    pub unsupported: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub summary: DatasetSummary,
    pub rows: Vec<RowOutcome>,
}

impl DatasetReport {
    pub fn from_results(results: &[Result<RowData, RowError>]) -> Self {
        let rows: Vec<RowOutcome> = results.iter().map(RowOutcome::from_result).collect();
        let count = |f: fn(&RowOutcome) -> bool| rows.iter().filter(|r| f(r)).count();
        let summary = DatasetSummary {
            rows: rows.len(),
            valid: count(|r| r.valid),
            usable_rotation: count(|r| r.usable_rotation_data),
            usable_translation: count(|r| r.usable_translation_data),
            errors: count(|r| r.error.is_some()),
            unsupported: count(|r| r.unsupported_conversion),
        };
        Self { summary, rows }
    }

    pub fn to_json(&self) -> Result<String, DatasetIoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DatasetIoError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

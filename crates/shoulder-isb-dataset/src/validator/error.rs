use crate::conversion::ConversionError;
use serde::Serialize;
use shoulder_isb_core::{FrameError, ParseNameError, Segment};
use std::fmt;

/// Identity of a row in diagnostics and errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowContext {
    pub author: String,
    pub joint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
}

impl RowContext {
    pub fn with_segment(&self, segment: Segment) -> Self {
        Self {
            segment: Some(segment),
            ..self.clone()
        }
    }
}

impl fmt::Display for RowContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.author, self.joint)?;
        if let Some(segment) = self.segment {
            write!(f, ", {segment}")?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RowErrorKind {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Parse(#[from] ParseNameError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Failure that aborts the processing of a single row.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{context}: {kind}")]
pub struct RowError {
    pub context: RowContext,
    #[source]
    pub kind: RowErrorKind,
}

impl RowError {
    pub fn new(context: RowContext, kind: impl Into<RowErrorKind>) -> Self {
        Self {
            context,
            kind: kind.into(),
        }
    }

    pub fn is_unsupported_conversion(&self) -> bool {
        matches!(
            self.kind,
            RowErrorKind::Conversion(ConversionError::Unsupported { .. })
        )
    }
}

/// Pipeline stage a diagnostic comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Segments,
    Joint,
    Corrections,
}

/// A non-fatal finding that makes part of the row invalid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, segment: Option<Segment>, message: impl Into<String>) -> Self {
        Self {
            stage,
            segment,
            message: message.into(),
        }
    }
}

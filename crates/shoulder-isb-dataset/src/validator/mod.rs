//! Per-row validation pipeline.
//!
//! A row goes through four stages: segments, joint, corrections and angle
//! conversion. Data-quality findings are recorded on the returned
//! [`RowData`]; malformed descriptors and unsupported conversions abort the
//! row with a [`RowError`].

mod corrections;
mod error;
mod joint_stage;
mod params;
mod pipeline;
mod result;
mod segments;

pub use corrections::{
    assess_corrections, assess_side, required_corrections, CorrectionAssessment,
    CorrectionViolation, FrameClass, RequiredCorrection, Side, SideAssessment,
};
pub use error::{Diagnostic, RowContext, RowError, RowErrorKind, Stage};
pub use params::ValidatorParams;
pub use pipeline::RowValidator;
pub use result::RowData;

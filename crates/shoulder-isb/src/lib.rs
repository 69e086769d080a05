//! High-level facade crate for the `shoulder-isb-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the geometry crate and the dataset validation crate
//! - helpers converting angles of joints whose frames already follow the ISB
//!   definition (see [`convert`])
//! - the `shoulder-isb` command-line tool (feature `cli`)
//!
//! ## Quickstart
//!
//! ```no_run
//! use shoulder_isb::dataset::{load_rows, validate_dataset, RowValidator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = load_rows("dataset.json")?;
//! let report = validate_dataset(&RowValidator::default(), &rows);
//! println!("{} usable rotation rows", report.summary.usable_rotation);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `shoulder_isb::core`: landmarks, axis descriptors, frames, Euler sequences.
//! - `shoulder_isb::dataset`: row records, the validation pipeline, corrections
//!   and angle conversion.
//! - `shoulder_isb::convert`: conversions for ISB-oriented joints.

pub use shoulder_isb_core as core;
pub use shoulder_isb_dataset as dataset;

pub use shoulder_isb_core::{BiomechCoordinateSystem, EulerSequence, Frame, Segment};
pub use shoulder_isb_dataset::{
    AngleConversion, JointType, RowData, RowError, RowRecord, RowValidator, ValidatorParams,
};

pub mod convert;

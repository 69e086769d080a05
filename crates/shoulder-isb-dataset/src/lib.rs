//! Validation of shoulder kinematics dataset rows against the ISB
//! recommendations, and conversion of the reported joint angles to the ISB
//! Euler sequences.
//!
//! Each [`RowRecord`] describes one joint of one publication: the segment
//! frames as axis descriptors or direction labels, the declared Euler
//! sequence, the corrections the authors applied and a set of deviation
//! scores. [`RowValidator::process`] builds the coordinate systems, checks
//! the joint and the declared corrections, then resolves an
//! [`AngleConversion`].
//!
//! ```
//! use shoulder_isb_dataset::{RowRecord, RowValidator, SegmentColumns};
//! use shoulder_isb_core::Segment;
//!
//! let mut row = RowRecord {
//!     author: "Doe 2020".into(),
//!     joint: "sternoclavicular".into(),
//!     parent: "thorax".into(),
//!     child: "clavicle".into(),
//!     euler_sequence: Some("yxz".into()),
//!     ..RowRecord::default()
//! };
//! row.segments.insert(
//!     Segment::Thorax,
//!     SegmentColumns {
//!         x: Some("y^z".into()),
//!         y: Some("vec(MID_T8_PX>MID_C7_IJ)".into()),
//!         z: Some("vec(IJ>C7)^vec(IJ>MID_T8_PX)".into()),
//!         origin: Some("IJ".into()),
//!         ..SegmentColumns::default()
//!     },
//! );
//! row.segments.insert(
//!     Segment::Clavicle,
//!     SegmentColumns {
//!         x: Some("vec(MID_T8_PX>MID_C7_IJ)^vec(SC>AC)".into()),
//!         y: Some("z^x".into()),
//!         z: Some("vec(SC>AC)".into()),
//!         origin: Some("SC".into()),
//!         ..SegmentColumns::default()
//!     },
//! );
//!
//! let data = RowValidator::default().process(&row).unwrap();
//! assert!(data.usable_rotation_data);
//! assert_eq!(data.convert([10.0, 20.0, 30.0]), Some([10.0, 20.0, 30.0]));
//! ```

pub mod batch;
mod conversion;
mod correction;
pub mod io;
mod joint;
mod record;
pub mod validator;

pub use batch::{process_rows, validate_dataset};
pub use conversion::{
    resolve_angle_conversion, sign_factors_through_frame, AngleConversion, ConversionError,
};
pub use correction::{parse_correction_cell, Correction};
pub use io::{load_rows, DatasetConfig, DatasetIoError, DatasetReport, DatasetSummary, RowOutcome};
pub use joint::{Joint, JointType};
pub use record::{cell, DeviationScores, RowRecord, SegmentColumns};
pub use validator::{RowData, RowError, RowValidator, ValidatorParams};

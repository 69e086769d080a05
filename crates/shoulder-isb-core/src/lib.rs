//! Geometry and ISB classification of shoulder segment coordinate systems.
//!
//! This crate turns the textual axis descriptors found in kinematics
//! publications (`vec(AI>TS)^vec(AI>AA)`, `z^x`, ...) into local frames,
//! classifies them against the ISB definitions and provides intrinsic Euler
//! sequences. It knows nothing about dataset rows or corrections.
//!
//! ```
//! use shoulder_isb_core::{BiomechCoordinateSystem, Frame, Segment};
//!
//! let frame = Frame::from_xyz_strings(
//!     "vec(AI>TS)^vec(AI>AA)",
//!     "z^x",
//!     "vec(TS>AA)",
//!     "AA",
//!     Segment::Scapula,
//! )
//! .unwrap();
//! let bsys = BiomechCoordinateSystem::from_frame(frame);
//! assert!(bsys.is_isb() && bsys.is_direct());
//! ```

mod axis_expr;
mod coordinate_system;
mod direction;
mod error;
mod euler;
mod frame;
pub mod isb;
mod landmark;
mod logger;
mod vector;

pub use axis_expr::{AxisExpr, AxisOperand};
pub use coordinate_system::BiomechCoordinateSystem;
pub use direction::{Axis, BiomechDirection, CartesianAxis};
pub use error::{AxisFormatError, FrameError, GeometryError, ParseNameError};
pub use euler::{elementary, EulerSequence};
pub use frame::{Frame, DIRECT_TOLERANCE};
pub use landmark::{
    AnatomicalLandmark, BodySide, ClavicleLandmark, HumerusLandmark, ScapulaLandmark, Segment,
    ThoraxLandmark,
};
pub use vector::{AxisVector, DEGENERATE_NORM};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

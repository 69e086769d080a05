//! ISB reference definitions per segment.
//!
//! Thorax: origin IJ, `y` from MID_T8_PX to MID_C7_IJ, `z` normal to the
//! (IJ, C7, MID_T8_PX) plane.
//! Clavicle: origin SC, `z` from SC to AC, `x` = thorax `y` ^ clavicle `z`.
//! Scapula: origin AA, `z` from TS to AA, `x` normal to the (AI, AA, TS) plane.
//! Humerus: origin GH, `y` from MID_EPICONDYLES to GH, `x` normal to the
//! (GH, EL, EM) plane.

use crate::direction::CartesianAxis;
use crate::landmark::{
    AnatomicalLandmark as L, ClavicleLandmark, HumerusLandmark, ScapulaLandmark, Segment,
    ThoraxLandmark,
};

/// Canonical directions of the local `x`, `y`, `z` axes.
pub const ISB_AXIS_DIRECTIONS: [CartesianAxis; 3] = [
    CartesianAxis::PlusX,
    CartesianAxis::PlusY,
    CartesianAxis::PlusZ,
];

const THORAX_LANDMARKS: [L; 4] = [
    L::Thorax(ThoraxLandmark::Ij),
    L::Thorax(ThoraxLandmark::C7),
    L::Thorax(ThoraxLandmark::MidC7Ij),
    L::Thorax(ThoraxLandmark::MidT8Px),
];
const CLAVICLE_LANDMARKS: [L; 4] = [
    L::Clavicle(ClavicleLandmark::Sc),
    L::Clavicle(ClavicleLandmark::Ac),
    L::Thorax(ThoraxLandmark::MidC7Ij),
    L::Thorax(ThoraxLandmark::MidT8Px),
];
const SCAPULA_LANDMARKS: [L; 3] = [
    L::Scapula(ScapulaLandmark::Aa),
    L::Scapula(ScapulaLandmark::Ts),
    L::Scapula(ScapulaLandmark::Ai),
];
const HUMERUS_LANDMARKS: [L; 4] = [
    L::Humerus(HumerusLandmark::Gh),
    L::Humerus(HumerusLandmark::El),
    L::Humerus(HumerusLandmark::Em),
    L::Humerus(HumerusLandmark::MidEpicondyles),
];

/// Landmarks an ISB frame of `segment` is built from.
pub fn isb_landmarks(segment: Segment) -> &'static [L] {
    match segment {
        Segment::Thorax => &THORAX_LANDMARKS,
        Segment::Clavicle => &CLAVICLE_LANDMARKS,
        Segment::Scapula => &SCAPULA_LANDMARKS,
        Segment::Humerus => &HUMERUS_LANDMARKS,
    }
}

pub fn isb_origin(segment: Segment) -> L {
    match segment {
        Segment::Thorax => L::Thorax(ThoraxLandmark::Ij),
        Segment::Clavicle => L::Clavicle(ClavicleLandmark::Sc),
        Segment::Scapula => L::Scapula(ScapulaLandmark::Aa),
        Segment::Humerus => L::Humerus(HumerusLandmark::Gh),
    }
}

const THORAX_ON_AXIS: [L; 1] = [L::Thorax(ThoraxLandmark::Ij)];
const CLAVICLE_ON_AXIS: [L; 2] = [
    L::Clavicle(ClavicleLandmark::Sc),
    L::Clavicle(ClavicleLandmark::Ac),
];
const SCAPULA_ON_AXIS: [L; 2] = [
    L::Scapula(ScapulaLandmark::Aa),
    L::Scapula(ScapulaLandmark::Ts),
];
const HUMERUS_ON_AXIS: [L; 2] = [
    L::Humerus(HumerusLandmark::Gh),
    L::Humerus(HumerusLandmark::MidEpicondyles),
];

/// Origins lying on one of the segment's ISB axes (the ISB origin included).
pub fn origins_on_isb_axes(segment: Segment) -> &'static [L] {
    match segment {
        Segment::Thorax => &THORAX_ON_AXIS,
        Segment::Clavicle => &CLAVICLE_ON_AXIS,
        Segment::Scapula => &SCAPULA_ON_AXIS,
        Segment::Humerus => &HUMERUS_ON_AXIS,
    }
}

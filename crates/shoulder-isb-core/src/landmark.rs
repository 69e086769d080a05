//! Segments, their anatomical landmarks and the fixed reference pose.
//!
//! Landmark names are scoped per segment: `AC` names a clavicle landmark when
//! read for the clavicle and a scapula landmark when read for the scapula.
//! The reference pose places a right shoulder in the global ISB frame
//! (`+X` anterior, `+Y` superior, `+Z` lateral), origin at the incisura
//! jugularis, units in metres. Left-side landmarks are its mirror image
//! through the sagittal plane (`z -> -z`).

use crate::error::ParseNameError;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rigid body segment of the shoulder complex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Thorax,
    Clavicle,
    Scapula,
    Humerus,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::Thorax,
        Segment::Clavicle,
        Segment::Scapula,
        Segment::Humerus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Segment::Thorax => "thorax",
            Segment::Clavicle => "clavicle",
            Segment::Scapula => "scapula",
            Segment::Humerus => "humerus",
        }
    }

    /// Landmarks of this segment's own family.
    pub fn landmarks(self) -> &'static [AnatomicalLandmark] {
        use AnatomicalLandmark as L;
        const THORAX: [AnatomicalLandmark; 6] = [
            L::Thorax(ThoraxLandmark::Ij),
            L::Thorax(ThoraxLandmark::Px),
            L::Thorax(ThoraxLandmark::C7),
            L::Thorax(ThoraxLandmark::T8),
            L::Thorax(ThoraxLandmark::MidC7Ij),
            L::Thorax(ThoraxLandmark::MidT8Px),
        ];
        const CLAVICLE: [AnatomicalLandmark; 2] = [
            L::Clavicle(ClavicleLandmark::Sc),
            L::Clavicle(ClavicleLandmark::Ac),
        ];
        const SCAPULA: [AnatomicalLandmark; 6] = [
            L::Scapula(ScapulaLandmark::Aa),
            L::Scapula(ScapulaLandmark::Ts),
            L::Scapula(ScapulaLandmark::Ai),
            L::Scapula(ScapulaLandmark::Ac),
            L::Scapula(ScapulaLandmark::Gc),
            L::Scapula(ScapulaLandmark::Cp),
        ];
        const HUMERUS: [AnatomicalLandmark; 4] = [
            L::Humerus(HumerusLandmark::Gh),
            L::Humerus(HumerusLandmark::El),
            L::Humerus(HumerusLandmark::Em),
            L::Humerus(HumerusLandmark::MidEpicondyles),
        ];
        match self {
            Segment::Thorax => &THORAX,
            Segment::Clavicle => &CLAVICLE,
            Segment::Scapula => &SCAPULA,
            Segment::Humerus => &HUMERUS,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Segment {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Segment::ALL
            .into_iter()
            .find(|seg| seg.name() == key)
            .ok_or_else(|| ParseNameError::new("segment", s))
    }
}

/// Body side a dataset row was recorded on.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    #[default]
    Right,
    Left,
}

impl BodySide {
    pub fn name(self) -> &'static str {
        match self {
            BodySide::Right => "right",
            BodySide::Left => "left",
        }
    }

    /// Reflect `v` through the sagittal plane on the left side.
    pub fn mirror(self, v: Vector3<f64>) -> Vector3<f64> {
        match self {
            BodySide::Right => v,
            BodySide::Left => Vector3::new(v.x, v.y, -v.z),
        }
    }
}

impl fmt::Display for BodySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodySide {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" | "r" => Ok(BodySide::Right),
            "left" | "l" => Ok(BodySide::Left),
            _ => Err(ParseNameError::new("body side", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThoraxLandmark {
    /// Incisura jugularis.
    Ij,
    /// Processus xiphoideus.
    Px,
    C7,
    T8,
    /// Midpoint between C7 and IJ.
    MidC7Ij,
    /// Midpoint between T8 and PX.
    MidT8Px,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClavicleLandmark {
    /// Most ventral point of the sternoclavicular joint.
    Sc,
    /// Most dorsal point of the acromioclavicular joint.
    Ac,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScapulaLandmark {
    /// Angulus acromialis.
    Aa,
    /// Trigonum spinae.
    Ts,
    /// Angulus inferior.
    Ai,
    /// Acromioclavicular joint.
    Ac,
    /// Glenoid center.
    Gc,
    /// Coracoid process tip.
    Cp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HumerusLandmark {
    /// Glenohumeral rotation center.
    Gh,
    /// Lateral epicondyle.
    El,
    /// Medial epicondyle.
    Em,
    MidEpicondyles,
}

/// Named skeletal point, scoped by the segment family it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnatomicalLandmark {
    Thorax(ThoraxLandmark),
    Clavicle(ClavicleLandmark),
    Scapula(ScapulaLandmark),
    Humerus(HumerusLandmark),
}

impl AnatomicalLandmark {
    /// Segment family owning this landmark.
    pub fn segment(self) -> Segment {
        match self {
            AnatomicalLandmark::Thorax(_) => Segment::Thorax,
            AnatomicalLandmark::Clavicle(_) => Segment::Clavicle,
            AnatomicalLandmark::Scapula(_) => Segment::Scapula,
            AnatomicalLandmark::Humerus(_) => Segment::Humerus,
        }
    }

    /// Dataset spelling of the landmark.
    pub fn name(self) -> &'static str {
        use AnatomicalLandmark as L;
        match self {
            L::Thorax(ThoraxLandmark::Ij) => "IJ",
            L::Thorax(ThoraxLandmark::Px) => "PX",
            L::Thorax(ThoraxLandmark::C7) => "C7",
            L::Thorax(ThoraxLandmark::T8) => "T8",
            L::Thorax(ThoraxLandmark::MidC7Ij) => "MID_C7_IJ",
            L::Thorax(ThoraxLandmark::MidT8Px) => "MID_T8_PX",
            L::Clavicle(ClavicleLandmark::Sc) => "SC",
            L::Clavicle(ClavicleLandmark::Ac) => "AC",
            L::Scapula(ScapulaLandmark::Aa) => "AA",
            L::Scapula(ScapulaLandmark::Ts) => "TS",
            L::Scapula(ScapulaLandmark::Ai) => "AI",
            L::Scapula(ScapulaLandmark::Ac) => "AC",
            L::Scapula(ScapulaLandmark::Gc) => "GC",
            L::Scapula(ScapulaLandmark::Cp) => "CP",
            L::Humerus(HumerusLandmark::Gh) => "GH",
            L::Humerus(HumerusLandmark::El) => "EL",
            L::Humerus(HumerusLandmark::Em) => "EM",
            L::Humerus(HumerusLandmark::MidEpicondyles) => "MID_EPICONDYLES",
        }
    }

    /// Position in the reference pose.
    pub fn reference_position(self) -> Vector3<f64> {
        use AnatomicalLandmark as L;
        let [x, y, z] = match self {
            L::Thorax(ThoraxLandmark::Ij) => [0.0, 0.0, 0.0],
            L::Thorax(ThoraxLandmark::Px) => [0.02, -0.18, 0.0],
            L::Thorax(ThoraxLandmark::C7) => [-0.12, 0.04, 0.0],
            L::Thorax(ThoraxLandmark::T8) => [-0.13, -0.16, 0.0],
            L::Thorax(ThoraxLandmark::MidC7Ij) => [-0.06, 0.02, 0.0],
            L::Thorax(ThoraxLandmark::MidT8Px) => [-0.055, -0.17, 0.0],
            L::Clavicle(ClavicleLandmark::Sc) => [0.01, 0.0, 0.02],
            L::Clavicle(ClavicleLandmark::Ac) | L::Scapula(ScapulaLandmark::Ac) => {
                [-0.02, 0.03, 0.16]
            }
            L::Scapula(ScapulaLandmark::Aa) => [-0.04, 0.02, 0.17],
            L::Scapula(ScapulaLandmark::Ts) => [-0.09, -0.01, 0.07],
            L::Scapula(ScapulaLandmark::Ai) => [-0.08, -0.13, 0.09],
            L::Scapula(ScapulaLandmark::Gc) => [-0.02, -0.02, 0.13],
            L::Scapula(ScapulaLandmark::Cp) => [0.03, 0.0, 0.12],
            L::Humerus(HumerusLandmark::Gh) => [-0.02, -0.02, 0.155],
            L::Humerus(HumerusLandmark::El) => [-0.01, -0.32, 0.195],
            L::Humerus(HumerusLandmark::Em) => [-0.03, -0.31, 0.115],
            L::Humerus(HumerusLandmark::MidEpicondyles) => [-0.02, -0.315, 0.155],
        };
        Vector3::new(x, y, z)
    }

    /// Position in the reference pose of `side`.
    pub fn reference_position_on(self, side: BodySide) -> Vector3<f64> {
        side.mirror(self.reference_position())
    }

    /// Look a name up in one segment family only.
    pub fn in_family(name: &str, family: Segment) -> Option<Self> {
        let key = name.trim();
        family
            .landmarks()
            .iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(key))
    }

    /// Resolve a landmark name read for `segment`.
    ///
    /// The segment's own family wins; otherwise the remaining families are
    /// searched in [`Segment::ALL`] order (a clavicle frame references thorax
    /// midpoints, for instance).
    pub fn parse_for(name: &str, segment: Segment) -> Result<Self, ParseNameError> {
        Self::in_family(name, segment)
            .or_else(|| {
                Segment::ALL
                    .into_iter()
                    .filter(|s| *s != segment)
                    .find_map(|s| Self::in_family(name, s))
            })
            .ok_or_else(|| ParseNameError::new("anatomical landmark", name))
    }
}

impl fmt::Display for AnatomicalLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

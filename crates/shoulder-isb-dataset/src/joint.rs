//! Shoulder joints and their ISB Euler sequences.

use serde::{Deserialize, Serialize};
use shoulder_isb_core::{
    AnatomicalLandmark, BiomechCoordinateSystem, EulerSequence, ParseNameError, Segment,
};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointType {
    Sternoclavicular,
    Acromioclavicular,
    Scapulothoracic,
    Glenohumeral,
}

impl JointType {
    pub const ALL: [JointType; 4] = [
        JointType::Sternoclavicular,
        JointType::Acromioclavicular,
        JointType::Scapulothoracic,
        JointType::Glenohumeral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            JointType::Sternoclavicular => "sternoclavicular",
            JointType::Acromioclavicular => "acromioclavicular",
            JointType::Scapulothoracic => "scapulothoracic",
            JointType::Glenohumeral => "glenohumeral",
        }
    }

    pub fn parent(self) -> Segment {
        match self {
            JointType::Sternoclavicular | JointType::Scapulothoracic => Segment::Thorax,
            JointType::Acromioclavicular => Segment::Clavicle,
            JointType::Glenohumeral => Segment::Scapula,
        }
    }

    pub fn child(self) -> Segment {
        match self {
            JointType::Sternoclavicular => Segment::Clavicle,
            JointType::Acromioclavicular | JointType::Scapulothoracic => Segment::Scapula,
            JointType::Glenohumeral => Segment::Humerus,
        }
    }

    /// Sequence recommended by the ISB for this joint.
    pub fn isb_euler_sequence(self) -> EulerSequence {
        match self {
            JointType::Sternoclavicular
            | JointType::Acromioclavicular
            | JointType::Scapulothoracic => EulerSequence::Yxz,
            JointType::Glenohumeral => EulerSequence::Yxy,
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JointType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let joint = match key.as_str() {
            "sternoclavicular" | "sc" => JointType::Sternoclavicular,
            "acromioclavicular" | "ac" => JointType::Acromioclavicular,
            "scapulothoracic" | "st" => JointType::Scapulothoracic,
            "glenohumeral" | "gh" => JointType::Glenohumeral,
            _ => return Err(ParseNameError::new("joint", s)),
        };
        Ok(joint)
    }
}

/// A joint of one dataset row with the coordinate systems of both segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
    joint_type: JointType,
    euler_sequence: Option<EulerSequence>,
    translation_origin: Option<AnatomicalLandmark>,
    translation_frame: Option<Segment>,
    parent: BiomechCoordinateSystem,
    child: BiomechCoordinateSystem,
}

impl Joint {
    pub fn new(
        joint_type: JointType,
        euler_sequence: Option<EulerSequence>,
        parent: BiomechCoordinateSystem,
        child: BiomechCoordinateSystem,
    ) -> Self {
        Self {
            joint_type,
            euler_sequence,
            translation_origin: None,
            translation_frame: None,
            parent,
            child,
        }
    }

    /// Translations of the child origin, expressed in `frame`.
    pub fn with_translation(
        mut self,
        origin: Option<AnatomicalLandmark>,
        frame: Option<Segment>,
    ) -> Self {
        self.translation_origin = origin;
        self.translation_frame = frame;
        self
    }

    pub fn joint_type(&self) -> JointType {
        self.joint_type
    }

    pub fn euler_sequence(&self) -> Option<EulerSequence> {
        self.euler_sequence
    }

    pub fn translation_origin(&self) -> Option<AnatomicalLandmark> {
        self.translation_origin
    }

    pub fn translation_frame(&self) -> Option<Segment> {
        self.translation_frame
    }

    pub fn parent(&self) -> &BiomechCoordinateSystem {
        &self.parent
    }

    pub fn child(&self) -> &BiomechCoordinateSystem {
        &self.child
    }

    pub fn isb_euler_sequence(&self) -> EulerSequence {
        self.joint_type.isb_euler_sequence()
    }

    pub fn is_joint_sequence_isb(&self) -> bool {
        self.euler_sequence == Some(self.isb_euler_sequence())
    }

    /// Whether the declared sequence can at most differ from the ISB one by
    /// per-angle signs once its axes are relabelled.
    ///
    /// Tait-Bryan and proper Euler sequences never map onto each other.
    pub fn is_sequence_convertible_through_factors(&self) -> bool {
        let isb_proper = self.isb_euler_sequence().is_proper_euler();
        self.euler_sequence
            .is_some_and(|s| s.is_proper_euler() == isb_proper)
    }

    /// Parent and child segments are the ones this joint type links.
    pub fn has_expected_segments(&self) -> bool {
        self.parent.segment() == self.joint_type.parent()
            && self.child.segment() == self.joint_type.child()
    }

    pub fn has_rotation_data(&self) -> bool {
        self.euler_sequence.is_some()
    }

    pub fn has_translation_data(&self) -> bool {
        self.translation_origin.is_some() && self.translation_frame.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoulder_isb_core::BiomechDirection::*;

    fn isb_bsys(segment: Segment) -> BiomechCoordinateSystem {
        BiomechCoordinateSystem::from_biomech_directions(
            PlusPosteroAnterior,
            PlusInferoSuperior,
            PlusMedioLateral,
            None,
            segment,
        )
    }

    #[test]
    fn isb_sequences_per_joint() {
        assert_eq!(
            JointType::Sternoclavicular.isb_euler_sequence(),
            EulerSequence::Yxz
        );
        assert_eq!(
            JointType::Glenohumeral.isb_euler_sequence(),
            EulerSequence::Yxy
        );
        for j in JointType::ALL {
            assert_eq!(j.name().parse::<JointType>().unwrap(), j);
        }
    }

    #[test]
    fn glenohumeral_sequence_structure() {
        let gh = |seq| {
            Joint::new(
                JointType::Glenohumeral,
                Some(seq),
                isb_bsys(Segment::Scapula),
                isb_bsys(Segment::Humerus),
            )
        };
        assert!(gh(EulerSequence::Yxy).is_joint_sequence_isb());
        assert!(gh(EulerSequence::Zxz).is_sequence_convertible_through_factors());
        assert!(!gh(EulerSequence::Xzy).is_sequence_convertible_through_factors());
        assert!(gh(EulerSequence::Yxy).has_expected_segments());
        assert!(!gh(EulerSequence::Yxy).has_translation_data());
    }

    #[test]
    fn swapped_segments_are_detected() {
        let joint = Joint::new(
            JointType::Sternoclavicular,
            None,
            isb_bsys(Segment::Clavicle),
            isb_bsys(Segment::Thorax),
        );
        assert!(!joint.has_expected_segments());
        assert!(!joint.has_rotation_data());
        assert!(!joint.is_sequence_convertible_through_factors());
    }
}

//! Conversion of reported joint angles to the ISB convention.
//!
//! Three strategies, picked from the classification of the joint's frames:
//!
//! 1. both frames ISB-oriented and the ISB sequence declared: per-angle sign
//!    factors `(1, 1, 1)`;
//! 2. both frames ISB-oriented, another sequence: rebuild the rotation matrix
//!    and extract the angles of the ISB sequence;
//! 3. otherwise the frames must share one orientation pattern. The angles are
//!    then either sign flipped (when the declared axes map onto the ISB
//!    sequence letter for letter) or the rotation matrix is conjugated by the
//!    parent and child axis permutations before extraction.

use crate::joint::Joint;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use shoulder_isb_core::{BiomechCoordinateSystem, CartesianAxis, EulerSequence, Segment};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error(
        "parent axes [{parent}] and child axes [{child}] are not oriented alike, \
         conversion to ISB is not supported"
    )]
    Unsupported { parent: String, child: String },
    #[error("{segment} axes [{axes}] cannot be mapped onto the ISB axes")]
    UnreachableState { segment: Segment, axes: String },
    #[error("no euler sequence declared for the joint")]
    MissingEulerSequence,
}

fn axes_label(axes: [CartesianAxis; 3]) -> String {
    axes.map(|a| a.to_string()).join(", ")
}

/// A resolved per-row conversion from reported angles (degrees) to ISB angles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AngleConversion {
    SignFactors {
        factors: [f64; 3],
    },
    SequenceChange {
        from: EulerSequence,
        to: EulerSequence,
    },
    /// `R_isb = P · R · Cᵀ` with `P`, `C` the parent and child local-to-ISB permutations.
    ToIsb {
        from: EulerSequence,
        to: EulerSequence,
        parent: Matrix3<f64>,
        child: Matrix3<f64>,
    },
}

impl AngleConversion {
    pub const IDENTITY: AngleConversion = AngleConversion::SignFactors {
        factors: [1.0, 1.0, 1.0],
    };

    pub fn strategy(&self) -> &'static str {
        match self {
            AngleConversion::SignFactors { .. } => "sign_factors",
            AngleConversion::SequenceChange { .. } => "sequence_change",
            AngleConversion::ToIsb { .. } => "to_isb",
        }
    }

    pub fn apply(&self, angles: [f64; 3]) -> [f64; 3] {
        match self {
            AngleConversion::SignFactors { factors } => {
                std::array::from_fn(|i| angles[i] * factors[i])
            }
            AngleConversion::SequenceChange { from, to } => {
                to.angles_from_rotation_matrix(&from.to_rotation_matrix(angles))
            }
            AngleConversion::ToIsb {
                from,
                to,
                parent,
                child,
            } => {
                let r = parent * from.to_rotation_matrix(angles) * child.transpose();
                to.angles_from_rotation_matrix(&r)
            }
        }
    }

    pub fn apply_many(&self, samples: &[[f64; 3]]) -> Vec<[f64; 3]> {
        samples.iter().map(|a| self.apply(*a)).collect()
    }
}

fn permutation(bsys: &BiomechCoordinateSystem) -> Result<Matrix3<f64>, ConversionError> {
    bsys.to_isb_matrix()
        .ok_or_else(|| ConversionError::UnreachableState {
            segment: bsys.segment(),
            axes: axes_label(bsys.axes()),
        })
}

/// Sign factors turning angles of `from`, about the axes of `bsys`, into
/// angles of `to` about the ISB axes.
///
/// `None` unless each declared axis lands on the matching letter of `to`.
pub fn sign_factors_through_frame(
    bsys: &BiomechCoordinateSystem,
    from: EulerSequence,
    to: EulerSequence,
) -> Option<[f64; 3]> {
    let handedness = bsys.to_isb_matrix()?.determinant().signum();
    let mapped = from.axes().map(|a| bsys.axis_direction(a));
    if mapped.map(CartesianAxis::axis) != to.axes() {
        return None;
    }
    Some(mapped.map(|d| d.sign() * handedness))
}

/// Pick the conversion strategy for a joint.
pub fn resolve_angle_conversion(joint: &Joint) -> Result<AngleConversion, ConversionError> {
    let from = joint
        .euler_sequence()
        .ok_or(ConversionError::MissingEulerSequence)?;
    let to = joint.isb_euler_sequence();
    let (parent, child) = (joint.parent(), joint.child());

    if parent.is_isb_oriented() && child.is_isb_oriented() {
        return Ok(if from == to {
            AngleConversion::IDENTITY
        } else {
            AngleConversion::SequenceChange { from, to }
        });
    }

    if !parent.has_same_orientation(child) {
        return Err(ConversionError::Unsupported {
            parent: axes_label(parent.axes()),
            child: axes_label(child.axes()),
        });
    }
    let p = permutation(parent)?;
    let c = permutation(child)?;

    if joint.is_sequence_convertible_through_factors() {
        if let Some(factors) = sign_factors_through_frame(parent, from, to) {
            return Ok(AngleConversion::SignFactors { factors });
        }
    }
    log::debug!(
        "{}: {from} cannot be sign flipped to {to}, rebuilding through the frames",
        joint.joint_type()
    );
    Ok(AngleConversion::ToIsb {
        from,
        to,
        parent: p,
        child: c,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::JointType;
    use approx::assert_relative_eq;
    use shoulder_isb_core::BiomechDirection::{self, *};

    fn bsys(segment: Segment, dirs: [BiomechDirection; 3]) -> BiomechCoordinateSystem {
        let [x, y, z] = dirs;
        BiomechCoordinateSystem::from_biomech_directions(x, y, z, None, segment)
    }

    const ISB: [BiomechDirection; 3] = [PlusPosteroAnterior, PlusInferoSuperior, PlusMedioLateral];
    // x posterior, y superior, z medial
    const FLIPPED: [BiomechDirection; 3] =
        [MinusPosteroAnterior, PlusInferoSuperior, MinusMedioLateral];

    fn sc(
        seq: EulerSequence,
        parent: [BiomechDirection; 3],
        child: [BiomechDirection; 3],
    ) -> Joint {
        Joint::new(
            JointType::Sternoclavicular,
            Some(seq),
            bsys(Segment::Thorax, parent),
            bsys(Segment::Clavicle, child),
        )
    }

    fn assert_angles_eq(a: [f64; 3], b: [f64; 3]) {
        for (x, y) in a.iter().zip(b) {
            assert_relative_eq!(*x, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn isb_joint_with_isb_sequence_is_identity() {
        let conv = resolve_angle_conversion(&sc(EulerSequence::Yxz, ISB, ISB)).unwrap();
        assert_eq!(conv, AngleConversion::IDENTITY);
        assert_eq!(conv.apply([12.0, -30.0, 47.5]), [12.0, -30.0, 47.5]);
    }

    #[test]
    fn sequence_change_round_trips() {
        let conv = resolve_angle_conversion(&sc(EulerSequence::Zyx, ISB, ISB)).unwrap();
        assert_eq!(conv.strategy(), "sequence_change");
        let original = [15.0, 25.0, -35.0];
        let isb = conv.apply(original);
        let back = AngleConversion::SequenceChange {
            from: EulerSequence::Yxz,
            to: EulerSequence::Zyx,
        }
        .apply(isb);
        for (a, b) in original.iter().zip(back) {
            assert_relative_eq!(*a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn sequence_change_preserves_the_joint_rotation() {
        let samples = [
            [15.0, 25.0, -35.0],
            [-120.0, 5.0, 60.0],
            [80.0, -70.0, 170.0],
            [0.0, 45.0, 0.0],
        ];
        let pairs = [
            (EulerSequence::Zyx, EulerSequence::Yxz),
            (EulerSequence::Xzy, EulerSequence::Yxz),
            (EulerSequence::Xyz, EulerSequence::Yxy),
            (EulerSequence::Zxz, EulerSequence::Yxy),
        ];
        for (from, to) in pairs {
            let conv = AngleConversion::SequenceChange { from, to };
            for angles in samples {
                let converted = conv.apply(angles);
                assert_relative_eq!(
                    to.to_rotation_matrix(converted),
                    from.to_rotation_matrix(angles),
                    epsilon = 1e-9
                );
            }
            // same rotation, different numbers
            assert!(conv.apply(samples[0]) != samples[0], "{from} -> {to}");
        }
    }

    #[test]
    fn flipped_frames_with_isb_letters_use_sign_factors() {
        let conv = resolve_angle_conversion(&sc(EulerSequence::Yxz, FLIPPED, FLIPPED)).unwrap();
        assert_eq!(
            conv,
            AngleConversion::SignFactors {
                factors: [1.0, -1.0, -1.0]
            }
        );
    }

    #[test]
    fn sign_factors_match_the_conjugated_rotation() {
        let joint = sc(EulerSequence::Yxz, FLIPPED, FLIPPED);
        let p = joint.parent().to_isb_matrix().unwrap();
        let c = joint.child().to_isb_matrix().unwrap();
        let general = AngleConversion::ToIsb {
            from: EulerSequence::Yxz,
            to: EulerSequence::Yxz,
            parent: p,
            child: c,
        };
        let angles = [20.0, 35.0, -50.0];
        let fast = resolve_angle_conversion(&joint).unwrap();
        assert_angles_eq(fast.apply(angles), general.apply(angles));
    }

    #[test]
    fn other_letters_fall_back_to_the_frame_rebuild() {
        let joint = sc(EulerSequence::Xyz, FLIPPED, FLIPPED);
        let conv = resolve_angle_conversion(&joint).unwrap();
        assert_eq!(conv.strategy(), "to_isb");

        let angles = [10.0, 20.0, 30.0];
        let expected = AngleConversion::SequenceChange {
            from: EulerSequence::Xyz,
            to: EulerSequence::Yxz,
        }
        .apply([-10.0, 20.0, -30.0]);
        assert_angles_eq(conv.apply(angles), expected);
    }

    #[test]
    fn mismatched_orientations_are_unsupported() {
        let err = resolve_angle_conversion(&sc(EulerSequence::Yxz, ISB, FLIPPED)).unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));
    }

    #[test]
    fn unmappable_frames_are_unreachable() {
        let broken = [PlusPosteroAnterior, MinusPosteroAnterior, PlusMedioLateral];
        let err = resolve_angle_conversion(&sc(EulerSequence::Yxz, broken, broken)).unwrap_err();
        assert!(matches!(err, ConversionError::UnreachableState { .. }));
    }

    #[test]
    fn missing_sequence_is_reported() {
        let joint = Joint::new(
            JointType::Glenohumeral,
            None,
            bsys(Segment::Scapula, ISB),
            bsys(Segment::Humerus, ISB),
        );
        assert_eq!(
            resolve_angle_conversion(&joint),
            Err(ConversionError::MissingEulerSequence)
        );
    }
}

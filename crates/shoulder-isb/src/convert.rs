use crate::core::{isb, BiomechCoordinateSystem, BiomechDirection, EulerSequence};
use crate::dataset::{resolve_angle_conversion, AngleConversion, ConversionError, Joint, JointType};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Coordinate system of `segment` as the ISB defines it, origin included.
pub fn isb_coordinate_system(segment: crate::core::Segment) -> BiomechCoordinateSystem {
    BiomechCoordinateSystem::from_biomech_directions(
        BiomechDirection::PlusPosteroAnterior,
        BiomechDirection::PlusInferoSuperior,
        BiomechDirection::PlusMedioLateral,
        Some(isb::isb_origin(segment)),
        segment,
    )
}

/// A joint whose parent and child frames both follow the ISB definition.
pub fn isb_joint(joint_type: JointType, sequence: EulerSequence) -> Joint {
    Joint::new(
        joint_type,
        Some(sequence),
        isb_coordinate_system(joint_type.parent()),
        isb_coordinate_system(joint_type.child()),
    )
}

/// Conversion of angles reported in `sequence` between ISB frames.
pub fn isb_oriented_conversion(
    joint_type: JointType,
    sequence: EulerSequence,
) -> Result<AngleConversion, ConversionError> {
    resolve_angle_conversion(&isb_joint(joint_type, sequence))
}

/// Convert angle samples (degrees) of an ISB-oriented joint to its ISB sequence.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(samples),
        fields(joint = %joint_type, sequence = %sequence, n = samples.len())
    )
)]
pub fn convert_isb_oriented(
    joint_type: JointType,
    sequence: EulerSequence,
    samples: &[[f64; 3]],
) -> Result<Vec<[f64; 3]>, ConversionError> {
    let conversion = isb_oriented_conversion(joint_type, sequence)?;
    Ok(conversion.apply_many(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn isb_sequence_is_left_untouched() {
        let out =
            convert_isb_oriented(JointType::Glenohumeral, EulerSequence::Yxy, &[[10.0, 20.0, 30.0]])
                .unwrap();
        assert_eq!(out, vec![[10.0, 20.0, 30.0]]);
    }

    #[test]
    fn other_sequences_are_re_extracted() {
        let conv = isb_oriented_conversion(JointType::Scapulothoracic, EulerSequence::Zxy).unwrap();
        assert_eq!(conv.strategy(), "sequence_change");

        let angles = [20.0, -15.0, 40.0];
        let isb = conv.apply(angles);
        let r_in = EulerSequence::Zxy.to_rotation_matrix(angles);
        let r_out = EulerSequence::Yxz.to_rotation_matrix(isb);
        assert_relative_eq!(r_in, r_out, epsilon = 1e-9);
    }

    #[test]
    fn isb_coordinate_systems_are_isb() {
        for seg in crate::core::Segment::ALL {
            assert!(isb_coordinate_system(seg).is_isb(), "{seg}");
        }
    }
}

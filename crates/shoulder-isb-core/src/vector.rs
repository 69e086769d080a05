//! Landmark-defined axis vectors.

use crate::direction::{BiomechDirection, CartesianAxis};
use crate::error::GeometryError;
use crate::landmark::{AnatomicalLandmark, BodySide};
use nalgebra::Vector3;
use std::fmt;

/// Vectors shorter than this are treated as degenerate.
pub const DEGENERATE_NORM: f64 = 1e-9;

/// Axis direction defined from anatomical landmarks.
///
/// Either the normalized difference between two landmarks, or the normalized
/// cross product of two other axis vectors (nested to any depth).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisVector {
    StartEnd {
        start: AnatomicalLandmark,
        end: AnatomicalLandmark,
    },
    Crossed(Box<AxisVector>, Box<AxisVector>),
}

impl AxisVector {
    pub fn start_end(start: AnatomicalLandmark, end: AnatomicalLandmark) -> Self {
        AxisVector::StartEnd { start, end }
    }

    pub fn crossed(first: AxisVector, second: AxisVector) -> Self {
        AxisVector::Crossed(Box::new(first), Box::new(second))
    }

    /// Constituent landmarks in reading order (duplicates kept).
    pub fn landmarks(&self) -> Vec<AnatomicalLandmark> {
        let mut out = Vec::new();
        self.collect_landmarks(&mut out);
        out
    }

    fn collect_landmarks(&self, out: &mut Vec<AnatomicalLandmark>) {
        match self {
            AxisVector::StartEnd { start, end } => {
                out.push(*start);
                out.push(*end);
            }
            AxisVector::Crossed(a, b) => {
                a.collect_landmarks(out);
                b.collect_landmarks(out);
            }
        }
    }

    /// Nesting depth of cross products (0 for a start/end vector).
    pub fn depth(&self) -> usize {
        match self {
            AxisVector::StartEnd { .. } => 0,
            AxisVector::Crossed(a, b) => 1 + a.depth().max(b.depth()),
        }
    }

    /// Unit direction of this vector in the reference pose.
    pub fn compute_default_vector(&self) -> Result<Vector3<f64>, GeometryError> {
        self.compute_default_vector_on(BodySide::Right)
    }

    /// Unit direction of this vector in the reference pose of `side`.
    pub fn compute_default_vector_on(
        &self,
        side: BodySide,
    ) -> Result<Vector3<f64>, GeometryError> {
        let raw = match self {
            AxisVector::StartEnd { start, end } => {
                end.reference_position_on(side) - start.reference_position_on(side)
            }
            AxisVector::Crossed(a, b) => a
                .compute_default_vector_on(side)?
                .cross(&b.compute_default_vector_on(side)?),
        };
        let norm = raw.norm();
        if !norm.is_finite() || norm < DEGENERATE_NORM {
            return Err(GeometryError::DegenerateVector {
                vector: self.to_string(),
                norm,
            });
        }
        Ok(raw / norm)
    }

    /// Closest signed global axis, e.g. `[0.8, 0.2, -0.5]` gives `+X`.
    pub fn principal_direction(&self) -> Result<CartesianAxis, GeometryError> {
        CartesianAxis::principal_axis(&self.compute_default_vector()?)
    }

    /// Anatomical direction of the closest global axis, e.g. `+X` gives `PA`.
    pub fn biomech_direction(&self) -> Result<BiomechDirection, GeometryError> {
        self.principal_direction()
            .map(BiomechDirection::from_cartesian)
    }
}

impl fmt::Display for AxisVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisVector::StartEnd { start, end } => write!(f, "vec({start}>{end})"),
            AxisVector::Crossed(a, b) => write!(f, "({a})^({b})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{HumerusLandmark, ScapulaLandmark, ThoraxLandmark};
    use approx::assert_relative_eq;

    fn scap(l: ScapulaLandmark) -> AnatomicalLandmark {
        AnatomicalLandmark::Scapula(l)
    }

    #[test]
    fn start_end_vector_is_normalized() {
        let v = AxisVector::start_end(scap(ScapulaLandmark::Ts), scap(ScapulaLandmark::Aa));
        let d = v.compute_default_vector().unwrap();
        assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-12);
        assert_eq!(v.principal_direction().unwrap(), CartesianAxis::PlusZ);
        assert_eq!(
            v.biomech_direction().unwrap(),
            BiomechDirection::PlusMedioLateral
        );
    }

    #[test]
    fn crossed_vector_follows_right_hand_rule() {
        let v = AxisVector::crossed(
            AxisVector::start_end(scap(ScapulaLandmark::Ai), scap(ScapulaLandmark::Ts)),
            AxisVector::start_end(scap(ScapulaLandmark::Ai), scap(ScapulaLandmark::Aa)),
        );
        assert_eq!(v.principal_direction().unwrap(), CartesianAxis::PlusX);
        assert_eq!(v.depth(), 1);
        assert_eq!(v.landmarks().len(), 4);

        let flipped = AxisVector::crossed(
            AxisVector::start_end(scap(ScapulaLandmark::Ai), scap(ScapulaLandmark::Aa)),
            AxisVector::start_end(scap(ScapulaLandmark::Ai), scap(ScapulaLandmark::Ts)),
        );
        assert_eq!(flipped.principal_direction().unwrap(), CartesianAxis::MinusX);
    }

    #[test]
    fn degenerate_pairs_are_rejected() {
        let gh = AnatomicalLandmark::Humerus(HumerusLandmark::Gh);
        let v = AxisVector::start_end(gh, gh);
        assert!(matches!(
            v.compute_default_vector(),
            Err(GeometryError::DegenerateVector { .. })
        ));

        let y = AxisVector::start_end(
            AnatomicalLandmark::Thorax(ThoraxLandmark::MidT8Px),
            AnatomicalLandmark::Thorax(ThoraxLandmark::MidC7Ij),
        );
        let parallel = AxisVector::crossed(y.clone(), y);
        assert!(parallel.compute_default_vector().is_err());
    }

    #[test]
    fn crossed_vectors_flip_on_the_left_side() {
        let v = AxisVector::crossed(
            AxisVector::start_end(scap(ScapulaLandmark::Ai), scap(ScapulaLandmark::Ts)),
            AxisVector::start_end(scap(ScapulaLandmark::Ai), scap(ScapulaLandmark::Aa)),
        );
        let right = v.compute_default_vector().unwrap();
        let left = v.compute_default_vector_on(BodySide::Left).unwrap();
        // a reflection reverses cross products
        assert!((left + BodySide::Left.mirror(right)).norm() < 1e-12);
    }

    #[test]
    fn display_mirrors_descriptor_syntax() {
        let v = AxisVector::start_end(scap(ScapulaLandmark::Ts), scap(ScapulaLandmark::Aa));
        assert_eq!(v.to_string(), "vec(TS>AA)");
    }
}

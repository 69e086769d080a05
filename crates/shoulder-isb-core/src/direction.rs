//! Cartesian axes and anatomical directions of the global ISB frame.
//!
//! The global frame follows the ISB convention for a right shoulder:
//! `+X` points anteriorly, `+Y` superiorly and `+Z` laterally.

use crate::error::{GeometryError, ParseNameError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unsigned Cartesian axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Axis> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    /// Case-insensitive axis letter.
    pub fn from_letter(c: char) -> Option<Axis> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn unit(self) -> Vector3<f64> {
        let mut v = Vector3::zeros();
        v[self.index()] = 1.0;
        v
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Signed Cartesian axis (one of six).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CartesianAxis {
    #[serde(rename = "+X")]
    PlusX,
    #[serde(rename = "-X")]
    MinusX,
    #[serde(rename = "+Y")]
    PlusY,
    #[serde(rename = "-Y")]
    MinusY,
    #[serde(rename = "+Z")]
    PlusZ,
    #[serde(rename = "-Z")]
    MinusZ,
}

impl CartesianAxis {
    pub fn new(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => CartesianAxis::PlusX,
            (Axis::X, false) => CartesianAxis::MinusX,
            (Axis::Y, true) => CartesianAxis::PlusY,
            (Axis::Y, false) => CartesianAxis::MinusY,
            (Axis::Z, true) => CartesianAxis::PlusZ,
            (Axis::Z, false) => CartesianAxis::MinusZ,
        }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            CartesianAxis::PlusX | CartesianAxis::MinusX => Axis::X,
            CartesianAxis::PlusY | CartesianAxis::MinusY => Axis::Y,
            CartesianAxis::PlusZ | CartesianAxis::MinusZ => Axis::Z,
        }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            CartesianAxis::PlusX | CartesianAxis::PlusY | CartesianAxis::PlusZ
        )
    }

    /// `+1.0` or `-1.0`.
    #[inline]
    pub fn sign(self) -> f64 {
        if self.is_positive() {
            1.0
        } else {
            -1.0
        }
    }

    pub fn unit(self) -> Vector3<f64> {
        self.axis().unit() * self.sign()
    }

    /// Signed axis with the largest absolute dot product with `v`.
    ///
    /// Ties between components of equal magnitude resolve to the first one in
    /// `X, Y, Z` order.
    pub fn principal_axis(v: &Vector3<f64>) -> Result<Self, GeometryError> {
        let mut best = 0usize;
        for i in 1..3 {
            if v[i].abs() > v[best].abs() {
                best = i;
            }
        }
        let value = v[best];
        if !value.is_finite() || value.abs() <= f64::EPSILON {
            return Err(GeometryError::IndeterminateDirection);
        }
        let axis = Axis::ALL[best];
        Ok(CartesianAxis::new(axis, value > 0.0))
    }
}

impl fmt::Display for CartesianAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { '+' } else { '-' };
        write!(f, "{sign}{}", self.axis().letter().to_ascii_uppercase())
    }
}

/// Anatomical direction an axis points to.
///
/// Each direction corresponds to exactly one signed axis of the global ISB frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomechDirection {
    /// Posterior to anterior (`+X`).
    #[serde(rename = "PA")]
    PlusPosteroAnterior,
    /// Anterior to posterior (`-X`).
    #[serde(rename = "AP")]
    MinusPosteroAnterior,
    /// Inferior to superior (`+Y`).
    #[serde(rename = "IS")]
    PlusInferoSuperior,
    /// Superior to inferior (`-Y`).
    #[serde(rename = "SI")]
    MinusInferoSuperior,
    /// Medial to lateral (`+Z`).
    #[serde(rename = "ML")]
    PlusMedioLateral,
    /// Lateral to medial (`-Z`).
    #[serde(rename = "LM")]
    MinusMedioLateral,
}

impl BiomechDirection {
    pub fn from_cartesian(axis: CartesianAxis) -> Self {
        match axis {
            CartesianAxis::PlusX => BiomechDirection::PlusPosteroAnterior,
            CartesianAxis::MinusX => BiomechDirection::MinusPosteroAnterior,
            CartesianAxis::PlusY => BiomechDirection::PlusInferoSuperior,
            CartesianAxis::MinusY => BiomechDirection::MinusInferoSuperior,
            CartesianAxis::PlusZ => BiomechDirection::PlusMedioLateral,
            CartesianAxis::MinusZ => BiomechDirection::MinusMedioLateral,
        }
    }

    pub fn to_cartesian(self) -> CartesianAxis {
        match self {
            BiomechDirection::PlusPosteroAnterior => CartesianAxis::PlusX,
            BiomechDirection::MinusPosteroAnterior => CartesianAxis::MinusX,
            BiomechDirection::PlusInferoSuperior => CartesianAxis::PlusY,
            BiomechDirection::MinusInferoSuperior => CartesianAxis::MinusY,
            BiomechDirection::PlusMedioLateral => CartesianAxis::PlusZ,
            BiomechDirection::MinusMedioLateral => CartesianAxis::MinusZ,
        }
    }

    /// Two-letter label used in the dataset columns.
    pub fn label(self) -> &'static str {
        match self {
            BiomechDirection::PlusPosteroAnterior => "PA",
            BiomechDirection::MinusPosteroAnterior => "AP",
            BiomechDirection::PlusInferoSuperior => "IS",
            BiomechDirection::MinusInferoSuperior => "SI",
            BiomechDirection::PlusMedioLateral => "ML",
            BiomechDirection::MinusMedioLateral => "LM",
        }
    }
}

impl fmt::Display for BiomechDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BiomechDirection {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let dir = match key.as_str() {
            "pa" | "posteroanterior" => BiomechDirection::PlusPosteroAnterior,
            "ap" | "anteroposterior" => BiomechDirection::MinusPosteroAnterior,
            "is" | "inferosuperior" => BiomechDirection::PlusInferoSuperior,
            "si" | "superoinferior" => BiomechDirection::MinusInferoSuperior,
            "ml" | "mediolateral" => BiomechDirection::PlusMedioLateral,
            "lm" | "lateromedial" => BiomechDirection::MinusMedioLateral,
            _ => return Err(ParseNameError::new("biomechanical direction", s)),
        };
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_axis_of_pure_and_mixed_vectors() {
        let px = CartesianAxis::principal_axis(&Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let mx = CartesianAxis::principal_axis(&Vector3::new(-1.0, 0.0, 0.0)).unwrap();
        let py = CartesianAxis::principal_axis(&Vector3::new(0.1, 0.9, 0.05)).unwrap();
        assert_eq!(px, CartesianAxis::PlusX);
        assert_eq!(mx, CartesianAxis::MinusX);
        assert_eq!(py, CartesianAxis::PlusY);
    }

    #[test]
    fn principal_axis_ties_prefer_x_then_y() {
        let v = Vector3::new(0.5, -0.5, 0.2);
        assert_eq!(
            CartesianAxis::principal_axis(&v).unwrap(),
            CartesianAxis::PlusX
        );
        let v = Vector3::new(0.1, -0.7, 0.7);
        assert_eq!(
            CartesianAxis::principal_axis(&v).unwrap(),
            CartesianAxis::MinusY
        );
    }

    #[test]
    fn principal_axis_rejects_zero_vector() {
        assert_eq!(
            CartesianAxis::principal_axis(&Vector3::zeros()),
            Err(GeometryError::IndeterminateDirection)
        );
    }

    #[test]
    fn direction_labels_parse_both_forms() {
        assert_eq!(
            "PA".parse::<BiomechDirection>().unwrap(),
            BiomechDirection::PlusPosteroAnterior
        );
        assert_eq!(
            "latero-medial".parse::<BiomechDirection>().unwrap(),
            BiomechDirection::MinusMedioLateral
        );
        assert!("up".parse::<BiomechDirection>().is_err());
        for axis in [
            CartesianAxis::PlusX,
            CartesianAxis::MinusY,
            CartesianAxis::PlusZ,
        ] {
            assert_eq!(BiomechDirection::from_cartesian(axis).to_cartesian(), axis);
        }
    }
}

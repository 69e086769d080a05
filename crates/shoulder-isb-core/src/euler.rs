//! Intrinsic Euler sequences.
//!
//! A sequence `abc` composes `R = R_a(θ1) · R_b(θ2) · R_c(θ3)` about the
//! mobile axes. Angles are in degrees.

use crate::direction::Axis;
use crate::error::ParseNameError;
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// When the matrix entry fixing `β` is this close to `±1` the first and third
/// axes are aligned; `β` is snapped to the lock and the third angle set to zero.
const GIMBAL_LOCK_EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EulerSequence {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
    Xyx,
    Xzx,
    Yxy,
    Yzy,
    Zxz,
    Zyz,
}

impl EulerSequence {
    pub const ALL: [EulerSequence; 12] = [
        EulerSequence::Xyz,
        EulerSequence::Xzy,
        EulerSequence::Yxz,
        EulerSequence::Yzx,
        EulerSequence::Zxy,
        EulerSequence::Zyx,
        EulerSequence::Xyx,
        EulerSequence::Xzx,
        EulerSequence::Yxy,
        EulerSequence::Yzy,
        EulerSequence::Zxz,
        EulerSequence::Zyz,
    ];

    pub fn axes(self) -> [Axis; 3] {
        use Axis::*;
        match self {
            EulerSequence::Xyz => [X, Y, Z],
            EulerSequence::Xzy => [X, Z, Y],
            EulerSequence::Yxz => [Y, X, Z],
            EulerSequence::Yzx => [Y, Z, X],
            EulerSequence::Zxy => [Z, X, Y],
            EulerSequence::Zyx => [Z, Y, X],
            EulerSequence::Xyx => [X, Y, X],
            EulerSequence::Xzx => [X, Z, X],
            EulerSequence::Yxy => [Y, X, Y],
            EulerSequence::Yzy => [Y, Z, Y],
            EulerSequence::Zxz => [Z, X, Z],
            EulerSequence::Zyz => [Z, Y, Z],
        }
    }

    /// `None` for axis triples that are not a valid sequence (`xxy`, ...).
    pub fn from_axes(axes: [Axis; 3]) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.axes() == axes)
    }

    /// First and last axes coincide (`yxy`, `zxz`, ...).
    pub fn is_proper_euler(self) -> bool {
        let [a, _, c] = self.axes();
        a == c
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EulerSequence::Xyz => "xyz",
            EulerSequence::Xzy => "xzy",
            EulerSequence::Yxz => "yxz",
            EulerSequence::Yzx => "yzx",
            EulerSequence::Zxy => "zxy",
            EulerSequence::Zyx => "zyx",
            EulerSequence::Xyx => "xyx",
            EulerSequence::Xzx => "xzx",
            EulerSequence::Yxy => "yxy",
            EulerSequence::Yzy => "yzy",
            EulerSequence::Zxz => "zxz",
            EulerSequence::Zyz => "zyz",
        }
    }

    /// Rotation matrix of the three angles (degrees).
    pub fn to_rotation_matrix(self, angles_deg: [f64; 3]) -> Matrix3<f64> {
        let [a, b, c] = self.axes();
        elementary(a, angles_deg[0].to_radians())
            * elementary(b, angles_deg[1].to_radians())
            * elementary(c, angles_deg[2].to_radians())
    }

    /// Angles (degrees) of `r` in this sequence.
    ///
    /// The middle angle lies in `[-90, 90]` for Tait-Bryan sequences and in
    /// `[0, 180]` for proper Euler sequences; the others in `(-180, 180]`.
    pub fn angles_from_rotation_matrix(self, r: &Matrix3<f64>) -> [f64; 3] {
        let [a, b, c] = self.axes();
        let (i, j) = (a.index(), b.index());

        let (alpha, beta, gamma) = if self.is_proper_euler() {
            let k = 3 - i - j;
            let eps = parity(i, j, k);
            let cos_beta = r[(i, i)].clamp(-1.0, 1.0);
            if 1.0 - cos_beta.abs() < GIMBAL_LOCK_EPS {
                let beta = if cos_beta > 0.0 { 0.0 } else { PI };
                (locked_first_angle(r, a, b, beta), beta, 0.0)
            } else {
                let beta = cos_beta.acos();
                let alpha = r[(j, i)].atan2(-eps * r[(k, i)]);
                let gamma = r[(i, j)].atan2(eps * r[(i, k)]);
                (alpha, beta, gamma)
            }
        } else {
            let k = c.index();
            let eps = parity(i, j, k);
            let sin_beta = (eps * r[(i, k)]).clamp(-1.0, 1.0);
            if 1.0 - sin_beta.abs() < GIMBAL_LOCK_EPS {
                let beta = FRAC_PI_2.copysign(sin_beta);
                (locked_first_angle(r, a, b, beta), beta, 0.0)
            } else {
                let beta = sin_beta.asin();
                let alpha = (-eps * r[(j, k)]).atan2(r[(k, k)]);
                let gamma = (-eps * r[(i, j)]).atan2(r[(i, i)]);
                (alpha, beta, gamma)
            }
        };
        [alpha.to_degrees(), beta.to_degrees(), gamma.to_degrees()]
    }
}

impl fmt::Display for EulerSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EulerSequence {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<Axis> = s
            .trim()
            .chars()
            .map(Axis::from_letter)
            .collect::<Option<_>>()
            .ok_or_else(|| ParseNameError::new("euler sequence", s))?;
        <[Axis; 3]>::try_from(letters)
            .ok()
            .and_then(Self::from_axes)
            .ok_or_else(|| ParseNameError::new("euler sequence", s))
    }
}

/// Active rotation of `angle` radians about a global axis.
pub fn elementary(axis: Axis, angle: f64) -> Matrix3<f64> {
    let unit: Unit<Vector3<f64>> = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&unit, angle).into_inner()
}

fn parity(i: usize, j: usize, k: usize) -> f64 {
    if (i + 1) % 3 == j && (j + 1) % 3 == k {
        1.0
    } else {
        -1.0
    }
}

/// With `γ = 0`, `R · R_b(β)ᵀ = R_a(α)`.
fn locked_first_angle(r: &Matrix3<f64>, a: Axis, b: Axis, beta: f64) -> f64 {
    let m = r * elementary(b, beta).transpose();
    let p = (a.index() + 1) % 3;
    let q = (a.index() + 2) % 3;
    m[(q, p)].atan2(m[(p, p)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_case_insensitive_sequences() {
        assert_eq!("YXZ".parse::<EulerSequence>().unwrap(), EulerSequence::Yxz);
        assert_eq!(" zyz ".parse::<EulerSequence>().unwrap(), EulerSequence::Zyz);
        for bad in ["", "xy", "xxy", "xyzx", "abc"] {
            assert!(bad.parse::<EulerSequence>().is_err(), "{bad}");
        }
        assert_eq!(EulerSequence::Yxy.to_string(), "yxy");
    }

    #[test]
    fn elementary_rotation_is_right_handed() {
        let r = elementary(Axis::Z, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(r * Vector3::x(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn angles_round_trip_for_every_sequence() {
        const OUTER: [f64; 6] = [-150.0, -60.0, 0.0, 45.0, 120.0, 170.0];
        const CARDAN_MIDDLE: [f64; 5] = [-80.0, -30.0, 0.0, 25.0, 75.0];
        const PROPER_MIDDLE: [f64; 4] = [10.0, 60.0, 100.0, 170.0];
        for seq in EulerSequence::ALL {
            let middles: &[f64] = if seq.is_proper_euler() {
                &PROPER_MIDDLE
            } else {
                &CARDAN_MIDDLE
            };
            for (&a, &b, &c) in OUTER
                .iter()
                .flat_map(|a| middles.iter().map(move |b| (a, b)))
                .flat_map(|(a, b)| OUTER.iter().map(move |c| (a, b, c)))
            {
                let angles = [a, b, c];
                let r = seq.to_rotation_matrix(angles);
                let back = seq.angles_from_rotation_matrix(&r);
                for (x, y) in angles.iter().zip(back) {
                    assert_relative_eq!(*x, y, epsilon = 1e-9);
                }
                assert_relative_eq!(seq.to_rotation_matrix(back), r, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn gimbal_lock_rebuilds_the_same_rotation() {
        for (seq, angles) in [
            (EulerSequence::Yxz, [20.0, 90.0, 30.0]),
            (EulerSequence::Yxy, [20.0, 0.0, 30.0]),
            (EulerSequence::Zxz, [-45.0, 180.0, 10.0]),
        ] {
            let r = seq.to_rotation_matrix(angles);
            let back = seq.angles_from_rotation_matrix(&r);
            assert_relative_eq!(back[2], 0.0);
            assert_relative_eq!(seq.to_rotation_matrix(back), r, epsilon = 1e-9);
        }
    }

    #[test]
    fn sequence_change_preserves_the_rotation() {
        let r = EulerSequence::Xyz.to_rotation_matrix([10.0, 20.0, 30.0]);
        let yxz = EulerSequence::Yxz.angles_from_rotation_matrix(&r);
        assert_relative_eq!(
            EulerSequence::Yxz.to_rotation_matrix(yxz),
            r,
            epsilon = 1e-12
        );
    }
}

//! Local segment frames built from landmark axis vectors.
//!
//! A frame always has exactly one derived axis. Either two axes are explicit
//! and the third is their cross product (`x = y^z`, `y = z^x` or `z = x^y`),
//! or one axis is explicit and the other two are crossed with it in turn
//! ("twice crossed", e.g. `x = vec(..)`, `y = vec(..)^x`, `z = x^y`).
//!
//! Left-side frames are evaluated on the mirrored pose and reflected back
//! onto the right side with `R' = M R M`, `M = diag(1, 1, -1)`. A frame that
//! follows the mirrored recipe then lands on the right-side ISB frame.

use crate::axis_expr::AxisExpr;
use crate::direction::{Axis, CartesianAxis};
use crate::error::{AxisFormatError, FrameError, GeometryError};
use crate::isb;
use crate::landmark::{AnatomicalLandmark, BodySide, Segment};
use crate::vector::AxisVector;
use nalgebra::{Matrix3, Vector3};

/// Default tolerance on `det = +1` for a direct frame.
pub const DIRECT_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    axes: [AxisVector; 3],
    origin: AnatomicalLandmark,
    segment: Segment,
    side: BodySide,
    /// Rows are the unit default vectors of `x`, `y`, `z`.
    matrix: Matrix3<f64>,
    directions: [CartesianAxis; 3],
}

impl Frame {
    pub fn new(
        x: AxisVector,
        y: AxisVector,
        z: AxisVector,
        origin: AnatomicalLandmark,
        segment: Segment,
    ) -> Result<Self, GeometryError> {
        Self::new_on_side(x, y, z, origin, segment, BodySide::Right)
    }

    /// Frame of a segment recorded on `side`, in the right-side convention.
    pub fn new_on_side(
        x: AxisVector,
        y: AxisVector,
        z: AxisVector,
        origin: AnatomicalLandmark,
        segment: Segment,
        side: BodySide,
    ) -> Result<Self, GeometryError> {
        let vx = x.compute_default_vector_on(side)?;
        let vy = y.compute_default_vector_on(side)?;
        let vz = z.compute_default_vector_on(side)?;
        let [vx, vy, vz] = match side {
            BodySide::Right => [vx, vy, vz],
            // conjugating by M keeps the determinant
            BodySide::Left => [side.mirror(vx), side.mirror(vy), -side.mirror(vz)],
        };
        let directions = [
            CartesianAxis::principal_axis(&vx)?,
            CartesianAxis::principal_axis(&vy)?,
            CartesianAxis::principal_axis(&vz)?,
        ];
        let matrix = Matrix3::from_rows(&[vx.transpose(), vy.transpose(), vz.transpose()]);
        Ok(Self {
            axes: [x, y, z],
            origin,
            segment,
            side,
            matrix,
            directions,
        })
    }

    /// `z = x ^ y`.
    pub fn from_xy(
        x: AxisVector,
        y: AxisVector,
        origin: AnatomicalLandmark,
        segment: Segment,
    ) -> Result<Self, GeometryError> {
        let z = AxisVector::crossed(x.clone(), y.clone());
        Self::new(x, y, z, origin, segment)
    }

    /// `x = y ^ z`.
    pub fn from_yz(
        y: AxisVector,
        z: AxisVector,
        origin: AnatomicalLandmark,
        segment: Segment,
    ) -> Result<Self, GeometryError> {
        let x = AxisVector::crossed(y.clone(), z.clone());
        Self::new(x, y, z, origin, segment)
    }

    /// `y = z ^ x`.
    pub fn from_xz(
        x: AxisVector,
        z: AxisVector,
        origin: AnatomicalLandmark,
        segment: Segment,
    ) -> Result<Self, GeometryError> {
        let y = AxisVector::crossed(z.clone(), x.clone());
        Self::new(x, y, z, origin, segment)
    }

    /// Build a frame from the textual descriptors of a dataset row.
    ///
    /// Landmark names resolve against `segment` first, so `AC` on a clavicle
    /// row is the clavicular AC.
    pub fn from_xyz_strings(
        x: &str,
        y: &str,
        z: &str,
        origin: &str,
        segment: Segment,
    ) -> Result<Self, FrameError> {
        Self::from_xyz_strings_on_side(x, y, z, origin, segment, BodySide::Right)
    }

    /// [`Frame::from_xyz_strings`] for a row recorded on `side`.
    pub fn from_xyz_strings_on_side(
        x: &str,
        y: &str,
        z: &str,
        origin: &str,
        segment: Segment,
        side: BodySide,
    ) -> Result<Self, FrameError> {
        let ex = AxisExpr::parse(x, segment)?;
        let ey = AxisExpr::parse(y, segment)?;
        let ez = AxisExpr::parse(z, segment)?;
        let origin = AnatomicalLandmark::parse_for(origin.trim(), segment)
            .map_err(AxisFormatError::from)?;

        let (vx, vy, vz) = if let (Some(vx), Some(v), true) = (
            ex.explicit_vector(),
            ey.landmarks_crossed_with(Axis::X),
            ez.is_axis_product(Axis::X, Axis::Y),
        ) {
            // x crossed twice: y = vec ^ x, z = x ^ y
            let vy = AxisVector::crossed(v, vx.clone());
            let vz = AxisVector::crossed(vx.clone(), vy.clone());
            (vx, vy, vz)
        } else if let (Some(vz), Some(v), true) = (
            ez.explicit_vector(),
            ex.landmarks_crossed_with(Axis::Z),
            ey.is_axis_product(Axis::Z, Axis::X),
        ) {
            // z crossed twice: x = vec ^ z, y = z ^ x
            let vx = AxisVector::crossed(v, vz.clone());
            let vy = AxisVector::crossed(vz.clone(), vx.clone());
            (vx, vy, vz)
        } else if ey.explicit_vector().is_some()
            && ez.landmarks_crossed_with(Axis::Y).is_some()
            && ex.is_axis_product(Axis::Y, Axis::Z)
        {
            return Err(AxisFormatError::YAxisCrossedTwice.into());
        } else {
            match (ex.explicit_vector(), ey.explicit_vector(), ez.explicit_vector()) {
                (None, Some(vy), Some(vz)) if ex.is_axis_product(Axis::Y, Axis::Z) => {
                    (AxisVector::crossed(vy.clone(), vz.clone()), vy, vz)
                }
                (Some(vx), None, Some(vz)) if ey.is_axis_product(Axis::Z, Axis::X) => {
                    let vy = AxisVector::crossed(vz.clone(), vx.clone());
                    (vx, vy, vz)
                }
                (Some(vx), Some(vy), None) if ez.is_axis_product(Axis::X, Axis::Y) => {
                    let vz = AxisVector::crossed(vx.clone(), vy.clone());
                    (vx, vy, vz)
                }
                _ => {
                    return Err(AxisFormatError::UnrecognisedPattern {
                        x: x.to_string(),
                        y: y.to_string(),
                        z: z.to_string(),
                    }
                    .into())
                }
            }
        };
        Ok(Self::new_on_side(vx, vy, vz, origin, segment, side)?)
    }

    pub fn x_axis(&self) -> &AxisVector {
        &self.axes[0]
    }

    pub fn y_axis(&self) -> &AxisVector {
        &self.axes[1]
    }

    pub fn z_axis(&self) -> &AxisVector {
        &self.axes[2]
    }

    pub fn axis(&self, axis: Axis) -> &AxisVector {
        &self.axes[axis.index()]
    }

    pub fn origin(&self) -> AnatomicalLandmark {
        self.origin
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn side(&self) -> BodySide {
        self.side
    }

    /// Rows are the unit default vectors of the local axes.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    pub fn default_vector(&self, axis: Axis) -> Vector3<f64> {
        self.matrix.row(axis.index()).transpose()
    }

    /// Principal directions of `x`, `y`, `z`.
    pub fn principal_directions(&self) -> [CartesianAxis; 3] {
        self.directions
    }

    /// Distinct landmarks of the three axes, in first-seen order.
    pub fn landmarks(&self) -> Vec<AnatomicalLandmark> {
        let mut out: Vec<AnatomicalLandmark> = Vec::new();
        for l in self.axes.iter().flat_map(AxisVector::landmarks) {
            if !out.contains(&l) {
                out.push(l);
            }
        }
        out
    }

    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// Strict geometric check on the default vectors.
    ///
    /// A once-crossed frame whose explicit axes are not orthogonal has
    /// `|det| < 1` and fails here, while
    /// [`BiomechCoordinateSystem::is_direct`](crate::BiomechCoordinateSystem::is_direct)
    /// only looks at the principal axes and accepts it.
    pub fn is_direct(&self) -> bool {
        self.is_direct_with_tolerance(DIRECT_TOLERANCE)
    }

    pub fn is_direct_with_tolerance(&self, tolerance: f64) -> bool {
        (self.determinant() - 1.0).abs() <= tolerance
    }

    /// Same landmark set as the ISB definition (order and repetition ignored).
    pub fn has_isb_landmarks(&self) -> bool {
        let expected = isb::isb_landmarks(self.segment);
        let own = self.landmarks();
        own.len() == expected.len() && expected.iter().all(|l| own.contains(l))
    }

    pub fn is_origin_isb(&self) -> bool {
        self.origin == isb::isb_origin(self.segment)
    }

    pub fn is_origin_on_an_isb_axis(&self) -> bool {
        isb::origins_on_isb_axes(self.segment).contains(&self.origin)
    }

    pub fn is_x_axis_postero_anterior(&self) -> bool {
        self.directions[0] == CartesianAxis::PlusX
    }

    pub fn is_y_axis_supero_inferior(&self) -> bool {
        self.directions[1] == CartesianAxis::PlusY
    }

    pub fn is_z_axis_medio_lateral(&self) -> bool {
        self.directions[2] == CartesianAxis::PlusZ
    }

    pub fn is_isb_oriented(&self) -> bool {
        self.is_x_axis_postero_anterior()
            && self.is_y_axis_supero_inferior()
            && self.is_z_axis_medio_lateral()
    }

    pub fn is_isb(&self) -> bool {
        self.has_isb_landmarks() && self.is_isb_oriented() && self.is_origin_isb()
    }
}

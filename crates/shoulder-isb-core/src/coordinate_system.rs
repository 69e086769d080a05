//! ISB classification of a segment coordinate system.

use crate::direction::{Axis, BiomechDirection, CartesianAxis};
use crate::frame::{Frame, DIRECT_TOLERANCE};
use crate::isb;
use crate::landmark::{AnatomicalLandmark, Segment};
use nalgebra::Matrix3;

/// Principal directions of a segment's local axes plus its origin.
///
/// Built either from a landmark [`Frame`] or from direction labels alone. In
/// the latter case there is no landmark set to compare and
/// [`Self::has_isb_landmarks`] holds trivially. A thorax taken as the
/// laboratory frame is built with [`Self::global_thorax`].
#[derive(Clone, Debug, PartialEq)]
pub struct BiomechCoordinateSystem {
    segment: Segment,
    axes: [CartesianAxis; 3],
    origin: Option<AnatomicalLandmark>,
    frame: Option<Frame>,
    global: bool,
}

impl BiomechCoordinateSystem {
    pub fn from_frame(frame: Frame) -> Self {
        Self {
            segment: frame.segment(),
            axes: frame.principal_directions(),
            origin: Some(frame.origin()),
            frame: Some(frame),
            global: false,
        }
    }

    pub fn from_biomech_directions(
        x: BiomechDirection,
        y: BiomechDirection,
        z: BiomechDirection,
        origin: Option<AnatomicalLandmark>,
        segment: Segment,
    ) -> Self {
        Self {
            segment,
            axes: [x.to_cartesian(), y.to_cartesian(), z.to_cartesian()],
            origin,
            frame: None,
            global: false,
        }
    }

    /// Thorax standing for the laboratory frame.
    ///
    /// Its origin is usually not a landmark, so `origin` may be `None`.
    pub fn global_thorax(
        x: BiomechDirection,
        y: BiomechDirection,
        z: BiomechDirection,
        origin: Option<AnatomicalLandmark>,
    ) -> Self {
        Self {
            global: true,
            ..Self::from_biomech_directions(x, y, z, origin, Segment::Thorax)
        }
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn origin(&self) -> Option<AnatomicalLandmark> {
        self.origin
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Principal directions of the local `x`, `y`, `z` axes.
    pub fn axes(&self) -> [CartesianAxis; 3] {
        self.axes
    }

    pub fn axis_direction(&self, axis: Axis) -> CartesianAxis {
        self.axes[axis.index()]
    }

    pub fn biomech_directions(&self) -> [BiomechDirection; 3] {
        self.axes.map(BiomechDirection::from_cartesian)
    }

    pub fn is_x_axis_postero_anterior(&self) -> bool {
        self.axes[0] == CartesianAxis::PlusX
    }

    pub fn is_y_axis_supero_inferior(&self) -> bool {
        self.axes[1] == CartesianAxis::PlusY
    }

    pub fn is_z_axis_medio_lateral(&self) -> bool {
        self.axes[2] == CartesianAxis::PlusZ
    }

    pub fn is_isb_oriented(&self) -> bool {
        self.axes == isb::ISB_AXIS_DIRECTIONS
    }

    pub fn is_origin_isb(&self) -> bool {
        self.origin == Some(isb::isb_origin(self.segment))
    }

    pub fn is_origin_on_an_isb_axis(&self) -> bool {
        self.origin
            .is_some_and(|o| isb::origins_on_isb_axes(self.segment).contains(&o))
    }

    pub fn has_isb_landmarks(&self) -> bool {
        self.frame.as_ref().is_none_or(Frame::has_isb_landmarks)
    }

    pub fn is_isb(&self) -> bool {
        self.has_isb_landmarks()
            && self.is_x_axis_postero_anterior()
            && self.is_y_axis_supero_inferior()
            && self.is_z_axis_medio_lateral()
            && self.is_origin_isb()
    }

    /// Determinant of the matrix whose rows are the local axes' principal unit vectors.
    pub fn determinant(&self) -> f64 {
        let [x, y, z] = self.axes.map(CartesianAxis::unit);
        Matrix3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]).determinant()
    }

    pub fn is_direct(&self) -> bool {
        self.is_direct_with_tolerance(DIRECT_TOLERANCE)
    }

    pub fn is_direct_with_tolerance(&self, tolerance: f64) -> bool {
        (self.determinant() - 1.0).abs() <= tolerance
    }

    /// Local axis whose principal direction lies along `global`, with that direction.
    pub fn local_axis_along(&self, global: Axis) -> Option<(Axis, CartesianAxis)> {
        Axis::ALL
            .into_iter()
            .zip(self.axes)
            .find(|(_, dir)| dir.axis() == global)
    }

    pub fn postero_anterior_local_axis(&self) -> Option<CartesianAxis> {
        self.local_axis_along(Axis::X).map(|(_, dir)| dir)
    }

    pub fn infero_superior_local_axis(&self) -> Option<CartesianAxis> {
        self.local_axis_along(Axis::Y).map(|(_, dir)| dir)
    }

    pub fn medio_lateral_local_axis(&self) -> Option<CartesianAxis> {
        self.local_axis_along(Axis::Z).map(|(_, dir)| dir)
    }

    /// Signed permutation `M` with `v_isb = M * v_local`.
    ///
    /// Column `i` is the unit vector of local axis `i`'s principal direction.
    /// `None` when two local axes share a principal axis.
    pub fn to_isb_matrix(&self) -> Option<Matrix3<f64>> {
        let [x, y, z] = self.axes;
        if x.axis() == y.axis() || y.axis() == z.axis() || x.axis() == z.axis() {
            return None;
        }
        Some(Matrix3::from_columns(&[x.unit(), y.unit(), z.unit()]))
    }

    /// Same local axis (sign included) for every anatomical direction.
    pub fn has_same_orientation(&self, other: &Self) -> bool {
        self.axes == other.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{ScapulaLandmark, ThoraxLandmark};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use BiomechDirection::*;

    #[test]
    fn isb_scapula_from_frame() {
        let frame = Frame::from_xyz_strings(
            "vec(AI>TS)^vec(AI>AA)",
            "z^x",
            "vec(TS>AA)",
            "AA",
            Segment::Scapula,
        )
        .unwrap();
        let bsys = BiomechCoordinateSystem::from_frame(frame);
        assert!(bsys.is_isb());
        assert!(bsys.is_direct());
        assert_eq!(
            bsys.to_isb_matrix().unwrap(),
            Matrix3::identity()
        );
    }

    #[test]
    fn ts_origin_is_on_an_isb_axis_but_not_isb() {
        let bsys = BiomechCoordinateSystem::from_biomech_directions(
            PlusPosteroAnterior,
            PlusInferoSuperior,
            PlusMedioLateral,
            Some(AnatomicalLandmark::Scapula(ScapulaLandmark::Ts)),
            Segment::Scapula,
        );
        assert!(bsys.is_isb_oriented());
        assert!(bsys.is_origin_on_an_isb_axis());
        assert!(!bsys.is_origin_isb());
        assert!(!bsys.is_isb());
    }

    #[test]
    fn label_only_thorax_skips_landmark_checks() {
        let bsys = BiomechCoordinateSystem::from_biomech_directions(
            PlusPosteroAnterior,
            PlusInferoSuperior,
            PlusMedioLateral,
            Some(AnatomicalLandmark::Thorax(ThoraxLandmark::Ij)),
            Segment::Thorax,
        );
        assert!(bsys.has_isb_landmarks());
        assert!(bsys.is_isb());
        assert!(!bsys.is_global());
    }

    #[test]
    fn global_thorax_without_origin_is_oriented_but_not_isb() {
        let bsys = BiomechCoordinateSystem::global_thorax(
            PlusPosteroAnterior,
            PlusInferoSuperior,
            PlusMedioLateral,
            None,
        );
        assert!(bsys.is_global());
        assert_eq!(bsys.segment(), Segment::Thorax);
        assert!(bsys.is_isb_oriented());
        assert!(!bsys.is_origin_on_an_isb_axis());
        assert!(!bsys.is_isb());
    }

    #[test]
    fn signed_permutation_maps_local_axes_onto_isb() {
        // x anterior-posterior, y lateral, z superior
        let bsys = BiomechCoordinateSystem::from_biomech_directions(
            MinusPosteroAnterior,
            PlusMedioLateral,
            PlusInferoSuperior,
            None,
            Segment::Humerus,
        );
        assert!(!bsys.is_isb_oriented());
        assert!(bsys.is_direct());
        assert_eq!(
            bsys.local_axis_along(Axis::Y),
            Some((Axis::Z, CartesianAxis::PlusY))
        );
        assert_eq!(bsys.postero_anterior_local_axis(), Some(CartesianAxis::MinusX));

        let m = bsys.to_isb_matrix().unwrap();
        assert_relative_eq!(m * Vector3::x(), Vector3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(m * Vector3::y(), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(m.determinant(), 1.0);
    }

    #[test]
    fn left_handed_labels_are_not_direct() {
        let bsys = BiomechCoordinateSystem::from_biomech_directions(
            PlusPosteroAnterior,
            PlusInferoSuperior,
            MinusMedioLateral,
            None,
            Segment::Clavicle,
        );
        assert!(!bsys.is_direct());

        let degenerate = BiomechCoordinateSystem::from_biomech_directions(
            PlusPosteroAnterior,
            MinusPosteroAnterior,
            PlusMedioLateral,
            None,
            Segment::Clavicle,
        );
        assert!(degenerate.to_isb_matrix().is_none());
        assert!(!degenerate.is_direct());
    }
}

//! Stage 3: declared corrections against the frame classification.
//!
//! | orientation  | origin on an ISB axis | required correction         |
//! |--------------|-----------------------|-----------------------------|
//! | ISB          | yes                   | none                        |
//! | ISB          | no                    | Kolz (scapula only)         |
//! | not ISB      | yes                   | `to_isb` (+ Kolz, scapula)   |
//! | not ISB      | no                    | `to_isb_like` (+ Kolz, scapula) |
//!
//! An ISB-oriented non-scapula segment with an off-axis origin, and any
//! non-oriented segment with an off-axis origin, carry a definition risk. A
//! global thorax without an origin landmark counts as on-axis: it has no
//! landmarks that could be misplaced.

use crate::correction::Correction;
use crate::joint::Joint;
use serde::Serialize;
use shoulder_isb_core::{BiomechCoordinateSystem, Segment};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Parent,
    Child,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Parent => "parent",
            Side::Child => "child",
        })
    }
}

/// Orientation × origin cell of the rule table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameClass {
    IsbOrientedOnAxis,
    IsbOrientedOffAxis,
    NotOrientedOnAxis,
    NotOrientedOffAxis,
}

impl FrameClass {
    pub fn of(bsys: &BiomechCoordinateSystem) -> Self {
        let on_axis = bsys.is_origin_on_an_isb_axis()
            || (bsys.is_global() && bsys.origin().is_none());
        match (bsys.is_isb_oriented(), on_axis) {
            (true, true) => FrameClass::IsbOrientedOnAxis,
            (true, false) => FrameClass::IsbOrientedOffAxis,
            (false, true) => FrameClass::NotOrientedOnAxis,
            (false, false) => FrameClass::NotOrientedOffAxis,
        }
    }
}

/// What a correction cell must contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredCorrection {
    /// The cell must be empty.
    Nothing,
    /// One of the two Kolz corrections.
    Kolz,
    ToIsb,
    ToIsbLike,
}

impl RequiredCorrection {
    pub fn is_satisfied_by(self, declared: &[Correction]) -> bool {
        match self {
            RequiredCorrection::Nothing => declared.is_empty(),
            RequiredCorrection::Kolz => declared.iter().any(|c| c.is_kolz()),
            RequiredCorrection::ToIsb => declared.contains(&Correction::ToIsb),
            RequiredCorrection::ToIsbLike => declared.contains(&Correction::ToIsbLike),
        }
    }
}

impl fmt::Display for RequiredCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredCorrection::Nothing => f.write_str("no correction"),
            RequiredCorrection::Kolz => write!(
                f,
                "a {} or {} correction",
                Correction::KolzAcToPa,
                Correction::KolzGcToPa
            ),
            RequiredCorrection::ToIsb => write!(f, "a {} correction", Correction::ToIsb),
            RequiredCorrection::ToIsbLike => write!(f, "a {} correction", Correction::ToIsbLike),
        }
    }
}

/// Declared corrections that do not match what the classification requires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CorrectionViolation {
    pub side: Side,
    pub segment: Segment,
    pub class: FrameClass,
    pub expected: RequiredCorrection,
    pub declared: Vec<Correction>,
}

impl fmt::Display for CorrectionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let declared: Vec<&str> = self.declared.iter().map(|c| c.as_str()).collect();
        write!(
            f,
            "{} segment {} ({:?}) should declare {}, found [{}]",
            self.side,
            self.segment,
            self.class,
            self.expected,
            declared.join(", ")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SideAssessment {
    pub side: Side,
    pub segment: Segment,
    pub class: FrameClass,
    pub violations: Vec<CorrectionViolation>,
    pub definition_risk: bool,
    pub rotation_usable: bool,
    pub translation_usable: bool,
}

pub fn required_corrections(class: FrameClass, segment: Segment) -> Vec<RequiredCorrection> {
    let scapula = segment == Segment::Scapula;
    let mut out = match class {
        FrameClass::IsbOrientedOnAxis => vec![RequiredCorrection::Nothing],
        FrameClass::IsbOrientedOffAxis => Vec::new(),
        FrameClass::NotOrientedOnAxis => vec![RequiredCorrection::ToIsb],
        FrameClass::NotOrientedOffAxis => vec![RequiredCorrection::ToIsbLike],
    };
    if scapula && class != FrameClass::IsbOrientedOnAxis {
        out.push(RequiredCorrection::Kolz);
    }
    out
}

/// Apply the rule table to one side of a joint.
pub fn assess_side(
    side: Side,
    bsys: &BiomechCoordinateSystem,
    declared: &[Correction],
) -> SideAssessment {
    let segment = bsys.segment();
    let class = FrameClass::of(bsys);
    let violations: Vec<CorrectionViolation> = required_corrections(class, segment)
        .into_iter()
        .filter(|req| !req.is_satisfied_by(declared))
        .map(|expected| CorrectionViolation {
            side,
            segment,
            class,
            expected,
            declared: declared.to_vec(),
        })
        .collect();
    let definition_risk = match class {
        FrameClass::IsbOrientedOffAxis => segment != Segment::Scapula,
        FrameClass::NotOrientedOffAxis => true,
        FrameClass::IsbOrientedOnAxis | FrameClass::NotOrientedOnAxis => false,
    };
    let rotation_usable = violations.is_empty();
    SideAssessment {
        side,
        segment,
        class,
        definition_risk,
        rotation_usable,
        translation_usable: rotation_usable && bsys.is_isb(),
        violations,
    }
}

/// Both sides of a joint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CorrectionAssessment {
    pub parent: SideAssessment,
    pub child: SideAssessment,
}

impl CorrectionAssessment {
    pub fn usable_rotation_data(&self) -> bool {
        self.parent.rotation_usable && self.child.rotation_usable
    }

    pub fn usable_translation_data(&self) -> bool {
        self.parent.translation_usable && self.child.translation_usable
    }

    pub fn violations(&self) -> impl Iterator<Item = &CorrectionViolation> {
        self.parent.violations.iter().chain(&self.child.violations)
    }
}

pub fn assess_corrections(
    joint: &Joint,
    parent_declared: &[Correction],
    child_declared: &[Correction],
) -> CorrectionAssessment {
    CorrectionAssessment {
        parent: assess_side(Side::Parent, joint.parent(), parent_declared),
        child: assess_side(Side::Child, joint.child(), child_declared),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoulder_isb_core::{AnatomicalLandmark, BiomechDirection::*, HumerusLandmark};

    fn humerus(oriented: bool, origin: HumerusLandmark) -> BiomechCoordinateSystem {
        let x = if oriented { PlusPosteroAnterior } else { MinusPosteroAnterior };
        let z = if oriented { PlusMedioLateral } else { MinusMedioLateral };
        BiomechCoordinateSystem::from_biomech_directions(
            x,
            PlusInferoSuperior,
            z,
            Some(AnatomicalLandmark::Humerus(origin)),
            Segment::Humerus,
        )
    }

    #[test]
    fn isb_humerus_needs_no_correction() {
        let bsys = humerus(true, HumerusLandmark::Gh);
        let ok = assess_side(Side::Child, &bsys, &[]);
        assert!(ok.rotation_usable && ok.translation_usable && !ok.definition_risk);

        let bad = assess_side(Side::Child, &bsys, &[Correction::ToIsb]);
        assert!(!bad.rotation_usable && !bad.translation_usable);
        assert_eq!(bad.violations[0].expected, RequiredCorrection::Nothing);
    }

    #[test]
    fn global_thorax_without_origin_carries_no_risk() {
        let bsys = BiomechCoordinateSystem::global_thorax(
            PlusPosteroAnterior,
            PlusInferoSuperior,
            PlusMedioLateral,
            None,
        );
        let a = assess_side(Side::Parent, &bsys, &[]);
        assert_eq!(a.class, FrameClass::IsbOrientedOnAxis);
        assert!(!a.definition_risk);
        assert!(a.rotation_usable);
        assert!(!a.translation_usable);

        // a label-only thorax that is not global keeps the off-axis cell
        let local = BiomechCoordinateSystem::from_biomech_directions(
            PlusPosteroAnterior,
            PlusInferoSuperior,
            PlusMedioLateral,
            None,
            Segment::Thorax,
        );
        assert_eq!(FrameClass::of(&local), FrameClass::IsbOrientedOffAxis);
    }

    #[test]
    fn off_axis_humerus_is_a_definition_risk() {
        let bsys = humerus(true, HumerusLandmark::El);
        let a = assess_side(Side::Child, &bsys, &[]);
        assert_eq!(a.class, FrameClass::IsbOrientedOffAxis);
        assert!(a.rotation_usable);
        assert!(!a.translation_usable);
        assert!(a.definition_risk);
    }

    #[test]
    fn scapula_requirements_add_kolz() {
        assert_eq!(
            required_corrections(FrameClass::NotOrientedOnAxis, Segment::Scapula),
            vec![RequiredCorrection::ToIsb, RequiredCorrection::Kolz]
        );
        assert_eq!(
            required_corrections(FrameClass::IsbOrientedOffAxis, Segment::Scapula),
            vec![RequiredCorrection::Kolz]
        );
        assert!(required_corrections(FrameClass::IsbOrientedOffAxis, Segment::Clavicle).is_empty());
    }

    #[test]
    fn not_oriented_off_axis_requires_isb_like() {
        let bsys = humerus(false, HumerusLandmark::El);
        let a = assess_side(Side::Parent, &bsys, &[Correction::ToIsb]);
        assert_eq!(a.violations.len(), 1);
        assert_eq!(a.violations[0].expected, RequiredCorrection::ToIsbLike);
        assert!(a.definition_risk);
        assert!(a.violations[0].to_string().contains("to_isb_like"));

        let a = assess_side(Side::Parent, &bsys, &[Correction::ToIsbLike]);
        assert!(a.rotation_usable);
        assert!(!a.translation_usable);
    }
}

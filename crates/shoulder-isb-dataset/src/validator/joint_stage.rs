//! Stage 2: the joint a row describes.

use super::error::{Diagnostic, RowContext, RowError, Stage};
use crate::joint::{Joint, JointType};
use crate::record::RowRecord;
use shoulder_isb_core::{
    AnatomicalLandmark, BiomechCoordinateSystem, EulerSequence, ParseNameError, Segment,
};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub(crate) struct JointStage {
    /// `None` when the row has neither rotation nor translation data, or when
    /// a segment of the joint has no coordinate system.
    pub joint: Option<Joint>,
    pub valid: bool,
    pub has_rotation_data: bool,
    pub has_translation_data: bool,
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) fn check_joint(
    record: &RowRecord,
    context: &RowContext,
    systems: &BTreeMap<Segment, BiomechCoordinateSystem>,
) -> Result<JointStage, RowError> {
    let fail = |kind: ParseNameError| RowError::new(context.clone(), kind);
    let joint_type: JointType = record.joint.parse().map_err(fail)?;
    let parent: Segment = record.parent.parse().map_err(fail)?;
    let child: Segment = record.child.parse().map_err(fail)?;
    let euler_sequence: Option<EulerSequence> = record
        .euler_sequence()
        .map(str::parse)
        .transpose()
        .map_err(fail)?;
    let translation_origin = record
        .origin_displacement()
        .map(|o| AnatomicalLandmark::parse_for(o, child))
        .transpose()
        .map_err(fail)?;
    let translation_frame: Option<Segment> = record
        .displacement_cs()
        .map(str::parse)
        .transpose()
        .map_err(fail)?;

    let has_rotation_data = euler_sequence.is_some();
    let has_translation_data = translation_origin.is_some() && translation_frame.is_some();
    let mut diagnostics = Vec::new();
    let mut push = |message: String| diagnostics.push(Diagnostic::new(Stage::Joint, None, message));

    if !has_rotation_data && !has_translation_data {
        push(format!(
            "joint {joint_type} has no euler sequence and no translation, it should not be empty"
        ));
        return Ok(JointStage {
            joint: None,
            valid: false,
            has_rotation_data,
            has_translation_data,
            diagnostics,
        });
    }

    if parent != joint_type.parent() || child != joint_type.child() {
        push(format!(
            "joint {joint_type} links {} to {}, got parent {parent} and child {child}",
            joint_type.parent(),
            joint_type.child()
        ));
    }
    for (role, segment) in [("parent", parent), ("child", child)] {
        if !systems.contains_key(&segment) {
            push(format!(
                "joint {joint_type} has an empty {role} segment {segment}, it should be filled"
            ));
        }
    }

    let joint = match (systems.get(&parent), systems.get(&child)) {
        (Some(p), Some(c)) => Some(
            Joint::new(joint_type, euler_sequence, p.clone(), c.clone())
                .with_translation(translation_origin, translation_frame),
        ),
        _ => None,
    };

    Ok(JointStage {
        joint,
        valid: diagnostics.is_empty(),
        has_rotation_data,
        has_translation_data,
        diagnostics,
    })
}

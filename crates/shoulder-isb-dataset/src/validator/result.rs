use super::corrections::{CorrectionAssessment, CorrectionViolation};
use super::error::{Diagnostic, RowContext};
use crate::conversion::AngleConversion;
use crate::joint::Joint;
use crate::record::DeviationScores;

/// A validated row.
///
/// Flags default to `false` whenever the stage that sets them could not run
/// (no joint, no coordinate system for a segment, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct RowData {
    pub context: RowContext,
    pub segments_valid: bool,
    pub joint_valid: bool,
    pub has_rotation_data: bool,
    pub has_translation_data: bool,
    pub joint: Option<Joint>,
    pub corrections: Option<CorrectionAssessment>,
    pub usable_rotation_data: bool,
    pub usable_translation_data: bool,
    /// Present for every row with rotation data and a resolvable joint.
    pub conversion: Option<AngleConversion>,
    pub diagnostics: Vec<Diagnostic>,
    pub deviation: DeviationScores,
}

impl RowData {
    pub fn is_valid(&self) -> bool {
        self.segments_valid && self.joint_valid && self.corrections_valid()
    }

    pub fn corrections_valid(&self) -> bool {
        self.corrections
            .as_ref()
            .is_some_and(|c| c.violations().next().is_none())
    }

    pub fn violations(&self) -> Vec<&CorrectionViolation> {
        self.corrections
            .iter()
            .flat_map(|c| c.violations())
            .collect()
    }

    pub fn parent_definition_risk(&self) -> bool {
        self.corrections.as_ref().is_some_and(|c| c.parent.definition_risk)
    }

    pub fn child_definition_risk(&self) -> bool {
        self.corrections.as_ref().is_some_and(|c| c.child.definition_risk)
    }

    pub fn total_deviation(&self) -> f64 {
        self.deviation.total()
    }

    /// Convert one reported angle triple, when the row has a conversion.
    pub fn convert(&self, angles: [f64; 3]) -> Option<[f64; 3]> {
        self.conversion.as_ref().map(|c| c.apply(angles))
    }
}

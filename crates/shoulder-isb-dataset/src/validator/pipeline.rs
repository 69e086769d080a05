use super::corrections::assess_corrections;
use super::error::{RowContext, RowError};
use super::joint_stage::check_joint;
use super::params::ValidatorParams;
use super::result::RowData;
use super::segments::check_segments;
use crate::conversion::resolve_angle_conversion;
use crate::correction::parse_correction_cell;
use crate::record::RowRecord;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Runs the validation stages over dataset rows.
#[derive(Clone, Debug, Default)]
pub struct RowValidator {
    params: ValidatorParams,
}

impl RowValidator {
    pub fn new(params: ValidatorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ValidatorParams {
        &self.params
    }

    /// Validate one row and resolve its angle conversion.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip_all,
            fields(author = %record.author, joint = %record.joint)
        )
    )]
    pub fn process(&self, record: &RowRecord) -> Result<RowData, RowError> {
        let context = RowContext {
            author: record.author.clone(),
            joint: record.joint.clone(),
            segment: None,
        };

        let segments = check_segments(record, &context, &self.params)?;
        let joint_stage = check_joint(record, &context, &segments.systems)?;

        let mut diagnostics = segments.diagnostics;
        diagnostics.extend(joint_stage.diagnostics);

        let corrections = match &joint_stage.joint {
            Some(joint) => {
                let declared = |segment| {
                    parse_correction_cell(record.correction_cell(segment))
                        .map_err(|e| RowError::new(context.with_segment(segment), e))
                };
                let parent = declared(joint.parent().segment())?;
                let child = declared(joint.child().segment())?;
                Some(assess_corrections(joint, &parent, &child))
            }
            None => None,
        };

        let conversion = match &joint_stage.joint {
            Some(joint) if joint.has_rotation_data() => Some(
                resolve_angle_conversion(joint).map_err(|e| RowError::new(context.clone(), e))?,
            ),
            _ => None,
        };

        for d in &diagnostics {
            self.report(&context, &d.message);
        }
        for v in corrections.iter().flat_map(|c| c.violations()) {
            self.report(&context, &v.to_string());
        }

        Ok(RowData {
            segments_valid: segments.valid,
            joint_valid: joint_stage.valid,
            has_rotation_data: joint_stage.has_rotation_data,
            has_translation_data: joint_stage.has_translation_data,
            usable_rotation_data: corrections
                .as_ref()
                .is_some_and(|c| c.usable_rotation_data()),
            usable_translation_data: corrections
                .as_ref()
                .is_some_and(|c| c.usable_translation_data()),
            joint: joint_stage.joint,
            corrections,
            conversion,
            diagnostics,
            deviation: record.deviation,
            context,
        })
    }

    fn report(&self, context: &RowContext, message: &str) {
        if self.params.verbose {
            log::warn!("{context}: {message}");
        } else {
            log::debug!("{context}: {message}");
        }
    }
}

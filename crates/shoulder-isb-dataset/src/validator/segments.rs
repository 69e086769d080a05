//! Stage 1: build and check every filled segment of a row.

use super::error::{Diagnostic, RowContext, RowError, RowErrorKind, Stage};
use super::params::ValidatorParams;
use crate::record::{cell, RowRecord, SegmentColumns};
use shoulder_isb_core::{
    AnatomicalLandmark, BiomechCoordinateSystem, BiomechDirection, Frame, Segment,
};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub(crate) struct SegmentStage {
    pub systems: BTreeMap<Segment, BiomechCoordinateSystem>,
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

fn parse_labels(columns: &SegmentColumns) -> Result<Option<[BiomechDirection; 3]>, RowErrorKind> {
    if !columns.has_direction_labels() {
        return Ok(None);
    }
    let mut out = [BiomechDirection::PlusPosteroAnterior; 3];
    for (slot, label) in out.iter_mut().zip([
        &columns.x_direction,
        &columns.y_direction,
        &columns.z_direction,
    ]) {
        *slot = cell(label).unwrap_or_default().parse()?;
    }
    Ok(Some(out))
}

fn parse_origin(
    columns: &SegmentColumns,
    segment: Segment,
) -> Result<Option<AnatomicalLandmark>, RowErrorKind> {
    Ok(columns
        .origin()
        .map(|o| AnatomicalLandmark::parse_for(o, segment))
        .transpose()?)
}

/// Coordinate system described by the columns, `None` when they are empty.
///
/// A global thorax without labels is taken as the ISB-oriented laboratory frame.
/// Landmark frames are evaluated on the row's side.
pub(crate) fn build_coordinate_system(
    record: &RowRecord,
    segment: Segment,
) -> Result<Option<BiomechCoordinateSystem>, RowErrorKind> {
    let empty = SegmentColumns::default();
    let columns = record.segment(segment).unwrap_or(&empty);

    if segment == Segment::Thorax && record.thorax_is_global {
        let [x, y, z] = parse_labels(columns)?.unwrap_or([
            BiomechDirection::PlusPosteroAnterior,
            BiomechDirection::PlusInferoSuperior,
            BiomechDirection::PlusMedioLateral,
        ]);
        let origin = parse_origin(columns, segment)?;
        return Ok(Some(BiomechCoordinateSystem::global_thorax(x, y, z, origin)));
    }

    if columns.has_axis_descriptors() {
        let frame = Frame::from_xyz_strings_on_side(
            cell(&columns.x).unwrap_or_default(),
            cell(&columns.y).unwrap_or_default(),
            cell(&columns.z).unwrap_or_default(),
            columns.origin().unwrap_or_default(),
            segment,
            record.side_for(segment)?,
        )?;
        return Ok(Some(BiomechCoordinateSystem::from_frame(frame)));
    }

    match parse_labels(columns)? {
        Some([x, y, z]) => Ok(Some(BiomechCoordinateSystem::from_biomech_directions(
            x,
            y,
            z,
            parse_origin(columns, segment)?,
            segment,
        ))),
        None => Ok(None),
    }
}

fn check_segment(
    segment: Segment,
    columns: Option<&SegmentColumns>,
    bsys: &BiomechCoordinateSystem,
    params: &ValidatorParams,
) -> Result<Vec<Diagnostic>, RowErrorKind> {
    let mut out = Vec::new();
    let mut push =
        |message: String| out.push(Diagnostic::new(Stage::Segments, Some(segment), message));

    if let Some(declared) = columns.and_then(|c| c.is_isb) {
        if declared != bsys.is_isb() {
            push(format!(
                "declared is_isb={declared} but the frame classifies as is_isb={}",
                bsys.is_isb()
            ));
        }
    }

    if let (Some(labels), true) = (
        columns.map(parse_labels).transpose()?.flatten(),
        bsys.frame().is_some(),
    ) {
        for ((label, actual), name) in labels
            .iter()
            .zip(bsys.biomech_directions())
            .zip(["x", "y", "z"])
        {
            if *label != actual {
                push(format!(
                    "{name} axis declared {label} but its landmarks point {actual}"
                ));
            }
        }
    }

    if !bsys.is_direct_with_tolerance(params.direct_tolerance) {
        push(format!(
            "frame is not direct (det = {:.3}), it should be",
            bsys.determinant()
        ));
    }
    Ok(out)
}

/// Build the coordinate system of every filled segment and check it.
pub(crate) fn check_segments(
    record: &RowRecord,
    context: &RowContext,
    params: &ValidatorParams,
) -> Result<SegmentStage, RowError> {
    let mut systems = BTreeMap::new();
    let mut diagnostics = Vec::new();

    for segment in Segment::ALL {
        let at = |kind: RowErrorKind| RowError::new(context.with_segment(segment), kind);
        let Some(bsys) = build_coordinate_system(record, segment).map_err(at)? else {
            continue;
        };
        let found = check_segment(segment, record.segment(segment), &bsys, params).map_err(at)?;
        diagnostics.extend(found);
        systems.insert(segment, bsys);
    }

    Ok(SegmentStage {
        systems,
        valid: diagnostics.is_empty(),
        diagnostics,
    })
}

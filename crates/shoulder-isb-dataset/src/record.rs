//! Raw dataset rows as they come out of the curation spreadsheet.

use serde::{Deserialize, Serialize};
use shoulder_isb_core::{BodySide, ParseNameError, Segment};
use std::collections::BTreeMap;

/// Column group describing one segment's coordinate system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentColumns {
    /// Axis descriptors such as `vec(AI>TS)^vec(AI>AA)` or `z^x`.
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
    pub origin: Option<String>,
    /// Declared anatomical direction labels (`PA`, `IS`, `ML`, ...).
    pub x_direction: Option<String>,
    pub y_direction: Option<String>,
    pub z_direction: Option<String>,
    /// The author's claim that the segment follows the ISB definition.
    pub is_isb: Option<bool>,
    /// Correction cell, e.g. `"to_isb, kolz_AC_to_PA"`.
    pub correction: Option<String>,
}

fn filled(cell: &Option<String>) -> bool {
    cell.as_deref()
        .map(str::trim)
        .is_some_and(|s| !s.is_empty() && !s.eq_ignore_ascii_case("nan"))
}

impl SegmentColumns {
    /// All three axis descriptors and the origin are present.
    pub fn has_axis_descriptors(&self) -> bool {
        filled(&self.x) && filled(&self.y) && filled(&self.z) && filled(&self.origin)
    }

    pub fn has_direction_labels(&self) -> bool {
        filled(&self.x_direction) && filled(&self.y_direction) && filled(&self.z_direction)
    }

    /// Enough data to build a coordinate system.
    pub fn is_filled(&self) -> bool {
        self.has_axis_descriptors() || self.has_direction_labels()
    }

    pub fn origin(&self) -> Option<&str> {
        cell(&self.origin)
    }
}

/// Trimmed content of a cell, `None` when absent, empty or `nan`.
pub fn cell(value: &Option<String>) -> Option<&str> {
    if filled(value) {
        value.as_deref().map(str::trim)
    } else {
        None
    }
}

fn one() -> f64 {
    1.0
}

/// Confidence factors of a row; a missing factor counts as `1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviationScores {
    #[serde(default = "one")]
    pub parent_d1: f64,
    #[serde(default = "one")]
    pub parent_d2: f64,
    #[serde(default = "one")]
    pub parent_d3: f64,
    #[serde(default = "one")]
    pub parent_d4: f64,
    #[serde(default = "one")]
    pub child_d1: f64,
    #[serde(default = "one")]
    pub child_d2: f64,
    #[serde(default = "one")]
    pub child_d3: f64,
    #[serde(default = "one")]
    pub child_d4: f64,
    #[serde(default = "one")]
    pub d5: f64,
    #[serde(default = "one")]
    pub d6: f64,
    #[serde(default = "one")]
    pub d7: f64,
}

impl Default for DeviationScores {
    fn default() -> Self {
        Self::from_factors([1.0; 11])
    }
}

impl DeviationScores {
    /// Factors in column order `parent_d1..d4, child_d1..d4, d5, d6, d7`.
    pub fn from_factors(f: [f64; 11]) -> Self {
        Self {
            parent_d1: f[0],
            parent_d2: f[1],
            parent_d3: f[2],
            parent_d4: f[3],
            child_d1: f[4],
            child_d2: f[5],
            child_d3: f[6],
            child_d4: f[7],
            d5: f[8],
            d6: f[9],
            d7: f[10],
        }
    }

    pub fn factors(&self) -> [f64; 11] {
        [
            self.parent_d1,
            self.parent_d2,
            self.parent_d3,
            self.parent_d4,
            self.child_d1,
            self.child_d2,
            self.child_d3,
            self.child_d4,
            self.d5,
            self.d6,
            self.d7,
        ]
    }

    /// Product of all factors.
    pub fn total(&self) -> f64 {
        self.factors().iter().product()
    }
}

/// One dataset row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    #[serde(alias = "article_author_year")]
    pub author: String,
    pub joint: String,
    pub parent: String,
    pub child: String,
    #[serde(default)]
    pub euler_sequence: Option<String>,
    /// `right` or `left`, right when empty.
    #[serde(default)]
    pub side: Option<String>,
    /// Left-side data already expressed as right-side data.
    #[serde(default)]
    pub side_as_right: bool,
    /// Landmark the translations are measured at.
    #[serde(default)]
    pub origin_displacement: Option<String>,
    /// Segment whose frame expresses the translations.
    #[serde(default)]
    pub displacement_cs: Option<String>,
    /// The thorax is the laboratory frame and only carries direction labels.
    #[serde(default)]
    pub thorax_is_global: bool,
    #[serde(default)]
    pub segments: BTreeMap<Segment, SegmentColumns>,
    #[serde(default)]
    pub deviation: DeviationScores,
}

impl RowRecord {
    pub fn segment(&self, segment: Segment) -> Option<&SegmentColumns> {
        self.segments.get(&segment)
    }

    pub fn correction_cell(&self, segment: Segment) -> Option<&str> {
        self.segment(segment).and_then(|c| cell(&c.correction))
    }

    pub fn euler_sequence(&self) -> Option<&str> {
        cell(&self.euler_sequence)
    }

    /// Side the frames of `segment` are built on.
    ///
    /// The thorax is always read on the right, as is every segment of a row
    /// flagged `side_as_right`.
    pub fn side_for(&self, segment: Segment) -> Result<BodySide, ParseNameError> {
        if self.side_as_right || segment == Segment::Thorax {
            return Ok(BodySide::Right);
        }
        cell(&self.side).map_or(Ok(BodySide::Right), str::parse::<BodySide>)
    }

    pub fn origin_displacement(&self) -> Option<&str> {
        cell(&self.origin_displacement)
    }

    pub fn displacement_cs(&self) -> Option<&str> {
        cell(&self.displacement_cs)
    }

    pub fn total_deviation(&self) -> f64 {
        self.deviation.total()
    }
}

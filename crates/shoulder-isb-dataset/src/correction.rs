//! Correction tags declared in a row's correction cells.

use serde::{Deserialize, Serialize};
use shoulder_isb_core::ParseNameError;
use std::fmt;
use std::str::FromStr;

/// Correction an author applied (or must apply) to bring a segment frame to ISB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Correction {
    /// Pure axis permutation/flip onto the ISB axes.
    #[serde(rename = "to_isb")]
    ToIsb,
    /// Axis permutation/flip onto ISB-like axes built from other landmarks.
    #[serde(rename = "to_isb_like")]
    ToIsbLike,
    /// Kolz et al. scapula correction from an AC-based posteroanterior axis.
    #[serde(rename = "kolz_AC_to_PA")]
    KolzAcToPa,
    /// Kolz et al. scapula correction from a glenoid-based posteroanterior axis.
    #[serde(rename = "kolz_GC_to_PA")]
    KolzGcToPa,
}

impl Correction {
    pub fn as_str(self) -> &'static str {
        match self {
            Correction::ToIsb => "to_isb",
            Correction::ToIsbLike => "to_isb_like",
            Correction::KolzAcToPa => "kolz_AC_to_PA",
            Correction::KolzGcToPa => "kolz_GC_to_PA",
        }
    }

    pub fn is_kolz(self) -> bool {
        matches!(self, Correction::KolzAcToPa | Correction::KolzGcToPa)
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Correction {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        [
            Correction::ToIsb,
            Correction::ToIsbLike,
            Correction::KolzAcToPa,
            Correction::KolzGcToPa,
        ]
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(key))
        .ok_or_else(|| ParseNameError::new("correction", s))
    }
}

/// Parse a correction cell such as `"to_isb, kolz_AC_to_PA"`.
///
/// An absent cell, an empty one and the literal `nan` all mean "no correction".
pub fn parse_correction_cell(cell: Option<&str>) -> Result<Vec<Correction>, ParseNameError> {
    let Some(cell) = cell.map(str::trim) else {
        return Ok(Vec::new());
    };
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(Vec::new());
    }
    cell.split(',').map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_like_cells_hold_no_correction() {
        assert!(parse_correction_cell(None).unwrap().is_empty());
        assert!(parse_correction_cell(Some("")).unwrap().is_empty());
        assert!(parse_correction_cell(Some(" nan ")).unwrap().is_empty());
    }

    #[test]
    fn comma_separated_cells_keep_their_order() {
        let c = parse_correction_cell(Some("to_isb, kolz_AC_to_PA")).unwrap();
        assert_eq!(c, vec![Correction::ToIsb, Correction::KolzAcToPa]);
        assert!(c[1].is_kolz());
        assert!(parse_correction_cell(Some("to_isb,rotate")).is_err());
    }
}

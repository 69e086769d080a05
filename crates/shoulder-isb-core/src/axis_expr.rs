//! Typed grammar for axis descriptor strings.
//!
//! ```text
//! expr    := operand ( '^' operand )?
//! operand := 'vec(' LANDMARK '>' LANDMARK ')' | 'x' | 'y' | 'z'
//! ```
//!
//! Whitespace is ignored. An axis letter refers to another axis of the same
//! frame; resolving those references is the job of [`crate::Frame`].

use crate::direction::Axis;
use crate::error::AxisFormatError;
use crate::landmark::{AnatomicalLandmark, Segment};
use crate::vector::AxisVector;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisOperand {
    Landmarks {
        start: AnatomicalLandmark,
        end: AnatomicalLandmark,
    },
    Axis(Axis),
}

impl AxisOperand {
    fn as_vector(&self) -> Option<AxisVector> {
        match self {
            AxisOperand::Landmarks { start, end } => Some(AxisVector::start_end(*start, *end)),
            AxisOperand::Axis(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisExpr {
    Single(AxisOperand),
    Cross(AxisOperand, AxisOperand),
}

impl AxisExpr {
    /// Parse one descriptor, resolving landmark names for `segment`.
    pub fn parse(token: &str, segment: Segment) -> Result<Self, AxisFormatError> {
        let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(AxisFormatError::Empty);
        }
        let parts: Vec<&str> = compact.split('^').collect();
        match parts.as_slice() {
            [single] => Ok(AxisExpr::Single(parse_operand(single, segment)?)),
            [first, second] => Ok(AxisExpr::Cross(
                parse_operand(first, segment)?,
                parse_operand(second, segment)?,
            )),
            _ => Err(AxisFormatError::ChainedCross(token.to_string())),
        }
    }

    /// The vector denoted by this expression when it references no other axis.
    pub fn explicit_vector(&self) -> Option<AxisVector> {
        match self {
            AxisExpr::Single(op) => op.as_vector(),
            AxisExpr::Cross(a, b) => Some(AxisVector::crossed(a.as_vector()?, b.as_vector()?)),
        }
    }

    /// True for the pure axis product `first ^ second`.
    pub fn is_axis_product(&self, first: Axis, second: Axis) -> bool {
        matches!(
            self,
            AxisExpr::Cross(AxisOperand::Axis(a), AxisOperand::Axis(b))
                if *a == first && *b == second
        )
    }

    /// For `vec(A>B) ^ axis`, the landmark vector on the left.
    pub fn landmarks_crossed_with(&self, axis: Axis) -> Option<AxisVector> {
        match self {
            AxisExpr::Cross(left @ AxisOperand::Landmarks { .. }, AxisOperand::Axis(a))
                if *a == axis =>
            {
                left.as_vector()
            }
            _ => None,
        }
    }
}

fn parse_operand(raw: &str, segment: Segment) -> Result<AxisOperand, AxisFormatError> {
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Axis::from_letter(c)
            .map(AxisOperand::Axis)
            .ok_or_else(|| AxisFormatError::MalformedOperand(raw.to_string()));
    }

    let inner = raw
        .strip_prefix("vec(")
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| AxisFormatError::MalformedOperand(raw.to_string()))?;
    let (start, end) = inner
        .split_once('>')
        .filter(|(s, e)| !s.is_empty() && !e.is_empty() && !e.contains('>'))
        .ok_or_else(|| AxisFormatError::MalformedOperand(raw.to_string()))?;

    Ok(AxisOperand::Landmarks {
        start: AnatomicalLandmark::parse_for(start, segment)?,
        end: AnatomicalLandmark::parse_for(end, segment)?,
    })
}

/// A name that does not belong to a closed vocabulary (segment, landmark, direction, ...).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseNameError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Numerical failures while turning landmarks into directions.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("degenerate vector {vector} (norm {norm:e})")]
    DegenerateVector { vector: String, norm: f64 },
    #[error("principal direction of a zero vector is indeterminate")]
    IndeterminateDirection,
}

/// Malformed axis descriptor strings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AxisFormatError {
    #[error("empty axis descriptor")]
    Empty,
    #[error("expected 'vec(START>END)' or an axis letter, got '{0}'")]
    MalformedOperand(String),
    #[error("at most one '^' is allowed in an axis descriptor, got '{0}'")]
    ChainedCross(String),
    #[error(transparent)]
    UnknownName(#[from] ParseNameError),
    #[error("unrecognised axis pattern (x='{x}', y='{y}', z='{z}')")]
    UnrecognisedPattern { x: String, y: String, z: String },
    #[error("frames whose y axis is crossed twice are not supported")]
    YAxisCrossedTwice,
}

/// Errors raised while building a [`crate::Frame`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error(transparent)]
    Format(#[from] AxisFormatError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

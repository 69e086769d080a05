use serde::{Deserialize, Serialize};
use shoulder_isb_core::DIRECT_TOLERANCE;

/// Configuration of the row validator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorParams {
    /// Emit every diagnostic and correction violation through `log::warn!`.
    ///
    /// They are recorded on the row either way.
    pub verbose: bool,
    /// Accepted distance of a frame determinant from `+1`.
    pub direct_tolerance: f64,
}

impl Default for ValidatorParams {
    fn default() -> Self {
        Self {
            verbose: false,
            direct_tolerance: DIRECT_TOLERANCE,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::{AffineTransform, AxisMask, IntensityClasses, Trajectory};

/// Non-fatal conditions observed during a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DigitizeWarning {
    /// No pixel carried the foreground level; the colors were likely misclassified.
    EmptyTrajectory { foreground: u8 },
}

/// Output of a digitization run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DigitizeResult {
    pub transform: AffineTransform,
    pub intensities: IntensityClasses,
    pub mask: AxisMask,
    pub trajectory: Trajectory,
    pub warnings: Vec<DigitizeWarning>,
}

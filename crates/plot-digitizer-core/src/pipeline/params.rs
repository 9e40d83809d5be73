use serde::{Deserialize, Serialize};

use crate::{IntensityParams, ParamsError};

/// Configuration for the digitizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitizerParams {
    /// Histogram settings used to classify canvas and curve levels.
    pub intensity: IntensityParams,
    /// Fixed canvas level; classified from the histogram when `None`.
    pub background: Option<u8>,
    /// Fixed curve level; classified from the histogram when `None`.
    pub foreground: Option<u8>,
    /// Blank the axis strips before scanning for the curve.
    pub mask_axes: bool,
}

impl Default for DigitizerParams {
    fn default() -> Self {
        Self {
            intensity: IntensityParams::default(),
            background: None,
            foreground: None,
            mask_axes: true,
        }
    }
}

impl DigitizerParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.intensity.validate()
    }
}

use crate::{CalibrationError, ClassifyError, ImageError, ParamsError};

/// Errors returned by the digitization pipeline.
#[derive(thiserror::Error, Debug)]
pub enum DigitizeError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("pixel point provider failed: {0}")]
    PointProvider(#[source] super::ProviderError),
}

use crate::Axis;

/// Errors returned while fitting the pixel/data calibration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("at least {required} correspondence points are required, got {got}")]
    InsufficientPoints { got: usize, required: usize },
    #[error("correspondence length mismatch: {data} data points vs {pixel} pixel points")]
    MismatchedCorrespondence { data: usize, pixel: usize },
    #[error("least-squares fit is singular on the {axis} axis")]
    SingularFit { axis: Axis },
}

/// Errors from the `"x,y"` textual point format.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PointParseError {
    #[error("point {input:?} must have exactly two comma-separated components")]
    Components { input: String },
    #[error("point {input:?} has a non-numeric component {component:?}")]
    Number { input: String, component: String },
    #[error("point {input:?} has a non-finite component")]
    NonFinite { input: String },
}

/// Errors from constructing or combining grayscale images.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid grayscale buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },
    #[error("image has no pixels")]
    Empty,
}

/// Errors from validating parameter structs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("histogram bin count must be in 2..=256, got {0}")]
    HistogramBins(usize),
}

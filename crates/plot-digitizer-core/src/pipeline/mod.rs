//! Digitization pipeline.
//!
//! This module wires together affine calibration, intensity classification,
//! axis masking, and trajectory extraction for a single plot image.

mod digitizer;
mod error;
mod params;
mod result;
mod sink;

pub use digitizer::{complete_correspondences, digitize, Digitizer};
pub use error::DigitizeError;
pub use params::DigitizerParams;
pub use result::{DigitizeResult, DigitizeWarning};
pub use sink::{DebugSink, NoDebug, PixelPointProvider, ProviderError};

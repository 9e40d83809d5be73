//! Core calibration and extraction pipeline for digitizing line plots.
//!
//! Given a grayscale plot image and a few `(data point, pixel location)`
//! correspondences, the pipeline
//! 1. fits a per-axis affine pixel/data transform,
//! 2. classifies background and curve gray levels from the histogram,
//! 3. blanks the axis strips left of and below the plot origin,
//! 4. reduces the curve pixels to one median sample per column, in data units.
//!
//! This crate does not depend on any concrete image codec; the
//! `plot-digitizer` crate adapts `image` buffers and provides the CLI.
//!
//! ```
//! use nalgebra::Point2;
//! use plot_digitizer_core::{digitize, GrayImage};
//!
//! let mut img = GrayImage::filled(20, 20, 255);
//! for x in 0..20 {
//!     img.set(x, 10, 0);
//! }
//! let data = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
//! let pixel = [Point2::new(0.0, 19.0), Point2::new(19.0, 0.0)];
//! let trajectory = digitize(&img.view(), &data, &pixel).unwrap();
//! assert_eq!(trajectory.len(), 20);
//! ```

mod affine;
mod axis_mask;
mod error;
mod image;
mod intensity;
mod logger;
mod pipeline;
mod points;
mod trajectory;

pub use affine::{to_plot_frame, AffineTransform, Axis, MIN_CORRESPONDENCES};
pub use axis_mask::{mask_axes, AxisMask};
pub use error::{CalibrationError, ImageError, ParamsError, PointParseError};
pub use image::{GrayImage, GrayImageView};
pub use intensity::{
    classify_intensities, ClassifyError, IntensityClasses, IntensityHistogram, IntensityParams,
};
pub use pipeline::{
    complete_correspondences, digitize, DebugSink, DigitizeError, DigitizeResult,
    DigitizeWarning, Digitizer, DigitizerParams, NoDebug, PixelPointProvider, ProviderError,
};
pub use points::{parse_point, parse_points, Correspondences};
pub use trajectory::{
    extract_trajectory, foreground_columns, median_row, render_overlay, Trajectory,
    TrajectoryPoint,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

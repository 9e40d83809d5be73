//! High-level facade for digitizing scanned line plots.
//!
//! This crate provides:
//! - re-exports of the `plot-digitizer-core` pipeline,
//! - JSON config / report helpers and CSV or JSON trajectory export,
//! - a line-oriented provider for pixel locations that were not given up front,
//! - (feature `image`) helpers that run the pipeline on `image::GrayImage`
//!   buffers and write debug rasters to a directory,
//! - (feature `cli`) the `plot-digitizer` binary.
//!
//! ## Quickstart
//!
//! ```no_run
//! use plot_digitizer::{digitize_image, load_gray};
//! use plot_digitizer::core::{parse_points, Correspondences, DigitizerParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = load_gray("plot.png")?;
//! let data = parse_points(&["0,0", "10,0", "0,1"])?;
//! let pixel = parse_points(&["52,410", "598,410", "52,38"])?;
//! let correspondences = Correspondences::new(data, pixel)?;
//!
//! let result = digitize_image(&img, &correspondences, DigitizerParams::default())?;
//! for (x, y) in result.trajectory.xy() {
//!     println!("{x},{y}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pixel conventions
//! Pixel locations use the image convention: origin at the top-left corner,
//! y growing downwards. Data coordinates have y growing upwards.

pub use plot_digitizer_core as core;

pub use plot_digitizer_core::{
    Correspondences, DigitizeError, DigitizeResult, Digitizer, DigitizerParams, Trajectory,
};

pub mod io;
pub mod provider;

pub use io::{write_trajectory, DigitizeConfig, DigitizeIoError, DigitizeReport};
pub use provider::LinePointProvider;

#[cfg(feature = "image")]
mod image_io;

#[cfg(feature = "image")]
pub use image_io::{
    digitize_image, digitize_image_with_debug, gray_view, load_gray, to_image_buffer,
    DirDebugSink,
};

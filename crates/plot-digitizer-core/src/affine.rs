//! Per-axis affine calibration between pixel and data coordinates.
//!
//! Two coordinate conventions are involved:
//! - *cv pixels*: origin at the top-left corner, y grows downwards. This is how
//!   correspondence locations are supplied and how the image is indexed.
//! - *plot-frame pixels*: origin at the bottom-left corner, y grows upwards,
//!   i.e. `y_plot = image_height - y_cv`. The fit is performed in this frame so
//!   that both offsets count pixels from the plot's lower-left corner.
//!
//! The fitted model is `pixel_plot = scale * data + offset` per axis, which
//! inverts to `data_x = (px - offset_x) / scale_x` and
//! `data_y = (image_height - py - offset_y) / scale_y` for cv pixels.

use std::fmt;

use log::debug;
use nalgebra::{DMatrix, DVector, Point2};
use serde::{Deserialize, Serialize};

use crate::CalibrationError;

/// Minimum number of correspondence pairs needed for a fit.
pub const MIN_CORRESPONDENCES: usize = 2;

/// Image/plot axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Independent scale and offset per axis, `((scale_x, scale_y), (offset_x, offset_y))`.
///
/// Both scales are non-zero for any value produced by [`AffineTransform::fit`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub scale: [f64; 2],
    pub offset: [f64; 2],
}

impl AffineTransform {
    pub fn new(scale: [f64; 2], offset: [f64; 2]) -> Self {
        Self { scale, offset }
    }

    /// Fit the transform from data points and their plot-frame pixel locations.
    ///
    /// Each axis is an ordinary degree-1 least-squares fit of pixel against data
    /// coordinate. With two points this is the exact line through them.
    /// Use [`to_plot_frame`] to convert cv-style locations first.
    pub fn fit(
        data: &[Point2<f64>],
        pixel_plot: &[Point2<f64>],
    ) -> Result<Self, CalibrationError> {
        if data.len() != pixel_plot.len() {
            return Err(CalibrationError::MismatchedCorrespondence {
                data: data.len(),
                pixel: pixel_plot.len(),
            });
        }
        if data.len() < MIN_CORRESPONDENCES {
            return Err(CalibrationError::InsufficientPoints {
                got: data.len(),
                required: MIN_CORRESPONDENCES,
            });
        }

        let (sx, ox) = fit_line(
            data.iter().map(|p| p.x),
            pixel_plot.iter().map(|p| p.x),
            Axis::X,
        )?;
        let (sy, oy) = fit_line(
            data.iter().map(|p| p.y),
            pixel_plot.iter().map(|p| p.y),
            Axis::Y,
        )?;

        debug!(
            "affine fit from {} points: scale=({sx:.6}, {sy:.6}) offset=({ox:.3}, {oy:.3})",
            data.len()
        );
        Ok(Self::new([sx, sy], [ox, oy]))
    }

    /// Map a cv-style pixel location to data coordinates.
    #[inline]
    pub fn to_data(&self, pixel: Point2<f64>, image_height: usize) -> Point2<f64> {
        let [sx, sy] = self.scale;
        let [ox, oy] = self.offset;
        Point2::new(
            (pixel.x - ox) / sx,
            (image_height as f64 - pixel.y - oy) / sy,
        )
    }

    /// Map a data point to its cv-style pixel location.
    #[inline]
    pub fn to_pixel(&self, data: Point2<f64>, image_height: usize) -> Point2<f64> {
        let [sx, sy] = self.scale;
        let [ox, oy] = self.offset;
        Point2::new(sx * data.x + ox, image_height as f64 - (sy * data.y + oy))
    }

    /// Offsets rounded to whole pixels: `(columns, rows)` from the lower-left corner.
    pub fn rounded_offsets(&self) -> (i64, i64) {
        (
            self.offset[0].round() as i64,
            self.offset[1].round() as i64,
        )
    }
}

/// Convert cv-style pixel locations to the plot frame used by [`AffineTransform::fit`].
pub fn to_plot_frame(pixels: &[Point2<f64>], image_height: usize) -> Vec<Point2<f64>> {
    let h = image_height as f64;
    pixels.iter().map(|p| Point2::new(p.x, h - p.y)).collect()
}

fn has_spread(values: &[f64]) -> bool {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    hi - lo > f64::EPSILON * lo.abs().max(hi.abs())
}

/// Least-squares `pixel = slope * data + intercept` for one axis.
fn fit_line(
    data: impl Iterator<Item = f64>,
    pixel: impl Iterator<Item = f64>,
    axis: Axis,
) -> Result<(f64, f64), CalibrationError> {
    let d: Vec<f64> = data.collect();
    let p: Vec<f64> = pixel.collect();
    if !has_spread(&d) || !has_spread(&p) {
        return Err(CalibrationError::SingularFit { axis });
    }

    // Center and scale the data column to unit RMS so the singular values do
    // not depend on the data units.
    let n = d.len();
    let mean = d.iter().sum::<f64>() / n as f64;
    let rms = (d.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64).sqrt();
    if !(rms.is_finite() && rms > 0.0) {
        return Err(CalibrationError::SingularFit { axis });
    }
    let mut a = DMatrix::<f64>::zeros(n, 2);
    for (k, &v) in d.iter().enumerate() {
        a[(k, 0)] = (v - mean) / rms;
        a[(k, 1)] = 1.0;
    }
    let b = DVector::from_vec(p);

    let svd = a.svd(true, true);
    let sol = svd
        .solve(&b, 1e-12)
        .map_err(|_| CalibrationError::SingularFit { axis })?;

    let slope = sol[0] / rms;
    let intercept = sol[1] - slope * mean;
    if !slope.is_finite() || slope == 0.0 || !intercept.is_finite() {
        return Err(CalibrationError::SingularFit { axis });
    }
    Ok((slope, intercept))
}

//! Blank out the axis strips left of and below the plot origin.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{AffineTransform, GrayImage, GrayImageView};

/// Extent of the blanked axis strips, in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMask {
    /// Rows blanked at the bottom of the image.
    pub rows: usize,
    /// Columns blanked at the left of the image.
    pub cols: usize,
}

impl AxisMask {
    /// Strip sizes from the rounded transform offsets, clamped to the image.
    pub fn from_transform(transform: &AffineTransform, width: usize, height: usize) -> Self {
        let (off_cols, off_rows) = transform.rounded_offsets();
        Self {
            rows: off_rows.clamp(0, height as i64) as usize,
            cols: off_cols.clamp(0, width as i64) as usize,
        }
    }

    /// Fill the strips of `image` with `fill`.
    pub fn apply(&self, image: &mut GrayImage, fill: u8) {
        let (w, h) = (image.width, image.height);
        let rows = self.rows.min(h);
        let cols = self.cols.min(w);
        image.data[(h - rows) * w..].fill(fill);
        for row in image.data.chunks_exact_mut(w.max(1)).take(h - rows) {
            row[..cols].fill(fill);
        }
    }
}

/// Return a copy of `image` with the axis strips painted in `background`.
///
/// The bottom `round(offset_y)` rows and the left `round(offset_x)` columns are
/// overwritten; the source image is left untouched.
pub fn mask_axes(
    image: &GrayImageView<'_>,
    transform: &AffineTransform,
    background: u8,
) -> (GrayImage, AxisMask) {
    let mask = AxisMask::from_transform(transform, image.width, image.height);
    let mut out = image.to_owned_image();
    mask.apply(&mut out, background);
    debug!(
        "masked {} bottom rows and {} left columns with level {background}",
        mask.rows, mask.cols
    );
    (out, mask)
}

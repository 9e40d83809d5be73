//! Background / foreground intensity classification from the image histogram.
//!
//! The most populated histogram bin is taken as the plot canvas and the second
//! most populated bin as the drawn curve. Bins with equal counts rank by
//! ascending bin index.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{GrayImageView, ImageError, ParamsError};

/// Histogram parameters for intensity classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityParams {
    /// Number of equal-width bins spanning [0, 256).
    pub num_bins: usize,
}

impl Default for IntensityParams {
    fn default() -> Self {
        Self { num_bins: 128 }
    }
}

impl IntensityParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(2..=256).contains(&self.num_bins) {
            return Err(ParamsError::HistogramBins(self.num_bins));
        }
        Ok(())
    }
}

/// Background and foreground gray levels of a plot image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityClasses {
    pub background: u8,
    pub foreground: u8,
}

/// Binned intensity histogram with per-bin representative levels.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntensityHistogram {
    /// Raw pixel count per bin.
    pub counts: Vec<u32>,
    /// Density per bin: `count / (total * bin_width)`, integrating to 1 over [0, 256).
    pub density: Vec<f64>,
    /// Gray level standing for each bin: its most frequent exact level, or the
    /// lowest level of the bin when the bin is empty.
    pub levels: Vec<u8>,
}

impl IntensityHistogram {
    pub fn compute(image: &GrayImageView<'_>, params: &IntensityParams) -> Self {
        let num_bins = params.num_bins;
        let mut exact = [0u32; 256];
        for &v in image.data {
            exact[v as usize] += 1;
        }

        let mut counts = vec![0u32; num_bins];
        let mut levels: Vec<u8> = (0..num_bins).map(|b| bin_lower_level(b, num_bins)).collect();
        let mut best_in_bin = vec![0u32; num_bins];
        for (level, &c) in exact.iter().enumerate() {
            let b = level * num_bins / 256;
            counts[b] += c;
            // Strict comparison keeps the lowest level among equally frequent ones.
            if c > best_in_bin[b] {
                best_in_bin[b] = c;
                levels[b] = level as u8;
            }
        }

        let total = image.data.len() as f64;
        let bin_width = 256.0 / num_bins as f64;
        let density = counts
            .iter()
            .map(|&c| {
                if total > 0.0 {
                    c as f64 / (total * bin_width)
                } else {
                    0.0
                }
            })
            .collect();

        Self {
            counts,
            density,
            levels,
        }
    }

    /// Bin indices ordered by descending count; ties keep ascending bin order.
    pub fn ranked_bins(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.counts.len()).collect();
        order.sort_by(|&a, &b| self.counts[b].cmp(&self.counts[a]).then(a.cmp(&b)));
        order
    }
}

fn bin_lower_level(bin: usize, num_bins: usize) -> u8 {
    (bin * 256).div_ceil(num_bins).min(255) as u8
}

/// Classify background and foreground gray levels of `image`.
///
/// When the image holds a single populated bin, the foreground falls on an
/// empty bin and therefore matches no pixel.
pub fn classify_intensities(
    image: &GrayImageView<'_>,
    params: &IntensityParams,
) -> Result<IntensityClasses, ClassifyError> {
    params.validate()?;
    if image.is_empty() {
        return Err(ImageError::Empty.into());
    }

    let hist = IntensityHistogram::compute(image, params);
    let ranked = hist.ranked_bins();
    let (bg_bin, fg_bin) = (ranked[0], ranked[1]);
    let classes = IntensityClasses {
        background: hist.levels[bg_bin],
        foreground: hist.levels[fg_bin],
    };
    debug!(
        "intensity classes: background={} (bin {bg_bin}, {} px) foreground={} (bin {fg_bin}, {} px)",
        classes.background, hist.counts[bg_bin], classes.foreground, hist.counts[fg_bin]
    );
    Ok(classes)
}

/// Errors from [`classify_intensities`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error(transparent)]
    Image(#[from] ImageError),
}

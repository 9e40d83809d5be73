//! Helpers that connect `image` crate buffers to the digitizer core.

use std::fs;
use std::path::{Path, PathBuf};

use ::image::ImageReader;
use log::{debug, warn};

use crate::core::{
    Correspondences, DebugSink, DigitizeError, DigitizeResult, Digitizer, DigitizerParams,
    GrayImageView, NoDebug,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Convert an `image::GrayImage` into the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy a core view into an `image::GrayImage`.
pub fn to_image_buffer(view: &GrayImageView<'_>) -> Option<::image::GrayImage> {
    let w = u32::try_from(view.width).ok()?;
    let h = u32::try_from(view.height).ok()?;
    ::image::GrayImage::from_raw(w, h, view.data.to_vec())
}

/// Decode any supported image file and convert it to 8-bit grayscale.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, ::image::ImageError> {
    Ok(ImageReader::open(path)?.decode()?.to_luma8())
}

/// Debug sink writing each checkpoint to `<dir>/<name>.png`.
///
/// Write failures are logged and otherwise ignored.
#[derive(Clone, Debug)]
pub struct DirDebugSink {
    dir: PathBuf,
}

impl DirDebugSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }
}

impl DebugSink for DirDebugSink {
    fn record(&mut self, name: &str, image: &GrayImageView<'_>) {
        let Some(buf) = to_image_buffer(image) else {
            warn!("debug image {name:?} has unsupported dimensions");
            return;
        };
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("cannot create debug dir {}: {e}", self.dir.display());
            return;
        }
        let path = self.path_for(name);
        match buf.save(&path) {
            Ok(()) => debug!("wrote debug image {}", path.display()),
            Err(e) => warn!("cannot write debug image {}: {e}", path.display()),
        }
    }
}

/// Run the digitizer end-to-end on an `image::GrayImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, correspondences, params, sink),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn digitize_image_with_debug(
    img: &::image::GrayImage,
    correspondences: &Correspondences,
    params: DigitizerParams,
    sink: &mut dyn DebugSink,
) -> Result<DigitizeResult, DigitizeError> {
    Digitizer::new(params)?.digitize_with_debug(&gray_view(img), correspondences, sink)
}

/// Convenience overload without debug output.
pub fn digitize_image(
    img: &::image::GrayImage,
    correspondences: &Correspondences,
    params: DigitizerParams,
) -> Result<DigitizeResult, DigitizeError> {
    digitize_image_with_debug(img, correspondences, params, &mut NoDebug)
}

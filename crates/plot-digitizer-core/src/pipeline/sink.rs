use nalgebra::Point2;

use crate::GrayImageView;

/// Error type returned by [`PixelPointProvider`] implementations.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Receives intermediate rasters for human inspection.
///
/// Sinks must not influence the pipeline result; failures are theirs to report.
pub trait DebugSink {
    /// When false, checkpoints are neither rendered nor recorded.
    fn enabled(&self) -> bool {
        true
    }

    fn record(&mut self, name: &str, image: &GrayImageView<'_>);
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDebug;

impl DebugSink for NoDebug {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _name: &str, _image: &GrayImageView<'_>) {}
}

/// Supplies cv-style pixel locations for data points that have none yet.
pub trait PixelPointProvider {
    /// Return one location per entry of `missing`, in the same order.
    fn collect_pixel_points(
        &mut self,
        missing: &[Point2<f64>],
        image: &GrayImageView<'_>,
    ) -> Result<Vec<Point2<f64>>, ProviderError>;
}

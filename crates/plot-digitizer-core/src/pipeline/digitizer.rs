use log::{debug, info, warn};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{
    DebugSink, DigitizeError, DigitizeResult, DigitizeWarning, DigitizerParams, NoDebug,
    PixelPointProvider,
};
use crate::{
    classify_intensities, extract_trajectory, mask_axes, render_overlay, to_plot_frame,
    AffineTransform, AxisMask, CalibrationError, Correspondences, GrayImageView, ImageError,
    IntensityClasses, Trajectory,
};

/// Digitize with default parameters: image + correspondences -> trajectory.
pub fn digitize(
    image: &GrayImageView<'_>,
    data_points: &[Point2<f64>],
    pixel_points: &[Point2<f64>],
) -> Result<Trajectory, DigitizeError> {
    let correspondences = Correspondences::new(data_points.to_vec(), pixel_points.to_vec())?;
    let result = Digitizer::default().digitize(image, &correspondences)?;
    Ok(result.trajectory)
}

/// Calibrate-and-extract pipeline for line plots.
#[derive(Clone, Debug, Default)]
pub struct Digitizer {
    params: DigitizerParams,
}

impl Digitizer {
    /// Create a digitizer after validating `params`.
    pub fn new(params: DigitizerParams) -> Result<Self, DigitizeError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &DigitizerParams {
        &self.params
    }

    /// Run the pipeline on a complete correspondence set.
    pub fn digitize(
        &self,
        image: &GrayImageView<'_>,
        correspondences: &Correspondences,
    ) -> Result<DigitizeResult, DigitizeError> {
        self.digitize_with_debug(image, correspondences, &mut NoDebug)
    }

    /// Run the pipeline, handing intermediate rasters to `sink`.
    pub fn digitize_with_debug(
        &self,
        image: &GrayImageView<'_>,
        correspondences: &Correspondences,
        sink: &mut dyn DebugSink,
    ) -> Result<DigitizeResult, DigitizeError> {
        RunContext {
            image: *image,
            correspondences,
            params: &self.params,
            sink,
        }
        .run()
    }

    /// Ask `provider` for any missing pixel locations, then run the pipeline.
    pub fn digitize_with_provider(
        &self,
        image: &GrayImageView<'_>,
        correspondences: Correspondences,
        provider: &mut dyn PixelPointProvider,
        sink: &mut dyn DebugSink,
    ) -> Result<DigitizeResult, DigitizeError> {
        let correspondences = complete_correspondences(image, correspondences, provider)?;
        self.digitize_with_debug(image, &correspondences, sink)
    }
}

/// Fill in missing pixel locations of `correspondences` from `provider`.
///
/// Complete sets are returned unchanged without consulting the provider.
pub fn complete_correspondences(
    image: &GrayImageView<'_>,
    mut correspondences: Correspondences,
    provider: &mut dyn PixelPointProvider,
) -> Result<Correspondences, DigitizeError> {
    if correspondences.is_complete() {
        return Ok(correspondences);
    }
    let missing = correspondences.missing().to_vec();
    info!("requesting {} pixel locations", missing.len());
    let located = provider
        .collect_pixel_points(&missing, image)
        .map_err(DigitizeError::PointProvider)?;
    if located.len() != missing.len() {
        return Err(CalibrationError::MismatchedCorrespondence {
            data: correspondences.data.len(),
            pixel: correspondences.pixel.len() + located.len(),
        }
        .into());
    }
    correspondences.pixel.extend(located);
    Ok(correspondences)
}

/// State owned by one digitization run.
struct RunContext<'a> {
    image: GrayImageView<'a>,
    correspondences: &'a Correspondences,
    params: &'a DigitizerParams,
    sink: &'a mut dyn DebugSink,
}

impl RunContext<'_> {
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self),
            fields(
                width = self.image.width,
                height = self.image.height,
                points = self.correspondences.len()
            )
        )
    )]
    fn run(mut self) -> Result<DigitizeResult, DigitizeError> {
        if self.image.is_empty() {
            return Err(ImageError::Empty.into());
        }
        let debug = self.sink.enabled();
        if debug {
            self.sink.record("original", &self.image);
        }

        let transform = self.calibrate()?;
        let intensities = self.classify()?;

        let (masked, mask) = if self.params.mask_axes {
            mask_axes(&self.image, &transform, intensities.background)
        } else {
            (self.image.to_owned_image(), AxisMask::default())
        };
        let masked_view = masked.view();
        if debug {
            self.sink.record("masked", &masked_view);
        }

        let trajectory = extract_trajectory(&masked_view, intensities.foreground, &transform);
        if debug {
            self.sink
                .record("final", &render_overlay(&masked_view, &trajectory).view());
        }

        let mut warnings = Vec::new();
        if trajectory.is_empty() {
            warn!(
                "no pixel matched foreground level {}; check the background/foreground classification",
                intensities.foreground
            );
            warnings.push(DigitizeWarning::EmptyTrajectory {
                foreground: intensities.foreground,
            });
        } else {
            info!("extracted {} trajectory points", trajectory.len());
        }

        Ok(DigitizeResult {
            transform,
            intensities,
            mask,
            trajectory,
            warnings,
        })
    }

    fn calibrate(&self) -> Result<AffineTransform, CalibrationError> {
        let c = self.correspondences;
        if !c.is_complete() {
            return Err(CalibrationError::MismatchedCorrespondence {
                data: c.data.len(),
                pixel: c.pixel.len(),
            });
        }
        let plot_frame = to_plot_frame(&c.pixel, self.image.height);
        let transform = AffineTransform::fit(&c.data, &plot_frame)?;
        info!(
            "calibrated from {} points: scale=({:.4}, {:.4}) offset=({:.2}, {:.2})",
            c.len(),
            transform.scale[0],
            transform.scale[1],
            transform.offset[0],
            transform.offset[1]
        );
        Ok(transform)
    }

    fn classify(&self) -> Result<IntensityClasses, DigitizeError> {
        let p = self.params;
        if let (Some(background), Some(foreground)) = (p.background, p.foreground) {
            debug!("using fixed levels background={background} foreground={foreground}");
            return Ok(IntensityClasses {
                background,
                foreground,
            });
        }
        let classified = classify_intensities(&self.image, &p.intensity)?;
        Ok(IntensityClasses {
            background: p.background.unwrap_or(classified.background),
            foreground: p.foreground.unwrap_or(classified.foreground),
        })
    }
}

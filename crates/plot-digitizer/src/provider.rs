//! Line-oriented pixel point provider.
//!
//! Stands in for clicking on the figure: each missing location is requested
//! with a prompt and read back as an `"x,y"` line.

use std::io::{BufRead, Write};

use log::{info, warn};
use nalgebra::Point2;

use crate::core::{parse_point, GrayImageView, PixelPointProvider, ProviderError};

#[derive(thiserror::Error, Debug)]
pub enum LineProviderError {
    #[error("input ended with {remaining} pixel locations still missing")]
    Eof { remaining: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Prompts on `prompt` and reads `"x,y"` answers from `input`.
///
/// Malformed answers are reported and asked again.
pub struct LinePointProvider<R, W> {
    input: R,
    prompt: W,
}

impl<R: BufRead, W: Write> LinePointProvider<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self { input, prompt }
    }

    fn ask(
        &mut self,
        target: Point2<f64>,
        remaining: usize,
        image: &GrayImageView<'_>,
    ) -> Result<Point2<f64>, LineProviderError> {
        let mut line = String::new();
        loop {
            write!(
                self.prompt,
                "pixel location of {},{} in {}x{} image ({} left) as x,y: ",
                target.x, target.y, image.width, image.height, remaining
            )?;
            self.prompt.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(LineProviderError::Eof { remaining });
            }
            match parse_point(line.trim()) {
                Ok(p) => return Ok(p),
                Err(e) => {
                    warn!("{e}");
                    writeln!(self.prompt, "{e}")?;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> PixelPointProvider for LinePointProvider<R, W> {
    fn collect_pixel_points(
        &mut self,
        missing: &[Point2<f64>],
        image: &GrayImageView<'_>,
    ) -> Result<Vec<Point2<f64>>, ProviderError> {
        let mut located = Vec::with_capacity(missing.len());
        for (i, &target) in missing.iter().enumerate() {
            let p = self.ask(target, missing.len() - i, image)?;
            info!("located {},{} at pixel {},{}", target.x, target.y, p.x, p.y);
            located.push(p);
        }
        Ok(located)
    }
}

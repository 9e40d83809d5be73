//! Correspondence points and their `"x,y"` textual form.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{CalibrationError, PointParseError};

/// Parse a point written as `"x,y"`. Whitespace around components is ignored.
pub fn parse_point(input: &str) -> Result<Point2<f64>, PointParseError> {
    let parts: Vec<&str> = input.split(',').collect();
    let [x, y] = parts.as_slice() else {
        return Err(PointParseError::Components {
            input: input.to_string(),
        });
    };
    Ok(Point2::new(
        parse_component(input, x)?,
        parse_component(input, y)?,
    ))
}

fn parse_component(input: &str, component: &str) -> Result<f64, PointParseError> {
    let v: f64 = component
        .trim()
        .parse()
        .map_err(|_| PointParseError::Number {
            input: input.to_string(),
            component: component.to_string(),
        })?;
    if !v.is_finite() {
        return Err(PointParseError::NonFinite {
            input: input.to_string(),
        });
    }
    Ok(v)
}

/// Parse a list of `"x,y"` points, stopping at the first malformed entry.
pub fn parse_points<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Point2<f64>>, PointParseError> {
    inputs.iter().map(|s| parse_point(s.as_ref())).collect()
}

/// Data-space points paired with their cv-style pixel locations.
///
/// `pixel` may be shorter than `data` while locations are still being
/// collected; [`Correspondences::is_complete`] reports whether every data
/// point has a location.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Correspondences {
    pub data: Vec<Point2<f64>>,
    pub pixel: Vec<Point2<f64>>,
}

impl Correspondences {
    /// Build a complete set; lengths must match.
    pub fn new(data: Vec<Point2<f64>>, pixel: Vec<Point2<f64>>) -> Result<Self, CalibrationError> {
        if data.len() != pixel.len() {
            return Err(CalibrationError::MismatchedCorrespondence {
                data: data.len(),
                pixel: pixel.len(),
            });
        }
        Ok(Self { data, pixel })
    }

    /// Build a possibly incomplete set, allowing fewer locations than data points.
    pub fn partial(
        data: Vec<Point2<f64>>,
        pixel: Vec<Point2<f64>>,
    ) -> Result<Self, CalibrationError> {
        if pixel.len() > data.len() {
            return Err(CalibrationError::MismatchedCorrespondence {
                data: data.len(),
                pixel: pixel.len(),
            });
        }
        Ok(Self { data, pixel })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.data.len() == self.pixel.len()
    }

    /// Data points that still lack a pixel location.
    pub fn missing(&self) -> &[Point2<f64>] {
        &self.data[self.pixel.len().min(self.data.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_points() {
        assert_eq!(parse_point("1,2").unwrap(), Point2::new(1.0, 2.0));
        assert_eq!(parse_point(" -0.5 , 3e2").unwrap(), Point2::new(-0.5, 300.0));
    }

    #[test]
    fn rejects_malformed_points() {
        assert!(matches!(
            parse_point("1"),
            Err(PointParseError::Components { .. })
        ));
        assert!(matches!(
            parse_point("1,2,3"),
            Err(PointParseError::Components { .. })
        ));
        assert!(matches!(
            parse_point("a,2"),
            Err(PointParseError::Number { .. })
        ));
        assert!(matches!(
            parse_point("inf,2"),
            Err(PointParseError::NonFinite { .. })
        ));
    }

    #[test]
    fn partial_sets_report_missing_points() {
        let data = parse_points(&["0,0", "1,0", "0,1"]).unwrap();
        let pixel = parse_points(&["10,90"]).unwrap();
        let c = Correspondences::partial(data, pixel).unwrap();
        assert!(!c.is_complete());
        assert_eq!(c.missing(), &[Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)]);
    }

    #[test]
    fn complete_sets_require_equal_lengths() {
        let data = parse_points(&["0,0", "1,1"]).unwrap();
        let pixel = parse_points(&["0,0"]).unwrap();
        assert_eq!(
            Correspondences::new(data, pixel),
            Err(CalibrationError::MismatchedCorrespondence { data: 2, pixel: 1 })
        );
    }
}

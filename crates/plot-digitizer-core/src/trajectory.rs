//! Reduce foreground pixels to one ordered sample per image column.

use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{AffineTransform, GrayImage, GrayImageView};

/// One reconstructed sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Position in data coordinates.
    pub data: Point2<f64>,
    /// Image column the sample came from.
    pub column: usize,
    /// Representative (median) row of that column, cv convention.
    pub row: usize,
}

/// Samples sorted by ascending data x, at most one per pixel column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Data-space `(x, y)` pairs in trajectory order.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.data.x, p.data.y)).collect()
    }
}

/// Rows holding `level`, grouped by column. Each row list is ascending.
pub fn foreground_columns(image: &GrayImageView<'_>, level: u8) -> BTreeMap<usize, Vec<usize>> {
    let mut columns: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for y in 0..image.height {
        for (x, &v) in image.row(y).iter().enumerate() {
            if v == level {
                columns.entry(x).or_default().push(y);
            }
        }
    }
    columns
}

/// Lower median of an ascending slice; always one of its elements.
pub fn median_row(rows: &[usize]) -> Option<usize> {
    if rows.is_empty() {
        return None;
    }
    Some(rows[(rows.len() - 1) / 2])
}

/// Extract the curve traced by `foreground` pixels in `masked`.
///
/// Columns without a foreground pixel contribute nothing. The result is
/// sorted by data x; equal x values keep column order.
pub fn extract_trajectory(
    masked: &GrayImageView<'_>,
    foreground: u8,
    transform: &AffineTransform,
) -> Trajectory {
    let mut points: Vec<TrajectoryPoint> = foreground_columns(masked, foreground)
        .into_iter()
        .filter_map(|(column, rows)| {
            let row = median_row(&rows)?;
            let data = transform.to_data(Point2::new(column as f64, row as f64), masked.height);
            Some(TrajectoryPoint { data, column, row })
        })
        .collect();

    // Stable sort: ties stay in column order.
    points.sort_by(|a, b| a.data.x.total_cmp(&b.data.x));
    Trajectory { points }
}

/// Debug raster: `masked` stacked above a black canvas with a ring of radius 2
/// drawn around each trajectory sample.
pub fn render_overlay(masked: &GrayImageView<'_>, trajectory: &Trajectory) -> GrayImage {
    let mut marks = GrayImage::filled(masked.width, masked.height, 0);
    for p in &trajectory.points {
        draw_ring(&mut marks, p.column as i64, p.row as i64, 2, 255);
    }
    let mut out = masked.to_owned_image();
    out.height += marks.height;
    out.data.extend_from_slice(&marks.data);
    out
}

fn draw_ring(img: &mut GrayImage, cx: i64, cy: i64, r: i64, v: u8) {
    // Midpoint circle.
    let (mut x, mut y, mut err) = (r, 0i64, 1 - r);
    while x >= y {
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            img.put_clipped(cx + dx, cy + dy, v);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn identity(height: usize) -> (AffineTransform, usize) {
        (AffineTransform::new([1.0, 1.0], [0.0, 0.0]), height)
    }

    #[test]
    fn median_resists_outlier_rows() {
        assert_eq!(median_row(&[10, 11, 12, 100]), Some(11));
        assert_eq!(median_row(&[4, 5, 9]), Some(5));
        assert_eq!(median_row(&[]), None);
    }

    #[test]
    fn groups_rows_by_column() {
        let mut img = GrayImage::filled(4, 5, 255);
        img.set(1, 0, 0);
        img.set(1, 3, 0);
        img.set(3, 2, 0);
        let cols = foreground_columns(&img.view(), 0);
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[&1], vec![0, 3]);
        assert_eq!(cols[&3], vec![2]);
    }

    #[test]
    fn one_sample_per_populated_column() {
        let (t, h) = identity(10);
        let mut img = GrayImage::filled(6, h, 255);
        for y in [2, 3, 4] {
            img.set(0, y, 0);
        }
        img.set(4, 7, 0);

        let traj = extract_trajectory(&img.view(), 0, &t);
        assert_eq!(traj.len(), 2);
        assert_eq!((traj.points[0].column, traj.points[0].row), (0, 3));
        assert_abs_diff_eq!(traj.points[0].data.y, 7.0);
        assert_eq!((traj.points[1].column, traj.points[1].row), (4, 7));
        assert_abs_diff_eq!(traj.points[1].data.x, 4.0);
        assert_abs_diff_eq!(traj.points[1].data.y, 3.0);
    }

    #[test]
    fn reversed_x_axis_is_sorted_by_data_x() {
        let t = AffineTransform::new([-1.0, 1.0], [9.0, 0.0]);
        let mut img = GrayImage::filled(10, 4, 255);
        img.set(1, 1, 0);
        img.set(8, 2, 0);

        let traj = extract_trajectory(&img.view(), 0, &t);
        let xs: Vec<f64> = traj.points.iter().map(|p| p.data.x).collect();
        assert_eq!(xs, vec![1.0, 8.0]);
        assert_eq!(traj.points[0].column, 8);
    }

    #[test]
    fn no_foreground_gives_empty_trajectory() {
        let (t, h) = identity(8);
        let img = GrayImage::filled(8, h, 255);
        assert!(extract_trajectory(&img.view(), 0, &t).is_empty());
    }

    #[test]
    fn overlay_stacks_marks_below_image() {
        let (t, h) = identity(8);
        let mut img = GrayImage::filled(8, h, 200);
        img.set(4, 4, 0);
        let traj = extract_trajectory(&img.view(), 0, &t);

        let overlay = render_overlay(&img.view(), &traj);
        assert_eq!(overlay.height, 2 * h);
        assert_eq!(overlay.get(4, 4), 0);
        assert_eq!(overlay.get(6, h + 4), 255);
        assert_eq!(overlay.get(4, h + 2), 255);
        assert_eq!(overlay.get(4, h + 4), 0);
    }
}

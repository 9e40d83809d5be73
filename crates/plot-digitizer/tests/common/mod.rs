#![allow(dead_code)]

use image::{GrayImage, Luma};

pub const WIDTH: u32 = 400;
pub const HEIGHT: u32 = 300;
/// Pixel column / row of the data origin.
pub const ORIGIN_COL: u32 = 30;
pub const ORIGIN_ROW: u32 = 260;
/// Pixels per data unit.
pub const PX_PER_X: f64 = 37.0;
pub const PX_PER_Y: f64 = 240.0;

pub const AXIS_LEVEL: u8 = 0;
pub const CURVE_LEVEL: u8 = 40;

pub const POINTS: [&str; 3] = ["0,0", "5,0", "0,1"];
pub const LOCATIONS: [&str; 3] = ["30,260", "215,260", "30,20"];

pub fn curve(x: f64) -> f64 {
    0.05 * x + 0.2
}

/// White plot with black axes just outside the data area and a three pixel
/// thick gray curve `y = 0.05 x + 0.2`.
pub fn synthetic_plot() -> GrayImage {
    let mut img = GrayImage::from_pixel(WIDTH, HEIGHT, Luma([255]));
    for x in 0..WIDTH {
        img.put_pixel(x, ORIGIN_ROW, Luma([AXIS_LEVEL]));
    }
    for y in 0..=ORIGIN_ROW {
        img.put_pixel(ORIGIN_COL - 1, y, Luma([AXIS_LEVEL]));
    }
    for col in ORIGIN_COL..WIDTH {
        let x = (col - ORIGIN_COL) as f64 / PX_PER_X;
        let row = (ORIGIN_ROW as f64 - PX_PER_Y * curve(x)).round() as u32;
        for r in row - 1..=row + 1 {
            img.put_pixel(col, r, Luma([CURVE_LEVEL]));
        }
    }
    img
}

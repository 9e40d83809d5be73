mod common;

use approx::assert_abs_diff_eq;
use common::*;
use plot_digitizer::core::{parse_points, AxisMask, Correspondences, DigitizerParams};
use plot_digitizer::{
    digitize_image, digitize_image_with_debug, load_gray, DigitizeConfig, DirDebugSink,
};

fn correspondences() -> Correspondences {
    Correspondences::new(
        parse_points(&POINTS).unwrap(),
        parse_points(&LOCATIONS).unwrap(),
    )
    .unwrap()
}

#[test]
fn recovers_linear_curve_from_synthetic_plot() {
    let img = synthetic_plot();
    let result = digitize_image(&img, &correspondences(), DigitizerParams::default()).unwrap();

    assert_abs_diff_eq!(result.transform.scale[0], PX_PER_X, epsilon = 1e-9);
    assert_abs_diff_eq!(result.transform.scale[1], PX_PER_Y, epsilon = 1e-9);
    assert_eq!(result.intensities.background, 255);
    assert_eq!(result.intensities.foreground, CURVE_LEVEL);
    assert_eq!(
        result.mask,
        AxisMask {
            rows: (HEIGHT - ORIGIN_ROW) as usize,
            cols: ORIGIN_COL as usize
        }
    );

    let pts = result.trajectory.xy();
    assert_eq!(pts.len(), (WIDTH - ORIGIN_COL) as usize);
    for w in pts.windows(2) {
        assert!(w[1].0 > w[0].0);
    }
    for (x, y) in pts {
        assert!(
            (y - curve(x)).abs() <= 0.5 / PX_PER_Y + 1e-9,
            "({x}, {y}) is off the curve"
        );
    }
}

#[test]
fn axes_dominate_without_masking() {
    let img = synthetic_plot();
    let params = DigitizerParams {
        foreground: Some(AXIS_LEVEL),
        mask_axes: false,
        ..DigitizerParams::default()
    };
    let result = digitize_image(&img, &correspondences(), params).unwrap();
    // Every column crosses the x axis lines, so each one yields a sample.
    assert_eq!(result.trajectory.len(), WIDTH as usize);
}

#[test]
fn debug_dir_receives_checkpoints() {
    let dir = tempfile::tempdir().unwrap();
    let img = synthetic_plot();
    let mut sink = DirDebugSink::new(dir.path().join("debug"));

    digitize_image_with_debug(
        &img,
        &correspondences(),
        DigitizerParams::default(),
        &mut sink,
    )
    .unwrap();

    for name in ["original", "masked"] {
        let saved = load_gray(sink.path_for(name)).unwrap();
        assert_eq!(saved.dimensions(), (WIDTH, HEIGHT));
    }
    let original = load_gray(sink.path_for("original")).unwrap();
    assert_eq!(original, img);

    let masked = load_gray(sink.path_for("masked")).unwrap();
    assert_eq!(masked.get_pixel(ORIGIN_COL - 1, 10).0, [255]);

    let overlay = load_gray(sink.path_for("final")).unwrap();
    assert_eq!(overlay.dimensions(), (WIDTH, 2 * HEIGHT));
}

#[test]
fn config_file_drives_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("plot.png");
    synthetic_plot().save(&image_path).unwrap();

    let cfg = DigitizeConfig {
        image_path: image_path.to_string_lossy().into_owned(),
        points: POINTS.iter().map(|s| s.to_string()).collect(),
        locations: LOCATIONS.iter().map(|s| s.to_string()).collect(),
        ..DigitizeConfig::default()
    };
    let cfg_path = dir.path().join("config.json");
    cfg.write_json(&cfg_path).unwrap();

    let loaded = DigitizeConfig::load_json(&cfg_path).unwrap();
    let img = load_gray(&loaded.image_path).unwrap();
    let result = digitize_image(&img, &loaded.correspondences().unwrap(), loaded.params).unwrap();
    assert_eq!(result.trajectory.len(), (WIDTH - ORIGIN_COL) as usize);
}

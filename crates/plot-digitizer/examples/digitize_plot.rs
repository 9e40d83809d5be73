use plot_digitizer::core::{parse_points, Correspondences, DigitizerParams};
use plot_digitizer::{digitize_image, load_gray};

#[cfg(feature = "tracing")]
use plot_digitizer::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(log::LevelFilter::Info);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 5 || args.len() % 2 == 0 {
        eprintln!("Usage: digitize_plot <image_path> <x,y> <col,row> <x,y> <col,row> [...]");
        return Ok(());
    }

    let img = load_gray(&args[0])?;
    let data: Vec<&String> = args[1..].iter().step_by(2).collect();
    let pixel: Vec<&String> = args[2..].iter().step_by(2).collect();
    let correspondences = Correspondences::new(parse_points(&data)?, parse_points(&pixel)?)?;

    let result = digitize_image(&img, &correspondences, DigitizerParams::default())?;
    println!(
        "background {} foreground {}, {} samples",
        result.intensities.background,
        result.intensities.foreground,
        result.trajectory.len()
    );
    for (x, y) in result.trajectory.xy().into_iter().take(10) {
        println!("{x:.4},{y:.4}");
    }
    Ok(())
}

use hsvlab::processing::steps::*;
use hsvlab::{IntensityThreshold, Pipeline, io};
use std::env;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image_path>", args[0]);
        std::process::exit(1);
    }

    let img = io::load(Path::new(&args[1]))?;
    println!("Loaded image: {}x{}", img.width(), img.height());

    // Example 1: default threshold, then reconstruction
    println!("\n=== Segment + Reconstruct ===");
    let standard = Pipeline::new()
        .with_verbose(true)
        .add_step_boxed(Box::new(IntensitySegmentationStep {
            threshold: IntensityThreshold::default(),
        }))
        .add_step_boxed(Box::new(ReconstructionStep::default()));

    let data = standard.run(img.clone())?;
    println!(
        "Kept {} pixels ({:.1}%), degenerate: {}",
        data.get_int("selected_pixels").unwrap_or(0),
        data.get_float("selected_fraction").unwrap_or(0.0) * 100.0,
        data.get_bool("degenerate").unwrap_or(false)
    );
    data.image.save(Path::new("reconstructed.png"))?;

    // Example 2: sweep thresholds without reconstruction
    println!("\n=== Threshold Sweep ===");
    for t in [0u8, 64, 128, 192, 255] {
        let sweep = Pipeline::new().add_step_boxed(Box::new(IntensitySegmentationStep {
            threshold: IntensityThreshold::new(t),
        }));
        let data = sweep.run(img.clone())?;
        println!("  threshold {:>3}: {} pixels kept", t, data.get_int("selected_pixels").unwrap_or(0));
    }

    // Example 3: stop after the first step (partial execution for debugging)
    println!("\n=== Partial Pipeline (Stop After Segmentation) ===");
    let partial = standard.run_partial(img, 1)?;
    partial.image.save(Path::new("segmented.png"))?;
    println!("Saved segmented.png");

    Ok(())
}

use clap::Parser;
use std::path::PathBuf;

use hsvlab::pipeline::prepare_debug_dir;
use hsvlab::processing::steps::*;
use hsvlab::{Command, CommandOutput, IntensityThreshold, Pipeline, ProcessingConfig, Session, io};

#[derive(Parser)]
#[command(name = "hsvlab")]
#[command(about = "HSV conversion, intensity segmentation and inpainting reconstruction")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Convert the image to HSV
    #[arg(long)]
    hsv: bool,

    /// Segment the image by intensity
    #[arg(long)]
    segment: bool,

    /// Intensity threshold for segmentation
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u8))]
    threshold: u8,

    /// Reconstruct the segmented image by inpainting (requires --segment)
    #[arg(long)]
    reconstruct: bool,

    /// Inpainting neighbourhood radius
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=100))]
    radius: u32,

    /// Directory receiving the result images
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out: PathBuf,

    /// Save every intermediate step below DIR/hsv and DIR/segmentation (DIR must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .init();

    if args.reconstruct && !args.segment {
        return Err(anyhow::anyhow!(
            "--reconstruct works on the segmented image; pass --segment as well"
        ));
    }

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }
    let image = io::load(&args.image_path)?;
    if args.verbose {
        println!("Image loaded: {}x{}\n", image.width(), image.height());
    }

    let config = ProcessingConfig::default()
        .with_threshold(IntensityThreshold::new(args.threshold))
        .with_inpaint_radius(args.radius);

    if let Some(debug_dir) = &args.debug_out {
        run_debug_pipeline(&args, &config, image.clone(), debug_dir.clone())?;
    }

    std::fs::create_dir_all(&args.out)?;
    let mut session = Session::with_config(image, config);

    let mut commands = Vec::new();
    if args.hsv {
        commands.push(Command::ConvertToHsv);
    }
    if args.segment {
        commands.push(Command::Segment {
            threshold: config.threshold,
        });
    }
    if args.reconstruct {
        commands.push(Command::Reconstruct);
    }

    if commands.is_empty() {
        println!("Nothing to do: pass --hsv, --segment and/or --reconstruct");
        return Ok(());
    }

    for command in commands {
        if args.verbose {
            println!("Running {:?}...", command);
        }
        match session.dispatch(command)? {
            CommandOutput::Hsv(hsv) => {
                let path = args.out.join("hsv.png");
                io::save_hsv(&hsv, &path)?;
                println!("HSV image: {}", path.display());
            }
            CommandOutput::Segmented(segmented) => {
                let path = args.out.join("segmented.png");
                io::save_raster(&segmented, &path)?;
                println!(
                    "Segmented image ({} of {} pixels kept): {}",
                    segmented.count_non_black(),
                    segmented.width() as usize * segmented.height() as usize,
                    path.display()
                );
            }
            CommandOutput::Reconstructed(result) => {
                if let Some(warning) = result.warning {
                    eprintln!("Warning: {}", warning);
                }
                let path = args.out.join("reconstructed.png");
                io::save_raster(&result.image, &path)?;
                println!("Reconstructed image: {}", path.display());
            }
        }
    }

    Ok(())
}

fn run_debug_pipeline(
    args: &Cli,
    config: &ProcessingConfig,
    image: hsvlab::RasterImage,
    debug_dir: PathBuf,
) -> anyhow::Result<()> {
    // Sub-runs write below `hsv/` and `segmentation/`
    prepare_debug_dir(&debug_dir)?;
    let mut pipeline = Pipeline::new().with_verbose(args.verbose);
    if args.hsv {
        // HSV is a dead end for the later steps, so it gets its own run
        let hsv_pipeline = Pipeline::new()
            .with_verbose(args.verbose)
            .with_debug(debug_dir.join("hsv"))?
            .add_step_boxed(Box::new(HsvConversionStep));
        hsv_pipeline.run(image.clone())?;
    }
    if args.segment {
        pipeline = pipeline.add_step_boxed(Box::new(IntensitySegmentationStep {
            threshold: config.threshold,
        }));
    }
    if args.reconstruct {
        pipeline = pipeline.add_step_boxed(Box::new(ReconstructionStep {
            radius: config.inpaint_radius,
        }));
    }
    if pipeline.is_empty() {
        return Ok(());
    }

    let pipeline = pipeline.with_debug(debug_dir.join("segmentation"))?;
    pipeline.run(image)?;
    if args.verbose {
        println!("Debug outputs saved to: {}/\n", debug_dir.display());
    }
    Ok(())
}

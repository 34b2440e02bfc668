//! Composable pipeline and debug output.

mod common;

use hsvlab::pipeline::{prepare_debug_dir, step_dir_name};
use hsvlab::processing::build_standard_pipeline;
use hsvlab::processing::steps::*;
use hsvlab::{Pipeline, PipelineImage, ProcessingConfig, convert_to_hsv, reconstruct_from_edge_map, segment_by_intensity};

use common::*;

#[test]
fn test_standard_pipeline_matches_direct_calls() -> anyhow::Result<()> {
    let image = gradient_image(24, 6);
    let config = ProcessingConfig::default();

    let data = build_standard_pipeline(&config, false).run(image.clone())?;

    let segmented = segment_by_intensity(&image, config.threshold);
    let expected = reconstruct_from_edge_map(&segmented);
    assert_eq!(data.image, PipelineImage::Bgr(expected.image));
    assert_eq!(data.get_int("threshold"), Some(100));
    assert_eq!(data.get_int("selected_pixels"), Some(segmented.count_non_black() as i64));
    assert_eq!(data.get_bool("degenerate"), Some(false));
    let fraction = data.get_float("selected_fraction").expect("segmentation records its fraction");
    let expected_fraction = segmented.count_non_black() as f32 / (24.0 * 6.0);
    assert!((fraction - expected_fraction).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_run_partial_stops_early() -> anyhow::Result<()> {
    let image = gradient_image(24, 6);
    let pipeline = build_standard_pipeline(&ProcessingConfig::default(), false);

    let data = pipeline.run_partial(image.clone(), 1)?;

    assert_eq!(
        data.image,
        PipelineImage::Bgr(segment_by_intensity(&image, IntensityThreshold::default()))
    );
    assert_eq!(data.get_bool("degenerate"), None);
    Ok(())
}

#[test]
fn test_hsv_step_output_rejected_by_segmentation() {
    let pipeline = Pipeline::new()
        .add_step_boxed(Box::new(HsvConversionStep))
        .add_step_boxed(Box::new(IntensitySegmentationStep {
            threshold: IntensityThreshold::default(),
        }));

    let err = pipeline
        .run(gradient_image(4, 4))
        .expect_err("segmentation must refuse an HSV image");

    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::UnexpectedColorSpace { expected: "BGR", .. })
    ));
}

#[test]
fn test_hsv_step() -> anyhow::Result<()> {
    let image = gradient_image(5, 3);
    let pipeline = Pipeline::new().add_step_boxed(Box::new(HsvConversionStep));

    let data = pipeline.run(image.clone())?;

    assert_eq!(data.image.as_hsv(), Some(&convert_to_hsv(&image)));
    assert!(data.image.as_bgr().is_none());
    Ok(())
}

#[test]
fn test_debug_output_layout() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let debug_dir = dir.path().join("debug");

    let pipeline = Pipeline::new()
        .with_debug(debug_dir.clone())?
        .add_step_boxed(Box::new(IntensitySegmentationStep {
            threshold: IntensityThreshold::new(50),
        }))
        .add_step_boxed(Box::new(ReconstructionStep::default()));
    pipeline.run(gradient_image(12, 6))?;

    assert!(debug_dir.join("00_input/01.png").is_file());
    assert!(debug_dir.join("01_intensity_segmentation/01.png").is_file());
    assert!(debug_dir.join("02_reconstruction/01.png").is_file());
    Ok(())
}

#[test]
fn test_debug_dir_must_be_empty() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    std::fs::write(dir.path().join("leftover.txt"), b"x")?;

    let result = Pipeline::new().with_debug(dir.path().to_path_buf());

    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_step_dir_name() {
    assert_eq!(step_dir_name(0, "HSV Conversion"), "01_hsv_conversion");
    assert_eq!(step_dir_name(11, "Reconstruction"), "12_reconstruction");
}

#[test]
fn test_prepare_debug_dir() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;

    // Missing directories are created, empty ones accepted
    let fresh = dir.path().join("fresh");
    prepare_debug_dir(&fresh)?;
    assert!(fresh.is_dir());
    prepare_debug_dir(&fresh)?;

    // A root holding a previous run is refused even though its sub-runs would be new
    std::fs::create_dir_all(fresh.join("segmentation"))?;
    assert!(prepare_debug_dir(&fresh).is_err());
    Ok(())
}

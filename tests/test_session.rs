//! Command dispatch against an uploaded image.

mod common;

use hsvlab::{ProcessingConfig, convert_to_hsv, reconstruct_from_edge_map, segment_by_intensity};

use common::*;

#[test]
fn test_reconstruct_before_segment_is_a_usage_error() {
    let mut session = Session::new(gradient_image(8, 6));

    let result = session.dispatch(Command::Reconstruct);

    assert!(matches!(result, Err(PipelineError::MissingSegmentation)));
    assert!(session.last_segmentation().is_none());
}

#[test]
fn test_hsv_command_does_not_feed_reconstruction() -> anyhow::Result<()> {
    let image = gradient_image(8, 6);
    let mut session = Session::new(image.clone());

    let output = session.dispatch(Command::ConvertToHsv)?;

    assert_eq!(output, CommandOutput::Hsv(convert_to_hsv(&image)));
    assert!(matches!(
        session.dispatch(Command::Reconstruct),
        Err(PipelineError::MissingSegmentation)
    ));
    Ok(())
}

#[test]
fn test_reconstruct_uses_last_segmentation() -> anyhow::Result<()> {
    let image = gradient_image(16, 6);
    let mut session = Session::new(image.clone());

    session.dispatch(Command::Segment {
        threshold: IntensityThreshold::new(30),
    })?;
    let output = session.dispatch(Command::Segment {
        threshold: IntensityThreshold::new(120),
    })?;

    let expected = segment_by_intensity(&image, IntensityThreshold::new(120));
    assert_eq!(output, CommandOutput::Segmented(expected.clone()));
    assert_eq!(session.last_segmentation(), Some(&expected));

    let CommandOutput::Reconstructed(result) = session.dispatch(Command::Reconstruct)? else {
        panic!("Reconstruct must produce a reconstruction");
    };
    assert_eq!(result, reconstruct_from_edge_map(&expected));
    assert_eq!(result.image.dimensions(), image.dimensions());

    // The uploaded image is never replaced
    assert_eq!(session.image(), &image);
    Ok(())
}

#[test]
fn test_degenerate_segmentation_is_reported() -> anyhow::Result<()> {
    let mut session = Session::new(uniform_image(4, 4, BGR_MID_GRAY));

    session.dispatch(Command::Segment {
        threshold: IntensityThreshold::MAX,
    })?;
    let output = session.dispatch(Command::Reconstruct)?;

    match output {
        CommandOutput::Reconstructed(result) => {
            assert_eq!(result.warning, Some(PipelineWarning::DegenerateInput));
        }
        other => panic!("unexpected output {:?}", other),
    }
    Ok(())
}

#[test]
fn test_config_defaults() {
    let session = Session::new(uniform_image(1, 1, BGR_RED));
    assert_eq!(session.config(), &ProcessingConfig::default());
    assert_eq!(session.config().threshold, IntensityThreshold::new(100));
    assert_eq!(session.config().inpaint_radius, 3);
    assert_eq!(ProcessingConfig::default().with_inpaint_radius(0).inpaint_radius, 1);
    assert_eq!(
        ProcessingConfig::default().with_inpaint_radius(u32::MAX).inpaint_radius,
        100
    );
}

use anyhow::Result;

use crate::error::PipelineError;
use crate::models::{IntensityThreshold, RasterImage};
use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineImage, PipelineStep};
use crate::processing::{color, inpaint, segmentation};

fn expect_bgr<'a>(data: &'a PipelineData, step: &dyn PipelineStep) -> Result<&'a RasterImage> {
    data.image.as_bgr().ok_or_else(|| {
        PipelineError::UnexpectedColorSpace {
            step: step.name().to_string(),
            expected: "BGR",
        }
        .into()
    })
}

/// Convert BGR to HSV
pub struct HsvConversionStep;

impl PipelineStep for HsvConversionStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let hsv = color::convert_to_hsv(expect_bgr(&data, self)?);
        Ok(data.with_image(PipelineImage::Hsv(hsv)))
    }

    fn name(&self) -> &str {
        "HSV Conversion"
    }
}

/// Black out pixels whose value is at or below the threshold
pub struct IntensitySegmentationStep {
    pub threshold: IntensityThreshold,
}

impl PipelineStep for IntensitySegmentationStep {
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData> {
        let image = expect_bgr(&data, self)?;
        let mask = segmentation::intensity_mask(image, self.threshold);
        let selected = mask.count_selected();
        let total = image.width() as usize * image.height() as usize;
        let segmented = segmentation::apply_mask(image, &mask);

        if context.verbose {
            println!("  → kept {} pixels above {}", selected, self.threshold);
        }

        Ok(data
            .with_image(PipelineImage::Bgr(segmented))
            .with_metadata("threshold", MetadataValue::Int(i64::from(self.threshold.value())))
            .with_metadata("selected_pixels", MetadataValue::Int(selected as i64))
            .with_metadata(
                "selected_fraction",
                MetadataValue::Float(selected as f32 / total as f32),
            ))
    }

    fn name(&self) -> &str {
        "Intensity Segmentation"
    }
}

/// Inpaint the black pixels of the incoming image from its non-black ones
pub struct ReconstructionStep {
    pub radius: u32,
}

impl Default for ReconstructionStep {
    fn default() -> Self {
        Self {
            radius: inpaint::DEFAULT_INPAINT_RADIUS,
        }
    }
}

impl PipelineStep for ReconstructionStep {
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData> {
        let result = inpaint::reconstruct_with_radius(expect_bgr(&data, self)?, self.radius);
        let degenerate = result.is_degenerate();

        if context.verbose {
            if let Some(warning) = result.warning {
                println!("  Warning: {}", warning);
            }
        }

        Ok(data
            .with_image(PipelineImage::Bgr(result.image))
            .with_metadata("degenerate", MetadataValue::Bool(degenerate)))
    }

    fn name(&self) -> &str {
        "Reconstruction"
    }
}

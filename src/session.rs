//! User-triggered commands against one uploaded image.
//!
//! Each button of an interactive front end maps to a [`Command`]. The
//! session keeps the uploaded image and the most recent segmentation, which
//! is what reconstruction runs on.

use crate::config::ProcessingConfig;
use crate::error::{PipelineError, Result};
use crate::models::{HsvImage, IntensityThreshold, RasterImage};
use crate::processing::{ImagePipeline, Reconstruction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ConvertToHsv,
    Segment { threshold: IntensityThreshold },
    Reconstruct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Hsv(HsvImage),
    Segmented(RasterImage),
    Reconstructed(Reconstruction),
}

#[derive(Debug, Clone)]
pub struct Session {
    image: RasterImage,
    last_segmentation: Option<RasterImage>,
    pipeline: ImagePipeline,
}

impl Session {
    pub fn new(image: RasterImage) -> Self {
        Self::with_config(image, ProcessingConfig::default())
    }

    pub fn with_config(image: RasterImage, config: ProcessingConfig) -> Self {
        Self {
            image,
            last_segmentation: None,
            pipeline: ImagePipeline::new(config),
        }
    }

    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    pub fn last_segmentation(&self) -> Option<&RasterImage> {
        self.last_segmentation.as_ref()
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.pipeline.config
    }

    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutput> {
        match command {
            Command::ConvertToHsv => Ok(CommandOutput::Hsv(self.pipeline.convert_to_hsv(&self.image))),
            Command::Segment { threshold } => {
                let segmented = self.pipeline.segment(&self.image, threshold);
                self.last_segmentation = Some(segmented.clone());
                Ok(CommandOutput::Segmented(segmented))
            }
            Command::Reconstruct => {
                let edge_map = self
                    .last_segmentation
                    .as_ref()
                    .ok_or(PipelineError::MissingSegmentation)?;
                Ok(CommandOutput::Reconstructed(self.pipeline.reconstruct(edge_map)))
            }
        }
    }
}

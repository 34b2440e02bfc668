pub mod color;
pub mod inpaint;
pub mod segmentation;
pub mod steps;

pub use color::convert_to_hsv;
pub use inpaint::{Reconstruction, reconstruct_from_edge_map};
pub use segmentation::segment_by_intensity;

use crate::config::ProcessingConfig;
use crate::models::{HsvImage, IntensityThreshold, RasterImage};

/// The three operations behind one value holding their tunables.
///
/// Holds no image state: every call allocates and returns a fresh image, so
/// one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagePipeline {
    pub config: ProcessingConfig,
}

impl ImagePipeline {
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    pub fn convert_to_hsv(&self, image: &RasterImage) -> HsvImage {
        color::convert_to_hsv(image)
    }

    pub fn segment(&self, image: &RasterImage, threshold: IntensityThreshold) -> RasterImage {
        segmentation::segment_by_intensity(image, threshold)
    }

    pub fn reconstruct(&self, edge_map: &RasterImage) -> Reconstruction {
        inpaint::reconstruct_with_radius(edge_map, self.config.inpaint_radius)
    }
}

/// Segmentation followed by reconstruction, as a composable pipeline
pub fn build_standard_pipeline(config: &ProcessingConfig, verbose: bool) -> crate::pipeline::Pipeline {
    use crate::pipeline::Pipeline;
    use crate::processing::steps::*;
    use std::sync::Arc;

    Pipeline::new()
        .with_verbose(verbose)
        .add_step(Arc::new(IntensitySegmentationStep {
            threshold: config.threshold,
        }))
        .add_step(Arc::new(ReconstructionStep {
            radius: config.inpaint_radius,
        }))
}

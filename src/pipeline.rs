use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::io;
use crate::models::{HsvImage, RasterImage};

/// Image carried between steps, tagged with its colour space
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineImage {
    Bgr(RasterImage),
    Hsv(HsvImage),
}

impl PipelineImage {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PipelineImage::Bgr(img) => img.dimensions(),
            PipelineImage::Hsv(img) => img.dimensions(),
        }
    }

    pub fn as_bgr(&self) -> Option<&RasterImage> {
        match self {
            PipelineImage::Bgr(img) => Some(img),
            PipelineImage::Hsv(_) => None,
        }
    }

    pub fn as_hsv(&self) -> Option<&HsvImage> {
        match self {
            PipelineImage::Hsv(img) => Some(img),
            PipelineImage::Bgr(_) => None,
        }
    }

    /// Write the image for viewing; HSV samples are written as-is.
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        match self {
            PipelineImage::Bgr(img) => io::save_raster(img, path),
            PipelineImage::Hsv(img) => io::save_hsv(img, path),
        }
    }
}

/// Data that flows through the pipeline
#[derive(Debug, Clone)]
pub struct PipelineData {
    pub image: PipelineImage,

    /// Per-step facts, e.g. "selected_pixels" after segmentation
    pub metadata: HashMap<String, MetadataValue>,
}

/// Metadata value types
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Float(f32),
    Int(i64),
}

impl PipelineData {
    pub fn from_image(image: RasterImage) -> Self {
        Self {
            image: PipelineImage::Bgr(image),
            metadata: HashMap::new(),
        }
    }

    /// Replace the image, keeping accumulated metadata
    pub fn with_image(mut self, image: PipelineImage) -> Self {
        self.image = image;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.metadata.get(key) {
            Some(MetadataValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.metadata.get(key) {
            Some(MetadataValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(v)) => Some(*v),
            _ => None,
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context available to all pipeline steps
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
}

impl PipelineContext {
    fn debug_dir(&self) -> Option<&Path> {
        self.debug.as_ref().map(|d| d.output_dir.as_path())
    }
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform one image (and its metadata) into the next
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData>;

    /// Human-readable name, also used for the debug directory
    fn name(&self) -> &str;
}

/// `"Intensity Segmentation"` at index 1 becomes `"02_intensity_segmentation"`
pub fn step_dir_name(step_idx: usize, step_name: &str) -> String {
    format!(
        "{:02}_{}",
        step_idx + 1,
        step_name.to_lowercase().replace(' ', "_")
    )
}

/// Create `dir`, or fail if it already exists with anything in it
pub fn prepare_debug_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        let entries = std::fs::read_dir(dir)?;
        if entries.count() > 0 {
            return Err(anyhow::anyhow!(
                "Debug directory is not empty: {}",
                dir.display()
            ));
        }
    } else {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.context.verbose = verbose;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        prepare_debug_dir(&output_dir)?;
        self.context.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn save_debug(&self, dir_name: &str, image: &PipelineImage) -> Result<()> {
        let Some(root) = self.context.debug_dir() else {
            return Ok(());
        };
        let step_dir = root.join(dir_name);
        std::fs::create_dir_all(&step_dir)?;
        image
            .save(&step_dir.join("01.png"))
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        if self.context.verbose {
            println!("  Debug: saved {}/01.png", dir_name);
        }
        Ok(())
    }

    /// Run every step in order on `input`
    pub fn run(&self, input: RasterImage) -> Result<PipelineData> {
        self.run_partial(input, self.steps.len())
    }

    /// Run only the first `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: RasterImage, num_steps: usize) -> Result<PipelineData> {
        let mut data = PipelineData::from_image(input);
        self.save_debug("00_input", &data.image)?;

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            if self.context.verbose {
                let (w, h) = data.image.dimensions();
                println!("Running step {}: {} ({}x{})", step_idx + 1, step.name(), w, h);
            }
            log::debug!("pipeline step {} ({})", step_idx + 1, step.name());

            data = step.process(data, &self.context)?;
            self.save_debug(&step_dir_name(step_idx, step.name()), &data.image)?;
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

//! Decoding uploads into [`RasterImage`] and encoding results for display.

use std::path::Path;

use image::ImageReader;

use crate::error::{PipelineError, Result};
use crate::models::{HsvImage, RasterImage};

/// Decode encoded bytes (PNG, JPEG, ...) into a BGR image.
///
/// The format is guessed from the content. Grayscale and alpha inputs are
/// flattened to three colour channels.
pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(bytes).map_err(|e| PipelineError::Decode(e.to_string()))?;
    RasterImage::from_dynamic(&img)
}

pub fn load(path: &Path) -> Result<RasterImage> {
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| PipelineError::Decode(format!("{}: {}", path.display(), e)))?;
    RasterImage::from_dynamic(&img)
}

/// Encode with the format implied by the file extension.
pub fn save_raster(image: &RasterImage, path: &Path) -> Result<()> {
    image
        .to_rgb()
        .save(path)
        .map_err(|e| PipelineError::Encode(format!("{}: {}", path.display(), e)))
}

pub fn save_hsv(image: &HsvImage, path: &Path) -> Result<()> {
    image
        .to_display()
        .save(path)
        .map_err(|e| PipelineError::Encode(format!("{}: {}", path.display(), e)))
}

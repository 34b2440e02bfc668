use crate::models::IntensityThreshold;
use crate::processing::inpaint::{DEFAULT_INPAINT_RADIUS, MAX_INPAINT_RADIUS};

/// Tunables shared by the session, the CLI and the standard pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub threshold: IntensityThreshold,
    pub inpaint_radius: u32,
}

impl ProcessingConfig {
    pub fn with_threshold(mut self, threshold: IntensityThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Radius is clamped to `1..=MAX_INPAINT_RADIUS`
    pub fn with_inpaint_radius(mut self, radius: u32) -> Self {
        self.inpaint_radius = radius.clamp(1, MAX_INPAINT_RADIUS);
        self
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            threshold: IntensityThreshold::default(),
            inpaint_radius: DEFAULT_INPAINT_RADIUS,
        }
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid image shape {width}x{height} with {channels} channels (expected non-empty, 3 channels)")]
    InvalidShape {
        width: u32,
        height: u32,
        channels: usize,
    },

    #[error("intensity threshold {0} is outside 0..=255")]
    ThresholdOutOfRange(i64),

    #[error("reconstruction requires a segmented image; run segmentation first")]
    MissingSegmentation,

    #[error("step '{step}' expected a {expected} image")]
    UnexpectedColorSpace {
        step: String,
        expected: &'static str,
    },

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Non-fatal conditions attached to a result instead of failing the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineWarning {
    /// Reconstruction ran on an edge map with no non-zero pixel, so the
    /// inpainting had nothing to propagate from.
    DegenerateInput,
}

impl std::fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineWarning::DegenerateInput => {
                write!(f, "edge map is entirely zero; reconstruction has no seed pixels")
            }
        }
    }
}

#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from hsvlab for tests
pub use hsvlab::{
    Command, CommandOutput, HsvImage, IntensityThreshold, Mask, PipelineError, PipelineWarning,
    RasterImage, Session,
};

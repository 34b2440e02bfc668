pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod processing;
pub mod session;

pub use config::ProcessingConfig;
pub use error::{PipelineError, PipelineWarning};
pub use models::{HsvImage, IntensityThreshold, Mask, RasterImage};
pub use pipeline::{
    DebugConfig, MetadataValue, Pipeline, PipelineContext, PipelineData, PipelineImage,
    PipelineStep,
};
pub use processing::{
    ImagePipeline, Reconstruction, convert_to_hsv, reconstruct_from_edge_map,
    segment_by_intensity,
};
pub use session::{Command, CommandOutput, Session};

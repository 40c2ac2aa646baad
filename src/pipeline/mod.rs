mod pattern;
mod scan;

pub use self::pattern::RegexPipeline;
pub use self::scan::ScanPipeline;

use crate::Pipeline;
use crate::error::PipelineError;

pub const BUILT_IN: &[&str] = &[RegexPipeline::NAME, ScanPipeline::NAME];

/// Looks up a built-in pipeline by name.
pub fn built_in(name: &str) -> Result<Box<dyn Pipeline>, PipelineError> {
    match name {
        RegexPipeline::NAME => Ok(Box::new(RegexPipeline::new())),
        ScanPipeline::NAME => Ok(Box::new(ScanPipeline::new())),
        other => Err(PipelineError::Unknown(other.to_string())),
    }
}

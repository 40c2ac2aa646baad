use std::path::PathBuf;
use thiserror::Error;

/// The corpus file is missing, unreadable or not the expected shape.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corpus entry {key} is not a string")]
    NotAString { key: String },

    #[error("corpus must be a JSON array or object of strings")]
    UnexpectedShape,
}

/// A pipeline failed while processing a sample.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline '{pipeline}' failed on sample {sample}: {source}")]
    Failed {
        pipeline: String,
        sample: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("pipeline '{pipeline}' failed during warm-up: {source}")]
    Warmup {
        pipeline: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("at least one timed trial is required")]
    NoTrials,

    #[error("unknown pipeline '{0}'")]
    Unknown(String),

    #[error(transparent)]
    Annotate(Box<dyn std::error::Error + Send + Sync>),
}

impl PipelineError {
    /// Wraps any error raised by a pipeline callable, keeping its type.
    pub fn annotate(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        PipelineError::Annotate(err.into())
    }

    /// The callable's own error when this wraps one, otherwise `self` boxed.
    pub fn into_source(self) -> Box<dyn std::error::Error + Send + Sync> {
        match self {
            PipelineError::Annotate(inner) => inner,
            other => Box::new(other),
        }
    }
}

/// The regression preconditions do not hold.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("{what} at index {index} is not positive ({value}); log10 is undefined")]
    NonPositive {
        what: &'static str,
        index: usize,
        value: f64,
    },

    #[error("{what} at index {index} is not finite ({value})")]
    NonFinite {
        what: &'static str,
        index: usize,
        value: f64,
    },

    #[error("sizes and durations differ in length ({sizes} vs {durations})")]
    LengthMismatch { sizes: usize, durations: usize },

    #[error("at least two distinct sizes are required, got {distinct}")]
    Underdetermined { distinct: usize },
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type Result<T, E = BenchError> = std::result::Result<T, E>;

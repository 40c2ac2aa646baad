pub mod annotation;
pub mod corpus;
pub mod error;
pub mod fit;
pub mod pipeline;
pub mod plot;
pub mod runner;
pub mod timing;

#[cfg(feature = "python")]
pub mod python;

pub use error::{BenchError, DataError, DomainError, PipelineError};

use serde::Serialize;
use std::hint::black_box;

/// One text subset of the corpus. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSample {
    text: String,
    length: usize,
}

impl TextSample {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self { text, length }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character count, not bytes.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Best-of-N wall-clock time of one pipeline on one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingResult {
    pub pipeline_name: String,
    pub sample_length: usize,
    pub elapsed_seconds: f64,
    /// Every timed trial, in execution order.
    pub trials: Vec<f64>,
}

/// A text-processing procedure timed as an opaque unit.
///
/// Implementations do the full amount of work on every call and discard the
/// result; the runner only observes latency and failure.
pub trait Pipeline {
    fn name(&self) -> &str;

    fn run(&self, text: &str) -> Result<(), PipelineError>;
}

/// Adapts any `Fn(&str) -> Result<T, E>` into a [`Pipeline`].
pub struct FnPipeline<F> {
    name: String,
    func: F,
}

impl<F> FnPipeline<F> {
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F, T, E> Pipeline for FnPipeline<F>
where
    F: Fn(&str) -> Result<T, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, text: &str) -> Result<(), PipelineError> {
        let output = (self.func)(text).map_err(PipelineError::annotate)?;
        black_box(output);
        Ok(())
    }
}

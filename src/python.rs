use crate::corpus;
use crate::error::{DataError, DomainError, PipelineError};
use crate::fit;
use crate::runner::{BenchConfig, run_benchmark};
use crate::{Pipeline, TextSample};
use log::info;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::path::PathBuf;

/// A Python callable `str -> object` timed as a pipeline.
struct PyPipeline<'py> {
    name: String,
    callable: Bound<'py, PyAny>,
}

impl Pipeline for PyPipeline<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, text: &str) -> Result<(), PipelineError> {
        self.callable
            .call1((text,))
            .map(drop)
            .map_err(PipelineError::annotate)
    }
}

fn data_err(e: DataError) -> PyErr {
    match e {
        DataError::Io { .. } => PyIOError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn domain_err(e: DomainError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Re-raises the callable's own exception when there is one.
fn pipeline_err(e: PipelineError) -> PyErr {
    let message = e.to_string();
    match e {
        PipelineError::Failed { source, .. } | PipelineError::Warmup { source, .. } => {
            match source.downcast::<PyErr>() {
                Ok(original) => *original,
                Err(_) => PyRuntimeError::new_err(message),
            }
        }
        _ => PyRuntimeError::new_err(message),
    }
}

/// Routes Rust `log` records to Python's `logging`.
#[pyfunction]
fn init_logging() {
    let _ = pyo3_log::try_init();
}

#[pyfunction]
fn load_corpus(path: PathBuf) -> PyResult<Vec<String>> {
    let corpus = corpus::load_corpus(&path).map_err(data_err)?;
    Ok(corpus
        .into_samples()
        .into_iter()
        .map(|s| s.text().to_string())
        .collect())
}

/// Returns `(slope, intercept, r_squared)`.
#[pyfunction]
fn fit_log_log(sizes: Vec<f64>, durations: Vec<f64>) -> PyResult<(f64, f64, f64)> {
    let fit = fit::fit_log_log(&sizes, &durations).map_err(domain_err)?;
    Ok((fit.slope, fit.intercept, fit.r_squared))
}

/// Times each `{name: callable}` on every sample, best of `trials`.
///
/// Returns `(pipeline_name, sample_length, elapsed_seconds)` tuples.
#[pyfunction]
#[pyo3(signature = (samples, pipelines, trials = 3, warmup = 0))]
fn benchmark(
    samples: Vec<String>,
    pipelines: &Bound<'_, PyDict>,
    trials: usize,
    warmup: usize,
) -> PyResult<Vec<(String, usize, f64)>> {
    let samples: Vec<TextSample> = samples.into_iter().map(TextSample::new).collect();

    let mut wrapped = Vec::with_capacity(pipelines.len());
    for (key, value) in pipelines.iter() {
        wrapped.push(PyPipeline {
            name: key.extract::<String>()?,
            callable: value,
        });
    }
    let refs: Vec<&dyn Pipeline> = wrapped.iter().map(|p| p as &dyn Pipeline).collect();
    info!(
        "[PY] Benchmarking {} callables on {} samples",
        refs.len(),
        samples.len()
    );

    let config = BenchConfig { trials, warmup };
    let results = run_benchmark(&samples, &refs, &config).map_err(pipeline_err)?;
    Ok(results
        .into_iter()
        .map(|r| (r.pipeline_name, r.sample_length, r.elapsed_seconds))
        .collect())
}

#[pymodule]
fn pipebench(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    m.add_function(wrap_pyfunction!(load_corpus, m)?)?;
    m.add_function(wrap_pyfunction!(fit_log_log, m)?)?;
    m.add_function(wrap_pyfunction!(benchmark, m)?)?;
    Ok(())
}

use crate::error::PipelineError;
use crate::timing::{TimingStats, best_of, time_trials};
use crate::{Pipeline, TextSample, TimingResult};
use log::{info, warn};

/// Number of timed trials per sample and untimed warm-up calls per pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    pub trials: usize,
    pub warmup: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            trials: 3,
            warmup: 0,
        }
    }
}

/// Times `pipeline` on every sample, keeping the minimum of `config.trials`.
///
/// Any pipeline failure aborts the run. An empty `samples` slice returns an
/// empty result without calling the pipeline, warm-up included.
pub fn time_pipeline<P>(
    samples: &[TextSample],
    pipeline: &P,
    config: &BenchConfig,
    stats: &mut TimingStats,
) -> Result<Vec<TimingResult>, PipelineError>
where
    P: Pipeline + ?Sized,
{
    if config.trials == 0 {
        return Err(PipelineError::NoTrials);
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let name = pipeline.name().to_string();
    warm_up(samples, pipeline, config.warmup)?;

    let mut results = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        let durations = time_trials(config.trials, || pipeline.run(sample.text())).map_err(
            |source| PipelineError::Failed {
                pipeline: name.clone(),
                sample: index,
                source: source.into_source(),
            },
        )?;
        stats.record_all(&name, &durations);

        let Some(best) = best_of(&durations) else {
            return Err(PipelineError::NoTrials);
        };
        info!(
            "[RUNNER] {} on {} chars: best {:.6}s of {}",
            name,
            sample.length(),
            best.as_secs_f64(),
            durations.len()
        );

        results.push(TimingResult {
            pipeline_name: name.clone(),
            sample_length: sample.length(),
            elapsed_seconds: best.as_secs_f64(),
            trials: durations.iter().map(|d| d.as_secs_f64()).collect(),
        });
    }

    Ok(results)
}

/// Runs every pipeline in order; results are grouped pipeline by pipeline.
pub fn run_benchmark(
    samples: &[TextSample],
    pipelines: &[&dyn Pipeline],
    config: &BenchConfig,
) -> Result<Vec<TimingResult>, PipelineError> {
    if config.warmup == 0 && !samples.is_empty() {
        warn!(
            "[RUNNER] No warm-up runs; one-time initialization may inflate the first measurement"
        );
    }

    let mut stats = TimingStats::new();
    let mut results = Vec::with_capacity(samples.len() * pipelines.len());
    for pipeline in pipelines {
        info!(
            "[RUNNER] Timing '{}' on {} samples",
            pipeline.name(),
            samples.len()
        );
        results.extend(time_pipeline(samples, *pipeline, config, &mut stats)?);
    }

    stats.log_summary();
    Ok(results)
}

fn warm_up<P>(samples: &[TextSample], pipeline: &P, runs: usize) -> Result<(), PipelineError>
where
    P: Pipeline + ?Sized,
{
    let Some(first) = samples.first() else {
        return Ok(());
    };
    for _ in 0..runs {
        pipeline
            .run(first.text())
            .map_err(|source| PipelineError::Warmup {
                pipeline: pipeline.name().to_string(),
                source: source.into_source(),
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FnPipeline;
    use std::cell::Cell;

    #[test]
    fn test_zero_trials_rejected() {
        let pipeline = FnPipeline::new("noop", |_: &str| Ok::<_, String>(()));
        let config = BenchConfig {
            trials: 0,
            warmup: 0,
        };
        let err = time_pipeline(
            &[TextSample::new("x")],
            &pipeline,
            &config,
            &mut TimingStats::new(),
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::NoTrials));
    }

    #[test]
    fn test_warmup_runs_are_untimed() {
        let calls = Cell::new(0);
        let pipeline = FnPipeline::new("count", |_: &str| {
            calls.set(calls.get() + 1);
            Ok::<_, String>(())
        });
        let config = BenchConfig {
            trials: 3,
            warmup: 2,
        };
        let samples = [TextSample::new("a"), TextSample::new("bb")];

        let results = time_pipeline(&samples, &pipeline, &config, &mut TimingStats::new()).unwrap();

        assert_eq!(calls.get(), 2 + 3 * 2);
        assert!(results.iter().all(|r| r.trials.len() == 3));
    }
}

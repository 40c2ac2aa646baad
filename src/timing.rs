use log::{debug, info};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Wall-clock stopwatch that logs its label when stopped or dropped.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
    logged: bool,
}

impl Timer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            label: label.into(),
            logged: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Logs once and returns the elapsed time.
    pub fn stop(mut self) -> Duration {
        let elapsed = self.elapsed();
        self.log(elapsed);
        elapsed
    }

    fn log(&mut self, elapsed: Duration) {
        if !self.logged {
            info!(
                "[TIMING] {} took {:.2}ms",
                self.label,
                elapsed.as_secs_f64() * 1000.0
            );
            self.logged = true;
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        self.log(elapsed);
    }
}

/// Runs `op` `trials` times and returns every trial duration in order.
///
/// The first error aborts the remaining trials.
pub fn time_trials<E>(
    trials: usize,
    mut op: impl FnMut() -> Result<(), E>,
) -> Result<Vec<Duration>, E> {
    let mut durations = Vec::with_capacity(trials);
    for trial in 0..trials {
        let start = Instant::now();
        op()?;
        let elapsed = start.elapsed();
        debug!("[TIMING] trial {} took {:?}", trial, elapsed);
        durations.push(elapsed);
    }
    Ok(durations)
}

/// Smallest duration, or `None` when no trial ran.
pub fn best_of(durations: &[Duration]) -> Option<Duration> {
    durations.iter().min().copied()
}

/// Aggregate of one label's recorded trials.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    pub label: String,
    pub count: usize,
    pub total: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl TrialSummary {
    pub fn mean(&self) -> Duration {
        self.total / self.count as u32
    }
}

/// Accumulates trial durations per pipeline for the end-of-run summary.
#[derive(Debug, Default)]
pub struct TimingStats {
    operations: BTreeMap<String, Vec<Duration>>,
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_all(&mut self, label: &str, durations: &[Duration]) {
        self.operations
            .entry(label.to_string())
            .or_default()
            .extend_from_slice(durations);
    }

    pub fn summaries(&self) -> Vec<TrialSummary> {
        self.operations
            .iter()
            .filter_map(|(label, durations)| {
                Some(TrialSummary {
                    label: label.clone(),
                    count: durations.len(),
                    total: durations.iter().sum(),
                    min: *durations.iter().min()?,
                    max: *durations.iter().max()?,
                })
            })
            .collect()
    }

    pub fn log_summary(&self) {
        info!("========== TIMING SUMMARY ==========");
        for s in self.summaries() {
            info!(
                "{:<20} | trials: {:>4} | total: {:>9.2}ms | mean: {:>8.2}ms | min: {:>8.2}ms | max: {:>8.2}ms",
                s.label,
                s.count,
                s.total.as_secs_f64() * 1000.0,
                s.mean().as_secs_f64() * 1000.0,
                s.min.as_secs_f64() * 1000.0,
                s.max.as_secs_f64() * 1000.0
            );
        }
        info!("====================================");
    }
}

/// Times a block as a named stage, logging on completion.
#[macro_export]
macro_rules! time_stage {
    ($label:expr, $code:block) => {{
        let _timer = $crate::timing::Timer::new($label);
        $code
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_timer_basic() {
        let timer = Timer::new("test_operation");
        sleep(Duration::from_millis(10));
        assert!(timer.stop() >= Duration::from_millis(10));
    }

    #[test]
    fn test_time_trials_counts_calls() {
        let mut calls = 0;
        let durations = time_trials::<()>(3, || {
            calls += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(durations.len(), 3);
    }

    #[test]
    fn test_time_trials_stops_on_error() {
        let mut calls = 0;
        let result = time_trials(3, || {
            calls += 1;
            if calls == 2 { Err("boom") } else { Ok(()) }
        });

        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_best_of() {
        let durations = [
            Duration::from_millis(30),
            Duration::from_millis(10),
            Duration::from_millis(20),
        ];
        assert_eq!(best_of(&durations), Some(Duration::from_millis(10)));
        assert_eq!(best_of(&[]), None);
    }

    #[test]
    fn test_timing_stats() {
        let mut stats = TimingStats::new();
        stats.record_all(
            "scan",
            &[Duration::from_millis(10), Duration::from_millis(20)],
        );
        stats.record_all("regex", &[Duration::from_millis(30)]);

        let summaries = stats.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].label, "regex");
        assert_eq!(summaries[1].count, 2);
        assert_eq!(summaries[1].mean(), Duration::from_millis(15));
        assert_eq!(summaries[1].max, Duration::from_millis(20));

        stats.log_summary();
    }
}

use crate::TimingResult;
use crate::error::DomainError;
use log::info;
use serde::Serialize;

/// Least-squares line through `(log10 size, log10 duration)`.
///
/// Models `duration ≈ 10^intercept · size^slope`, so `slope` is the empirical
/// polynomial order of the runtime in the input size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub points: usize,
}

impl FitResult {
    /// Predicted duration in seconds for an input of `size` characters.
    pub fn predict(&self, size: f64) -> f64 {
        10f64.powf(self.intercept) * size.powf(self.slope)
    }

    /// The power law as a human-readable formula.
    pub fn formula(&self) -> String {
        format!("t = {:.3e} * n^{:.3}", 10f64.powf(self.intercept), self.slope)
    }
}

pub fn fit_log_log(sizes: &[f64], durations: &[f64]) -> Result<FitResult, DomainError> {
    if sizes.len() != durations.len() {
        return Err(DomainError::LengthMismatch {
            sizes: sizes.len(),
            durations: durations.len(),
        });
    }

    let xs = log10_all("size", sizes)?;
    let ys = log10_all("duration", durations)?;

    // Distinct sizes can share a log10 value, so count in log space.
    let distinct = count_distinct(&xs);
    if distinct < 2 {
        return Err(DomainError::Underdetermined { distinct });
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if !(sxx.is_finite() && sxx > 0.0) {
        return Err(DomainError::Underdetermined { distinct: 1 });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_res: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    // A constant response is fitted exactly by a flat line.
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (1.0 - ss_res / syy).clamp(0.0, 1.0)
    };

    Ok(FitResult {
        slope,
        intercept,
        r_squared,
        points: xs.len(),
    })
}

/// Fits each pipeline's results separately, in first-seen pipeline order.
pub fn fit_by_pipeline(results: &[TimingResult]) -> Result<Vec<(String, FitResult)>, DomainError> {
    let mut names: Vec<&str> = Vec::new();
    for r in results {
        if !names.contains(&r.pipeline_name.as_str()) {
            names.push(&r.pipeline_name);
        }
    }

    names
        .into_iter()
        .map(|name| {
            let (sizes, durations): (Vec<f64>, Vec<f64>) = results
                .iter()
                .filter(|r| r.pipeline_name == name)
                .map(|r| (r.sample_length as f64, r.elapsed_seconds))
                .unzip();
            let fit = fit_log_log(&sizes, &durations)?;
            info!(
                "[FIT] {}: slope={:.4} intercept={:.4} r2={:.4}",
                name, fit.slope, fit.intercept, fit.r_squared
            );
            Ok((name.to_string(), fit))
        })
        .collect()
}

fn log10_all(what: &'static str, values: &[f64]) -> Result<Vec<f64>, DomainError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value.is_nan() || value.is_infinite() {
                Err(DomainError::NonFinite { what, index, value })
            } else if value <= 0.0 {
                Err(DomainError::NonPositive { what, index, value })
            } else {
                Ok(value.log10())
            }
        })
        .collect()
}

fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted.len()
}

use crate::TimingResult;
use crate::fit::FitResult;
use std::fmt::Write;

const MEASURED_MARKERS: &[char] = &['o', 'x', '+', '#', '@'];
const CURVE_MARKERS: &[char] = &['.', ':', '~', '^', '\''];
const LABEL_WIDTH: usize = 7;

/// Predicted `(size, duration)` for each size under the fitted power law.
pub fn extrapolate(fit: &FitResult, sizes: &[f64]) -> Vec<(f64, f64)> {
    sizes.iter().map(|&s| (s, fit.predict(s))).collect()
}

/// `count` sizes spaced evenly in log space between `low` and `high`.
pub fn log_space(low: f64, high: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let (a, b) = (low.log10(), high.log10());
            let step = (b - a) / (count - 1) as f64;
            (0..count).map(|i| 10f64.powf(a + step * i as f64)).collect()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub fit: FitResult,
    pub measured: Vec<(f64, f64)>,
    pub fitted: Vec<(f64, f64)>,
}

/// Measured points and fitted curves on log-log axes, duration versus size.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    pub series: Vec<Series>,
}

impl Chart {
    /// One series per fit; curves span the overall measured size range.
    pub fn new(results: &[TimingResult], fits: &[(String, FitResult)], curve_points: usize) -> Self {
        let sizes = results.iter().map(|r| r.sample_length as f64);
        let low = sizes.clone().fold(f64::INFINITY, f64::min);
        let high = sizes.fold(f64::NEG_INFINITY, f64::max);
        let grid = if low.is_finite() && low > 0.0 {
            log_space(low, high, curve_points)
        } else {
            Vec::new()
        };

        let series = fits
            .iter()
            .map(|(name, fit)| Series {
                name: name.clone(),
                fit: *fit,
                measured: results
                    .iter()
                    .filter(|r| &r.pipeline_name == name)
                    .map(|r| (r.sample_length as f64, r.elapsed_seconds))
                    .collect(),
                fitted: extrapolate(fit, &grid),
            })
            .collect();

        Self { series }
    }

    fn log_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let points = self
            .series
            .iter()
            .flat_map(|s| s.measured.iter().chain(&s.fitted))
            .filter(|(x, y)| *x > 0.0 && *y > 0.0)
            .map(|(x, y)| (x.log10(), y.log10()));

        let mut bounds: Option<((f64, f64), (f64, f64))> = None;
        for (x, y) in points {
            bounds = Some(match bounds {
                None => ((x, x), (y, y)),
                Some(((x0, x1), (y0, y1))) => ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y))),
            });
        }
        bounds.map(|(xr, yr)| (pad(xr), pad(yr)))
    }

    /// Renders the chart as text, `width` by `height` plot cells.
    pub fn render(&self, width: usize, height: usize) -> String {
        let width = width.max(10);
        let height = height.max(5);
        let Some(((x0, x1), (y0, y1))) = self.log_bounds() else {
            return "(no data)\n".to_string();
        };

        let mut grid = vec![vec![' '; width]; height];
        let to_cell = |x: f64, y: f64| {
            let col = ((x.log10() - x0) / (x1 - x0) * (width - 1) as f64).round() as usize;
            let row = ((y.log10() - y0) / (y1 - y0) * (height - 1) as f64).round() as usize;
            (height - 1 - row.min(height - 1), col.min(width - 1))
        };

        // Curves first so measured markers stay visible on top.
        for (i, s) in self.series.iter().enumerate() {
            let marker = CURVE_MARKERS[i % CURVE_MARKERS.len()];
            for &(x, y) in s.fitted.iter().filter(|(x, y)| *x > 0.0 && *y > 0.0) {
                let (r, c) = to_cell(x, y);
                grid[r][c] = marker;
            }
        }
        for (i, s) in self.series.iter().enumerate() {
            let marker = MEASURED_MARKERS[i % MEASURED_MARKERS.len()];
            for &(x, y) in s.measured.iter().filter(|(x, y)| *x > 0.0 && *y > 0.0) {
                let (r, c) = to_cell(x, y);
                grid[r][c] = marker;
            }
        }

        let mut y_labels = vec![String::new(); height];
        for p in decades(y0, y1) {
            let row = ((p as f64 - y0) / (y1 - y0) * (height - 1) as f64).round() as usize;
            y_labels[height - 1 - row.min(height - 1)] = format!("1e{}", p);
        }

        let mut out = String::new();
        let _ = writeln!(out, "{:>w$} time (s) vs size (chars), log-log", "", w = LABEL_WIDTH);
        for (label, row) in y_labels.iter().zip(&grid) {
            let line: String = row.iter().collect();
            let _ = writeln!(out, "{:>w$}|{}", label, line.trim_end(), w = LABEL_WIDTH);
        }

        let mut axis = vec!['-'; width];
        let mut x_labels = vec![' '; width + 8];
        let mut next_free = 0;
        for p in decades(x0, x1) {
            let col = ((p as f64 - x0) / (x1 - x0) * (width - 1) as f64).round() as usize;
            let col = col.min(width - 1);
            axis[col] = '+';
            let label = format!("1e{}", p);
            if col >= next_free {
                for (k, ch) in label.chars().enumerate() {
                    x_labels[col + k] = ch;
                }
                next_free = col + label.len() + 1;
            }
        }
        let _ = writeln!(out, "{:>w$}+{}", "", axis.iter().collect::<String>(), w = LABEL_WIDTH);
        let _ = writeln!(
            out,
            "{:>w$} {}",
            "",
            x_labels.iter().collect::<String>().trim_end(),
            w = LABEL_WIDTH
        );

        for (i, s) in self.series.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>w$} {} {} measured   {} {} fit: {}",
                "",
                MEASURED_MARKERS[i % MEASURED_MARKERS.len()],
                s.name,
                CURVE_MARKERS[i % CURVE_MARKERS.len()],
                s.name,
                s.fit.formula(),
                w = LABEL_WIDTH
            );
        }
        out
    }
}

/// Integer powers of ten inside `[low, high]`, tolerant of rounding in log10.
fn decades(low: f64, high: f64) -> std::ops::RangeInclusive<i32> {
    ((low - 1e-9).ceil() as i32)..=((high + 1e-9).floor() as i32)
}

/// Widens a degenerate range so it can be mapped onto cells.
fn pad((low, high): (f64, f64)) -> (f64, f64) {
    if high - low < 1e-9 {
        (low - 0.5, high + 0.5)
    } else {
        (low, high)
    }
}

/// Regression coefficients, one row per pipeline.
pub fn format_fit_table(fits: &[(String, FitResult)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>8} {:>10} {:>8} {:>6}  power law",
        "pipeline", "slope", "intercept", "r2", "points"
    );
    for (name, fit) in fits {
        let _ = writeln!(
            out,
            "{:<12} {:>8.4} {:>10.4} {:>8.4} {:>6}  {}",
            name,
            fit.slope,
            fit.intercept,
            fit.r_squared,
            fit.points,
            fit.formula()
        );
    }
    out
}

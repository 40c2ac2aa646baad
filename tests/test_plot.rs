use pipebench::TimingResult;
use pipebench::fit::fit_by_pipeline;
use pipebench::plot::{Chart, extrapolate};

fn results() -> Vec<TimingResult> {
    let mut out = Vec::new();
    for (name, scale) in [("regex", 1e-6), ("scan", 4e-6)] {
        for size in [100usize, 1_000, 10_000, 100_000] {
            let secs = scale * size as f64;
            out.push(TimingResult {
                pipeline_name: name.to_string(),
                sample_length: size,
                elapsed_seconds: secs,
                trials: vec![secs, secs * 1.1, secs * 1.3],
            });
        }
    }
    out
}

#[test]
fn test_chart_series_match_fits() {
    let results = results();
    let fits = fit_by_pipeline(&results).unwrap();
    let chart = Chart::new(&results, &fits, 16);

    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].measured.len(), 4);
    assert_eq!(chart.series[1].fitted.len(), 16);
    let (first_x, _) = chart.series[0].fitted[0];
    let (last_x, _) = chart.series[0].fitted[15];
    assert!((first_x - 100.0).abs() < 1e-9);
    assert!((last_x - 100_000.0).abs() < 1e-6);
}

#[test]
fn test_fitted_curve_passes_through_exact_points() {
    let results = results();
    let fits = fit_by_pipeline(&results).unwrap();
    let (_, scan_fit) = &fits[1];

    for (size, predicted) in extrapolate(scan_fit, &[100.0, 100_000.0]) {
        assert!((predicted - 4e-6 * size).abs() / predicted < 1e-9);
    }
}

#[test]
fn test_render_has_axes_markers_and_legend() {
    let results = results();
    let fits = fit_by_pipeline(&results).unwrap();
    let rendered = Chart::new(&results, &fits, 40).render(40, 12);
    let lines: Vec<&str> = rendered.lines().collect();

    // title, 12 rows, axis, tick labels, one legend line per series
    assert_eq!(lines.len(), 1 + 12 + 2 + 2);
    assert!(rendered.contains('o'));
    assert!(rendered.contains('x'));
    assert!(lines[14].contains("1e2") && lines[14].contains("1e5"));
    assert!(lines[15].contains("regex measured"));
    assert!(lines[16].contains("scan fit: t = "));
}

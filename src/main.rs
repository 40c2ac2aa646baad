use clap::Parser;
use log::{LevelFilter, info};
use pipebench::corpus::load_corpus;
use pipebench::fit::fit_by_pipeline;
use pipebench::pipeline::{self, BUILT_IN};
use pipebench::plot::{Chart, format_fit_table};
use pipebench::runner::{BenchConfig, run_benchmark};
use pipebench::{Pipeline, time_stage};
use std::path::PathBuf;

/// Times text-annotation pipelines on growing samples and fits a power law.
#[derive(Parser)]
#[command(name = "pipebench", version, about)]
struct Cli {
    /// JSON corpus: an array (or key-ordered object) of text samples
    corpus: PathBuf,

    /// Timed trials per sample; the minimum is kept
    #[arg(long, default_value_t = 3)]
    trials: usize,

    /// Untimed runs per pipeline before timing starts
    #[arg(long, default_value_t = 0)]
    warmup: usize,

    /// Pipeline to time (repeatable): regex, scan
    #[arg(short, long = "pipeline")]
    pipelines: Vec<String>,

    /// Chart width in cells
    #[arg(long, default_value_t = 64)]
    width: usize,

    /// Chart height in cells
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Print the fits as JSON instead of the table and chart
    #[arg(long)]
    json: bool,

    /// Enable info logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let config = BenchConfig {
        trials: cli.trials,
        warmup: cli.warmup,
    };
    let names: Vec<String> = if cli.pipelines.is_empty() {
        BUILT_IN.iter().map(|s| s.to_string()).collect()
    } else {
        cli.pipelines.clone()
    };
    let pipelines = names
        .iter()
        .map(|name| pipeline::built_in(name))
        .collect::<Result<Vec<_>, _>>()?;
    let pipeline_refs: Vec<&dyn Pipeline> = pipelines.iter().map(|p| &**p).collect();

    let corpus = time_stage!("load", { load_corpus(&cli.corpus)? });
    let results = time_stage!("benchmark", {
        run_benchmark(corpus.samples(), &pipeline_refs, &config)?
    });
    info!("[MAIN] Collected {} timing results", results.len());

    if results.is_empty() {
        println!("corpus is empty; nothing to fit");
        return Ok(());
    }

    let fits = fit_by_pipeline(&results)?;

    if cli.json {
        let report: Vec<_> = fits
            .iter()
            .map(|(name, fit)| serde_json::json!({ "pipeline": name, "fit": fit }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", format_fit_table(&fits));
    println!();
    let chart = Chart::new(&results, &fits, cli.width * 2);
    print!("{}", chart.render(cli.width, cli.height));

    Ok(())
}

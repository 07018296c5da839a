use anyhow::{Context, Result};
use bench_plot::category::CategoryRule;
use bench_plot::chart::{ChartStyle, PlottersRenderer};
use bench_plot::dataset::{aggregate, print_summary};
use bench_plot::plot_datasets;
use bench_plot::record::ResultsFile;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bench-plot")]
#[command(about = "Generate line graphs for benchmark results")]
struct Cli {
    /// An absolute or relative path to a .json google benchmark results file
    results: PathBuf,

    /// Output directory for charts
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Also leave out strategies containing this substring (repeatable)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Don't label points with their elapsed time
    #[arg(long, default_value = "false")]
    no_annotate: bool,

    /// Print the aggregated series and debug logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let results = ResultsFile::load(&cli.results)
        .with_context(|| format!("Failed to load results from {}", cli.results.display()))?;

    println!(
        "Loaded {} benchmark runs from {}",
        results.benchmarks.len(),
        cli.results.display()
    );

    let datasets = aggregate(&results.benchmarks).context("Failed to aggregate benchmark runs")?;
    if cli.verbose {
        print_summary(&datasets);
    }

    let rules: Vec<CategoryRule> = CategoryRule::defaults()
        .into_iter()
        .map(|rule| cli.exclude.iter().fold(rule, |rule, ex| rule.exclude(ex)))
        .collect();

    let style = ChartStyle {
        annotate: !cli.no_annotate,
        ..ChartStyle::default()
    };
    let renderer = PlottersRenderer::new(&cli.output, style);

    println!("\nGenerating charts...");
    plot_datasets(&datasets, &rules, results.num_cpus(), &renderer)?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub mod category;
pub mod chart;
pub mod dataset;
pub mod decompose;
pub mod error;
pub mod record;

pub use category::{select, Category, CategoryRule};
pub use chart::{generate_charts, ChartRenderer, ChartStyle, PlottersRenderer};
pub use dataset::{aggregate, Datasets, Series, SeriesKey};
pub use decompose::decompose_name;
pub use error::{Error, Result};
pub use record::{ResultsFile, RunRecord};

use std::path::PathBuf;

/// Select the series for every category rule and render one chart each
pub fn plot_datasets<R: ChartRenderer + ?Sized>(
    datasets: &Datasets,
    rules: &[CategoryRule],
    num_cpus: Option<u64>,
    renderer: &R,
) -> Result<Vec<PathBuf>> {
    let categories = select(datasets, rules);
    generate_charts(renderer, &categories, num_cpus)
}

use crate::decompose::decompose_name;
use crate::error::Result;
use crate::record::RunRecord;
use std::collections::HashMap;

/// Identity of a series: the query it measures and the strategy executing it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub query: String,
    pub strategy: String,
}

/// All runs of one query/strategy pair, in the order they were processed.
///
/// The point sequences are index-aligned and only grow while [`aggregate`]
/// builds them; afterwards a series is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    key: SeriesKey,
    sample_sizes: Vec<f64>,
    throughputs: Vec<f64>,
    elapsed_values: Vec<f64>,
    time_unit: String,
}

impl Series {
    fn new(key: SeriesKey, record: &RunRecord) -> Self {
        Self {
            key,
            sample_sizes: vec![record.sample_size],
            throughputs: vec![record.throughput],
            elapsed_values: vec![record.elapsed],
            time_unit: record.time_unit.clone(),
        }
    }

    fn push(&mut self, record: &RunRecord) {
        if record.time_unit != self.time_unit {
            tracing::warn!(
                query = %self.key.query,
                strategy = %self.key.strategy,
                expected = %self.time_unit,
                found = %record.time_unit,
                "time unit differs within series, keeping the first"
            );
        }
        self.sample_sizes.push(record.sample_size);
        self.throughputs.push(record.throughput);
        self.elapsed_values.push(record.elapsed);
    }

    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    pub fn query(&self) -> &str {
        &self.key.query
    }

    pub fn strategy(&self) -> &str {
        &self.key.strategy
    }

    pub fn sample_sizes(&self) -> &[f64] {
        &self.sample_sizes
    }

    pub fn throughputs(&self) -> &[f64] {
        &self.throughputs
    }

    pub fn elapsed_values(&self) -> &[f64] {
        &self.elapsed_values
    }

    pub fn time_unit(&self) -> &str {
        &self.time_unit
    }

    /// Number of points in the series
    pub fn len(&self) -> usize {
        self.sample_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_sizes.is_empty()
    }

    /// `(sample_size, throughput, elapsed)` triples in insertion order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.sample_sizes
            .iter()
            .zip(&self.throughputs)
            .zip(&self.elapsed_values)
            .map(|((&x, &y), &t)| (x, y, t))
    }
}

/// The aggregated series, one per distinct [`SeriesKey`].
///
/// Iteration follows the order in which each key was first seen, so a given
/// input always yields the same series order.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    series: Vec<Series>,
    index: HashMap<SeriesKey, usize>,
}

impl Datasets {
    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn get(&self, query: &str, strategy: &str) -> Option<&Series> {
        let key = SeriesKey {
            query: query.to_string(),
            strategy: strategy.to_string(),
        };
        self.index.get(&key).map(|&idx| &self.series[idx])
    }

    fn insert(&mut self, key: SeriesKey, record: &RunRecord) {
        match self.index.get(&key) {
            Some(&idx) => self.series[idx].push(record),
            None => {
                self.index.insert(key.clone(), self.series.len());
                self.series.push(Series::new(key, record));
            }
        }
    }
}

impl<'a> IntoIterator for &'a Datasets {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

/// Group run records into one series per query/strategy pair.
///
/// Fails on the first record whose name cannot be decomposed; no partial
/// result is returned in that case.
pub fn aggregate(records: &[RunRecord]) -> Result<Datasets> {
    let mut datasets = Datasets::default();

    for record in records {
        let (query, strategy) = decompose_name(&record.raw_name)?;
        datasets.insert(SeriesKey { query, strategy }, record);
    }

    tracing::debug!(
        records = records.len(),
        series = datasets.len(),
        "aggregated benchmark runs"
    );
    Ok(datasets)
}

/// Print aggregated series to console
pub fn print_summary(datasets: &Datasets) {
    println!("\n{:=<80}", "");
    println!("Benchmark Series");
    println!("{:=<80}\n", "");

    for series in datasets {
        println!("Query: {}  Strategy: {}", series.query(), series.strategy());
        println!("{:-<60}", "");
        println!(
            "  {:>14} {:>16} {:>14}",
            "Sample Size",
            "Items/sec",
            format!("Time ({})", series.time_unit())
        );
        println!("  {:-<46}", "");

        for (sample_size, throughput, elapsed) in series.points() {
            println!(
                "  {:>14.0} {:>16.0} {:>14.3}",
                sample_size, throughput, elapsed
            );
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn record(name: &str, sample_size: f64, throughput: f64, elapsed: f64) -> RunRecord {
        RunRecord {
            raw_name: name.to_string(),
            sample_size,
            throughput,
            elapsed,
            time_unit: "ms".to_string(),
        }
    }

    #[test]
    fn test_same_key_merges_in_input_order() {
        let records = vec![
            record("LeastPopular<queries::Sorted>", 100.0, 500.0, 0.9),
            record("LeastPopular<queries::Sorted>", 10.0, 100.0, 1.0),
        ];

        let datasets = aggregate(&records).unwrap();
        assert_eq!(datasets.len(), 1);

        let series = datasets.get("LeastPopular", "Sorted").unwrap();
        assert_eq!(series.sample_sizes(), &[100.0, 10.0]);
        assert_eq!(series.throughputs(), &[500.0, 100.0]);
        assert_eq!(series.elapsed_values(), &[0.9, 1.0]);
        assert_eq!(series.time_unit(), "ms");
    }

    #[test]
    fn test_one_series_per_distinct_pair() {
        let names = [
            "LeastPopular<queries::Sorted>",
            "LeastPopular<queries::StdSorted>",
            "LargestPurchases<queries::Sorted>",
            "LeastPopular<queries::Sorted>",
            "LargestPurchases<queries::Sorted>",
            "Over15<queries::SequentialIA>",
        ];
        let records: Vec<RunRecord> = names
            .iter()
            .enumerate()
            .map(|(i, name)| record(name, i as f64, 1.0, 1.0))
            .collect();

        let datasets = aggregate(&records).unwrap();
        assert_eq!(datasets.len(), 4);

        let total_points: usize = datasets.iter().map(Series::len).sum();
        assert_eq!(total_points, records.len());

        for series in &datasets {
            assert_eq!(series.sample_sizes().len(), series.throughputs().len());
            assert_eq!(series.sample_sizes().len(), series.elapsed_values().len());
        }
    }

    #[test]
    fn test_first_seen_order_is_stable() {
        let records = vec![
            record("B<queries::X>", 1.0, 1.0, 1.0),
            record("A<queries::X>", 1.0, 1.0, 1.0),
            record("B<queries::X>", 2.0, 1.0, 1.0),
        ];

        let datasets = aggregate(&records).unwrap();
        let queries: Vec<&str> = datasets.iter().map(Series::query).collect();
        assert_eq!(queries, vec!["B", "A"]);
    }

    #[test]
    fn test_concatenation_ambiguous_pairs_stay_distinct() {
        let records = vec![
            record("AB<queries::C>", 1.0, 1.0, 1.0),
            record("A<queries::BC>", 2.0, 2.0, 2.0),
        ];

        let datasets = aggregate(&records).unwrap();
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets.get("AB", "C").unwrap().sample_sizes(), &[1.0]);
        assert_eq!(datasets.get("A", "BC").unwrap().sample_sizes(), &[2.0]);
    }

    #[test]
    fn test_differing_time_unit_is_accepted() {
        let mut second = record("Q<queries::S>", 2.0, 1.0, 1500.0);
        second.time_unit = "us".to_string();
        let records = vec![record("Q<queries::S>", 1.0, 1.0, 1.0), second];

        let datasets = aggregate(&records).unwrap();
        let series = datasets.get("Q", "S").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.time_unit(), "ms");
    }

    #[test]
    fn test_empty_input() {
        let datasets = aggregate(&[]).unwrap();
        assert!(datasets.is_empty());
        assert_eq!(datasets.iter().count(), 0);
    }

    #[test]
    fn test_malformed_name_aborts() {
        let records = vec![
            record("LeastPopular<queries::Sorted>", 1.0, 1.0, 1.0),
            record("PlainName", 2.0, 1.0, 1.0),
        ];

        match aggregate(&records).unwrap_err() {
            Error::MalformedName { name } => assert_eq!(name, "PlainName"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_points_are_aligned() {
        let records = vec![
            record("Q<queries::S>", 10.0, 100.0, 1.0),
            record("Q<queries::S>", 100.0, 500.0, 0.9),
        ];

        let datasets = aggregate(&records).unwrap();
        let points: Vec<_> = datasets.get("Q", "S").unwrap().points().collect();
        assert_eq!(points, vec![(10.0, 100.0, 1.0), (100.0, 500.0, 0.9)]);
    }
}

use crate::dataset::{Datasets, Series};

/// Declarative rule selecting the series drawn on one chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Output name of the chart, e.g. `q1`
    pub id: String,
    /// Chart title, before the thread count suffix
    pub title: String,
    /// A series belongs here if its query contains this substring
    pub query_contains: String,
    /// ...and its strategy contains none of these
    pub exclude_strategies: Vec<String>,
}

impl CategoryRule {
    pub fn new(id: &str, title: &str, query_contains: &str, exclude_strategies: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            query_contains: query_contains.to_string(),
            exclude_strategies: exclude_strategies.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The three query charts, leaving out the standard-library strategies
    pub fn defaults() -> Vec<CategoryRule> {
        vec![
            CategoryRule::new("q1", "Least and Most Popular", "Least", &["Std"]),
            CategoryRule::new("q2", "Largest Number of Purchases", "Largest", &["Std"]),
            CategoryRule::new("q3", "Number of Transactions over $15", "15", &["Std"]),
        ]
    }

    /// Add another strategy substring to exclude
    pub fn exclude(mut self, strategy_substring: &str) -> Self {
        self.exclude_strategies.push(strategy_substring.to_string());
        self
    }

    pub fn matches(&self, series: &Series) -> bool {
        series.query().contains(self.query_contains.as_str())
            && !self
                .exclude_strategies
                .iter()
                .any(|excluded| series.strategy().contains(excluded.as_str()))
    }

    /// Title with the thread count appended when known
    pub fn full_title(&self, num_cpus: Option<u64>) -> String {
        match num_cpus {
            Some(n) => format!("{} - {} Threads", self.title, n),
            None => self.title.clone(),
        }
    }
}

/// The series selected by one rule, in aggregator order
#[derive(Debug)]
pub struct Category<'a> {
    pub rule: &'a CategoryRule,
    pub series: Vec<&'a Series>,
}

impl Category<'_> {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Partition the aggregated series by rule. A series may land in several
/// categories, and a category may be empty.
pub fn select<'a>(datasets: &'a Datasets, rules: &'a [CategoryRule]) -> Vec<Category<'a>> {
    rules
        .iter()
        .map(|rule| {
            let series: Vec<&Series> = datasets.iter().filter(|s| rule.matches(s)).collect();
            tracing::debug!(category = %rule.id, series = series.len(), "selected series");
            Category { rule, series }
        })
        .collect()
}

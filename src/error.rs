use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a results file into charts.
///
/// None of these are retried: the pipeline stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to load '{}': not a readable file", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse benchmark results")]
    Parse(#[from] serde_json::Error),

    #[error("benchmark name '{name}' does not match '<Query><queries::Strategy>'")]
    MalformedName { name: String },

    #[error("failed to render chart '{output}'")]
    Render {
        output: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

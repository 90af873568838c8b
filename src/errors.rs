use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code("FRAMEBENCH-001"),
        help("Please check your benchmark YAML syntax and structure.")
    )]
    ConfigError(#[source] serde_yaml::Error),

    #[error("I/O error: {0}")]
    #[diagnostic(code("FRAMEBENCH-002"), help("Check file paths and permissions."))]
    IoError(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    #[diagnostic(
        code("FRAMEBENCH-003"),
        help("An error occurred within the data processing engine.")
    )]
    PolarsError(#[from] polars::error::PolarsError),

    #[error("Invalid dataset size: {0}")]
    #[diagnostic(
        code("FRAMEBENCH-004"),
        help("Sizes are positive row counts such as 100000, 100_000, 100K or 2.5M.")
    )]
    InvalidSize(String),

    #[error("Model error: {0}")]
    #[diagnostic(
        code("FRAMEBENCH-005"),
        help("Fitting or predicting with the logistic regression model failed.")
    )]
    ModelError(String),

    #[error("pandrs error: {0}")]
    #[diagnostic(
        code("FRAMEBENCH-006"),
        help("Converting or processing a table with the pandrs engine failed.")
    )]
    PandrsError(String),

    #[error(transparent)]
    #[diagnostic(code("FRAMEBENCH-000"))]
    Unknown(#[from] anyhow::Error),
}

impl From<pandrs::error::Error> for BenchError {
    fn from(e: pandrs::error::Error) -> Self {
        BenchError::PandrsError(e.to_string())
    }
}

pub type BenchResult<T> = Result<T, BenchError>;

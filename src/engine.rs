use crate::errors::BenchResult;
use clap::ValueEnum;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five benchmarked table operations, untimed.
///
/// Each engine works on its own table representation. `load` and `export`
/// convert from and to the generated polars table and are never timed.
/// Implementations must leave the input frame untouched: every operation of a
/// size iteration reads the same generated table.
pub trait FrameEngine {
    type Frame;

    fn name(&self) -> &'static str;

    /// First line of the text report.
    fn title(&self) -> String;

    fn load(&self, df: &DataFrame) -> BenchResult<Self::Frame>;

    fn export(&self, frame: &Self::Frame) -> BenchResult<DataFrame>;

    fn height(&self, frame: &Self::Frame) -> usize;

    /// Rows where `a > 0.5`.
    fn filter(&self, frame: &Self::Frame) -> BenchResult<Self::Frame>;

    /// One row per label of `c` with `a_mean` and `d_sum`.
    fn group_by(&self, frame: &Self::Frame) -> BenchResult<Self::Frame>;

    /// Left join of `frame` to `side` on `id`. Unmatched rows get a missing `value`.
    fn left_join(&self, frame: &Self::Frame, side: &Self::Frame) -> BenchResult<Self::Frame>;

    /// All rows ordered by `a`, descending.
    fn sort(&self, frame: &Self::Frame) -> BenchResult<Self::Frame>;

    /// Copy of `frame` with `result = a * b / d`.
    fn calculate(&self, frame: &Self::Frame) -> BenchResult<Self::Frame>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// polars `DataFrame` methods
    #[default]
    Eager,
    /// polars `LazyFrame` plans
    Lazy,
    /// pandrs `OptimizedDataFrame`
    Pandrs,
}

impl EngineKind {
    pub const ALL: [EngineKind; 3] = [EngineKind::Eager, EngineKind::Lazy, EngineKind::Pandrs];

    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Eager => "eager",
            EngineKind::Lazy => "lazy",
            EngineKind::Pandrs => "pandrs",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Aggregations shared by both polars engines' group-by.
pub(crate) fn group_by_aggs() -> [Expr; 2] {
    [
        col("a").mean().alias("a_mean"),
        col("d").sum().alias("d_sum"),
    ]
}

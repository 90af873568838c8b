//! Operations on the eager `DataFrame` API.

use crate::engine::{group_by_aggs, FrameEngine};
use crate::errors::BenchResult;
use polars::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct EagerEngine;

impl FrameEngine for EagerEngine {
    type Frame = DataFrame;

    fn name(&self) -> &'static str {
        "eager"
    }

    fn title(&self) -> String {
        "Rust Polars (eager) Benchmark".to_string()
    }

    fn load(&self, df: &DataFrame) -> BenchResult<DataFrame> {
        Ok(df.clone())
    }

    fn export(&self, frame: &DataFrame) -> BenchResult<DataFrame> {
        Ok(frame.clone())
    }

    fn height(&self, frame: &DataFrame) -> usize {
        frame.height()
    }

    fn filter(&self, df: &DataFrame) -> BenchResult<DataFrame> {
        let mask = df.column("a")?.f64()?.gt(0.5);
        Ok(df.filter(&mask)?)
    }

    fn group_by(&self, df: &DataFrame) -> BenchResult<DataFrame> {
        // The eager GroupBy aggregation helpers are deprecated upstream.
        let grouped = df
            .clone()
            .lazy()
            .group_by([col("c")])
            .agg(group_by_aggs())
            .collect()?;
        Ok(grouped)
    }

    fn left_join(&self, df: &DataFrame, side: &DataFrame) -> BenchResult<DataFrame> {
        Ok(df.left_join(side, ["id"], ["id"])?)
    }

    fn sort(&self, df: &DataFrame) -> BenchResult<DataFrame> {
        let options = SortMultipleOptions::new().with_order_descending(true);
        Ok(df.sort(["a"], options)?)
    }

    fn calculate(&self, df: &DataFrame) -> BenchResult<DataFrame> {
        let a = df.column("a")?.f64()?;
        let b = df.column("b")?.f64()?;
        let d = df.column("d")?.cast(&DataType::Float64)?;

        let result = (&(a * b) / d.f64()?).with_name("result".into());

        let mut out = df.clone();
        out.with_column(result.into_series())?;
        Ok(out)
    }
}

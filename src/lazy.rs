//! Operations expressed as `LazyFrame` plans, executed with `collect`.

use crate::engine::{group_by_aggs, FrameEngine};
use crate::errors::BenchResult;
use polars::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct LazyEngine;

impl FrameEngine for LazyEngine {
    type Frame = DataFrame;

    fn name(&self) -> &'static str {
        "lazy"
    }

    fn title(&self) -> String {
        "Rust Polars (lazy) Benchmark".to_string()
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
        let out = df.clone().lazy().filter(col("a").gt(lit(0.5))).collect()?;
        Ok(out)
    }

    fn group_by(&self, df: &DataFrame) -> BenchResult<DataFrame> {
        let out = df
            .clone()
            .lazy()
            .group_by([col("c")])
            .agg(group_by_aggs())
            .collect()?;
        Ok(out)
    }

    fn left_join(&self, df: &DataFrame, side: &DataFrame) -> BenchResult<DataFrame> {
        let out = df
            .clone()
            .lazy()
            .join(
                side.clone().lazy(),
                [col("id")],
                [col("id")],
                JoinArgs::new(JoinType::Left),
            )
            .collect()?;
        Ok(out)
    }

    fn sort(&self, df: &DataFrame) -> BenchResult<DataFrame> {
        let options = SortMultipleOptions::new().with_order_descending(true);
        let out = df.clone().lazy().sort(["a"], options).collect()?;
        Ok(out)
    }

    fn calculate(&self, df: &DataFrame) -> BenchResult<DataFrame> {
        let result = (col("a") * col("b") / col("d").cast(DataType::Float64)).alias("result");
        let out = df.clone().lazy().with_columns([result]).collect()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df! {
            "id" => [0i64, 1, 2, 3, 4],
            "a" => [0.1, 0.7, 0.51, 0.3, 0.7],
            "b" => [1.0, 0.5, 0.5, 0.2, 0.1],
            "c" => ["y", "y", "x", "y", "x"],
            "d" => [10i32, 7, 1, 3, 99],
        }
        .unwrap()
    }

    #[test]
    fn test_filter() -> BenchResult<()> {
        let out = LazyEngine.filter(&sample())?;
        let ids: Vec<i64> = out.column("id")?.i64()?.into_no_null_iter().collect();
        assert_eq!(ids, vec![1, 2, 4]);
        Ok(())
    }

    #[test]
    fn test_group_by_names_and_values() -> BenchResult<()> {
        let out = LazyEngine
            .group_by(&sample())?
            .sort(["c"], Default::default())?;

        assert_eq!(out.get_column_names(), vec!["c", "a_mean", "d_sum"]);
        let sum = out.column("d_sum")?.cast(&DataType::Int64)?;
        assert_eq!(sum.i64()?.get(0), Some(100));
        assert_eq!(sum.i64()?.get(1), Some(20));
        let mean = out.column("a_mean")?.f64()?;
        assert!((mean.get(1).unwrap() - 1.1 / 3.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_left_join_without_matches() -> BenchResult<()> {
        let side = df! {
            "id" => Vec::<i64>::new(),
            "value" => Vec::<f64>::new(),
        }
        .unwrap();
        let out = LazyEngine.left_join(&sample(), &side)?;
        assert_eq!(out.height(), 5);
        assert_eq!(out.column("value")?.null_count(), 5);
        Ok(())
    }

    #[test]
    fn test_sort_non_increasing() -> BenchResult<()> {
        let out = LazyEngine.sort(&sample())?;
        let a: Vec<f64> = out.column("a")?.f64()?.into_no_null_iter().collect();
        assert!(a.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(out.height(), 5);
        Ok(())
    }

    #[test]
    fn test_calculate() -> BenchResult<()> {
        let df = sample();
        let out = LazyEngine.calculate(&df)?;
        assert!(df.column("result").is_err());

        let result: Vec<f64> = out.column("result")?.f64()?.into_no_null_iter().collect();
        assert!((result[0] - 0.01).abs() < 1e-12);
        assert!((result[2] - 0.255).abs() < 1e-12);
        Ok(())
    }
}

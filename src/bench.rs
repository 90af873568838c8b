//! Operation benchmarks.
//!
//! Each `benchmark_*` function times exactly one engine operation and drops the
//! result. The `capture_*` variants time the same call and hand the produced
//! frame back so callers can inspect it.

use crate::engine::FrameEngine;
use crate::errors::BenchResult;
use crate::generate::generate_join_side;
use crate::timing::{try_time, Timed};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Filter,
    GroupBy,
    Join,
    Sort,
    Calculate,
}

impl Operation {
    /// Report column order.
    pub const ALL: [Operation; 5] = [
        Operation::Filter,
        Operation::GroupBy,
        Operation::Join,
        Operation::Sort,
        Operation::Calculate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Operation::Filter => "Filter",
            Operation::GroupBy => "GroupBy",
            Operation::Join => "Join",
            Operation::Sort => "Sort",
            Operation::Calculate => "Calculate",
        }
    }
}

/// Seconds spent in each operation for one dataset size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Timings {
    pub filter: f64,
    pub group_by: f64,
    pub join: f64,
    pub sort: f64,
    pub calculate: f64,
}

/// A timed join plus the size of the generated side table.
#[derive(Debug, Clone)]
pub struct JoinCapture<F> {
    pub timed: Timed<F>,
    pub side_rows: usize,
}

fn traced<E: FrameEngine>(
    engine: &E,
    operation: Operation,
    timed: Timed<E::Frame>,
) -> Timed<E::Frame> {
    debug!(
        engine = engine.name(),
        operation = operation.label(),
        rows = engine.height(&timed.value),
        secs = timed.secs(),
        "operation finished"
    );
    timed
}

pub fn capture_filter<E: FrameEngine>(
    engine: &E,
    frame: &E::Frame,
) -> BenchResult<Timed<E::Frame>> {
    let timed = try_time(|| engine.filter(frame))?;
    Ok(traced(engine, Operation::Filter, timed))
}

pub fn capture_group_by<E: FrameEngine>(
    engine: &E,
    frame: &E::Frame,
) -> BenchResult<Timed<E::Frame>> {
    let timed = try_time(|| engine.group_by(frame))?;
    Ok(traced(engine, Operation::GroupBy, timed))
}

/// Generates the side table from a fresh float stream and loads it into the
/// engine, then times the join alone.
pub fn capture_join<E: FrameEngine>(
    engine: &E,
    frame: &E::Frame,
    size: usize,
    seed: u64,
) -> BenchResult<JoinCapture<E::Frame>> {
    let side = generate_join_side(size, seed)?;
    let side_rows = side.height();
    let side = engine.load(&side)?;

    let timed = try_time(|| engine.left_join(frame, &side))?;
    Ok(JoinCapture {
        timed: traced(engine, Operation::Join, timed),
        side_rows,
    })
}

pub fn capture_sort<E: FrameEngine>(
    engine: &E,
    frame: &E::Frame,
) -> BenchResult<Timed<E::Frame>> {
    let timed = try_time(|| engine.sort(frame))?;
    Ok(traced(engine, Operation::Sort, timed))
}

pub fn capture_calculate<E: FrameEngine>(
    engine: &E,
    frame: &E::Frame,
) -> BenchResult<Timed<E::Frame>> {
    let timed = try_time(|| engine.calculate(frame))?;
    Ok(traced(engine, Operation::Calculate, timed))
}

pub fn benchmark_filter<E: FrameEngine>(engine: &E, frame: &E::Frame) -> BenchResult<f64> {
    Ok(capture_filter(engine, frame)?.secs())
}

pub fn benchmark_group_by<E: FrameEngine>(engine: &E, frame: &E::Frame) -> BenchResult<f64> {
    Ok(capture_group_by(engine, frame)?.secs())
}

pub fn benchmark_join<E: FrameEngine>(
    engine: &E,
    frame: &E::Frame,
    size: usize,
    seed: u64,
) -> BenchResult<f64> {
    Ok(capture_join(engine, frame, size, seed)?.timed.secs())
}

pub fn benchmark_sort<E: FrameEngine>(engine: &E, frame: &E::Frame) -> BenchResult<f64> {
    Ok(capture_sort(engine, frame)?.secs())
}

pub fn benchmark_calculate<E: FrameEngine>(engine: &E, frame: &E::Frame) -> BenchResult<f64> {
    Ok(capture_calculate(engine, frame)?.secs())
}

/// Load the table once, then run all five benchmarks in report order against it.
pub fn run_all<E: FrameEngine>(
    engine: &E,
    df: &DataFrame,
    size: usize,
    seed: u64,
) -> BenchResult<Timings> {
    let frame = engine.load(df)?;
    Ok(Timings {
        filter: benchmark_filter(engine, &frame)?,
        group_by: benchmark_group_by(engine, &frame)?,
        join: benchmark_join(engine, &frame, size, seed)?,
        sort: benchmark_sort(engine, &frame)?,
        calculate: benchmark_calculate(engine, &frame)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eager::EagerEngine;
    use crate::frame::PandrsEngine;
    use crate::generate::generate_dataframe;
    use crate::lazy::LazyEngine;
    use crate::random::DEFAULT_SEED;

    fn assert_non_negative(timings: Timings) {
        for secs in [
            timings.filter,
            timings.group_by,
            timings.join,
            timings.sort,
            timings.calculate,
        ] {
            assert!(secs >= 0.0);
        }
    }

    #[test]
    fn test_single_row_timings_non_negative() -> BenchResult<()> {
        let df = generate_dataframe(1)?;
        assert_non_negative(run_all(&EagerEngine, &df, 1, DEFAULT_SEED)?);
        assert_non_negative(run_all(&LazyEngine, &df, 1, DEFAULT_SEED)?);
        assert_non_negative(run_all(&PandrsEngine, &df, 1, DEFAULT_SEED)?);
        Ok(())
    }

    #[test]
    fn test_join_side_rows() -> BenchResult<()> {
        let df = generate_dataframe(1_234)?;
        let capture = capture_join(&EagerEngine, &df, 1_234, 42)?;
        assert_eq!(capture.side_rows, 123);
        assert_eq!(capture.timed.value.height(), 1_234);
        assert_eq!(capture.timed.value.column("value")?.null_count(), 1_234 - 123);
        Ok(())
    }

    #[test]
    fn test_join_follows_seed() -> BenchResult<()> {
        let df = generate_dataframe(100)?;
        let first = capture_join(&LazyEngine, &df, 100, 7)?.timed.into_inner();
        let again = capture_join(&LazyEngine, &df, 100, 7)?.timed.into_inner();
        let other = capture_join(&LazyEngine, &df, 100, 8)?.timed.into_inner();

        assert!(first.equals_missing(&again));
        assert!(!first.equals_missing(&other));
        assert!(benchmark_join(&LazyEngine, &df, 100, 8)? >= 0.0);
        Ok(())
    }

    #[test]
    fn test_operations_do_not_mutate_input() -> BenchResult<()> {
        let df = generate_dataframe(300)?;
        let before = df.clone();
        run_all(&EagerEngine, &df, 300, DEFAULT_SEED)?;
        run_all(&PandrsEngine, &df, 300, DEFAULT_SEED)?;
        assert!(df.equals(&before));
        Ok(())
    }

    #[test]
    fn test_operation_labels() {
        let labels: Vec<&str> = Operation::ALL.iter().map(|op| op.label()).collect();
        assert_eq!(labels, vec!["Filter", "GroupBy", "Join", "Sort", "Calculate"]);
    }
}

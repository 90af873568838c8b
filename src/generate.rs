//! Synthetic table generation.
//!
//! The main table has columns `id`, `a`, `b`, `c`, `d`. Floats come from one
//! stream, labels and integers from another; both start from the same seed on
//! every call, so a given size always yields the same table.

use crate::errors::{BenchError, BenchResult};
use crate::random::{RandomSource, DEFAULT_SEED};
use polars::prelude::*;
use sha2::{Digest, Sha256};
use tracing::trace;

pub const LABELS: [&str; 3] = ["x", "y", "z"];
pub const D_MIN: i32 = 1;
pub const D_MAX: i32 = 99;

/// Ratio between the main table and the join-side table.
pub const JOIN_SIDE_DIVISOR: usize = 10;

pub fn generate_dataframe(size: usize) -> BenchResult<DataFrame> {
    generate_dataframe_with_seed(size, DEFAULT_SEED)
}

pub fn generate_dataframe_with_seed(size: usize, seed: u64) -> BenchResult<DataFrame> {
    if size == 0 {
        return Err(BenchError::InvalidSize(
            "a dataset needs at least one row".to_string(),
        ));
    }

    let mut numeric = RandomSource::new(seed);
    let mut general = RandomSource::new(seed);

    let id: Vec<i64> = (0..size as i64).collect();
    let a = numeric.units(size);
    let b = numeric.units(size);
    let c: Vec<&str> = (0..size).map(|_| *general.choose(&LABELS)).collect();
    let d: Vec<i32> = (0..size)
        .map(|_| general.next_in_range(D_MIN, D_MAX))
        .collect();

    let df = DataFrame::new(vec![
        Series::new("id".into(), id).into(),
        Series::new("a".into(), a).into(),
        Series::new("b".into(), b).into(),
        Series::new("c".into(), c).into(),
        Series::new("d".into(), d).into(),
    ])?;
    trace!(
        seed = numeric.seed(),
        draws = numeric.draws() + general.draws(),
        rows = size,
        "main table generated"
    );
    Ok(df)
}

pub fn join_side_size(main_size: usize) -> usize {
    main_size / JOIN_SIDE_DIVISOR
}

/// Build the `id`/`value` table joined against a main table of `main_size` rows.
pub fn generate_join_side(main_size: usize, seed: u64) -> BenchResult<DataFrame> {
    let size = join_side_size(main_size);
    let mut numeric = RandomSource::new(seed);

    let id: Vec<i64> = (0..size as i64).collect();
    let value = numeric.units(size);

    let df = DataFrame::new(vec![
        Series::new("id".into(), id).into(),
        Series::new("value".into(), value).into(),
    ])?;
    trace!(seed = numeric.seed(), rows = size, "join side generated");
    Ok(df)
}

/// SHA-256 over column names and values, hex encoded.
pub fn fingerprint(df: &DataFrame) -> BenchResult<String> {
    let mut hasher = Sha256::new();

    for column in df.get_columns() {
        hasher.update(column.name().as_bytes());
        match column.dtype() {
            DataType::Float64 => {
                for v in column.f64()?.into_iter() {
                    hasher.update(v.map(f64::to_bits).unwrap_or(u64::MAX).to_le_bytes());
                }
            }
            DataType::Int64 => {
                for v in column.i64()?.into_iter() {
                    hasher.update(v.unwrap_or(i64::MIN).to_le_bytes());
                }
            }
            DataType::Int32 => {
                for v in column.i32()?.into_iter() {
                    hasher.update(v.unwrap_or(i32::MIN).to_le_bytes());
                }
            }
            _ => {
                let as_text = column.cast(&DataType::String)?;
                for v in as_text.str()?.into_iter() {
                    hasher.update(v.unwrap_or("\0").as_bytes());
                    hasher.update([0u8]);
                }
            }
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}

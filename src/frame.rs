//! Operations on pandrs' column-oriented `OptimizedDataFrame`.
//!
//! The generated polars table is copied into pandrs columns by `load` before
//! any timer starts, and results are copied back by `export` for inspection.

use crate::engine::FrameEngine;
use crate::errors::{BenchError, BenchResult};
use pandrs::column::{
    BooleanColumn, Column as PdColumn, Float64Column, Int64Column, StringColumn,
};
use pandrs::optimized::{AggregateOp, ColumnView, LazyFrame, OptimizedDataFrame};
use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series};
use std::collections::HashMap;

const MASK: &str = "__mask";

#[derive(Debug, Clone, Copy, Default)]
pub struct PandrsEngine;

/// Split optional values into a dense vector and a null flag per row.
fn split_nulls<T: Default>(values: impl Iterator<Item = Option<T>>) -> (Vec<T>, Vec<bool>) {
    let (lower, _) = values.size_hint();
    let mut dense = Vec::with_capacity(lower);
    let mut nulls = Vec::with_capacity(lower);
    for value in values {
        nulls.push(value.is_none());
        dense.push(value.unwrap_or_default());
    }
    (dense, nulls)
}

/// Pick `rows` out of a column; `None` rows become nulls.
fn gather(view: &ColumnView, rows: &[Option<usize>]) -> BenchResult<PdColumn> {
    fn pick<T>(
        rows: &[Option<usize>],
        get: impl Fn(usize) -> pandrs::error::Result<Option<T>>,
    ) -> BenchResult<Vec<Option<T>>> {
        rows.iter()
            .map(|row| match row {
                Some(i) => Ok(get(*i)?),
                None => Ok(None),
            })
            .collect()
    }

    let column = if let Some(col) = view.as_float64() {
        let (values, nulls) = split_nulls(pick(rows, |i| col.get(i))?.into_iter());
        PdColumn::Float64(Float64Column::with_nulls(values, nulls))
    } else if let Some(col) = view.as_int64() {
        let (values, nulls) = split_nulls(pick(rows, |i| col.get(i))?.into_iter());
        PdColumn::Int64(Int64Column::with_nulls(values, nulls))
    } else if let Some(col) = view.as_string() {
        let picked = pick(rows, |i| Ok(col.get(i)?.map(str::to_string)))?;
        let (values, nulls) = split_nulls(picked.into_iter());
        PdColumn::String(StringColumn::with_nulls(values, nulls))
    } else if let Some(col) = view.as_boolean() {
        let (values, nulls) = split_nulls(pick(rows, |i| col.get(i))?.into_iter());
        PdColumn::Boolean(BooleanColumn::with_nulls(values, nulls))
    } else {
        return Err(BenchError::PandrsError(format!(
            "unsupported column type {:?}",
            view.column_type()
        )));
    };
    Ok(column)
}

fn float_values(frame: &OptimizedDataFrame, name: &str) -> BenchResult<Vec<Option<f64>>> {
    let view = frame.column(name)?;
    let col = view
        .as_float64()
        .ok_or_else(|| BenchError::PandrsError(format!("column {} is not Float64", name)))?;
    (0..view.len()).map(|i| Ok(col.get(i)?)).collect()
}

fn int_values(frame: &OptimizedDataFrame, name: &str) -> BenchResult<Vec<Option<i64>>> {
    let view = frame.column(name)?;
    let col = view
        .as_int64()
        .ok_or_else(|| BenchError::PandrsError(format!("column {} is not Int64", name)))?;
    (0..view.len()).map(|i| Ok(col.get(i)?)).collect()
}

fn to_pandrs(column: &Column) -> BenchResult<PdColumn> {
    let converted = match column.dtype() {
        DataType::Int32 | DataType::Int64 => {
            let widened = column.cast(&DataType::Int64)?;
            let (values, nulls) = split_nulls(widened.i64()?.into_iter());
            PdColumn::Int64(Int64Column::with_nulls(values, nulls))
        }
        DataType::Float64 => {
            let (values, nulls) = split_nulls(column.f64()?.into_iter());
            PdColumn::Float64(Float64Column::with_nulls(values, nulls))
        }
        DataType::String => {
            let strings = column.str()?.into_iter().map(|s| s.map(str::to_string));
            let (values, nulls) = split_nulls(strings);
            PdColumn::String(StringColumn::with_nulls(values, nulls))
        }
        DataType::Boolean => {
            let (values, nulls) = split_nulls(column.bool()?.into_iter());
            PdColumn::Boolean(BooleanColumn::with_nulls(values, nulls))
        }
        other => {
            return Err(BenchError::PandrsError(format!(
                "column {} has unsupported type {}",
                column.name(),
                other
            )))
        }
    };
    Ok(converted)
}

fn to_polars(name: &str, view: &ColumnView) -> BenchResult<Column> {
    let rows = 0..view.len();
    let series = if let Some(col) = view.as_float64() {
        let values = rows.map(|i| col.get(i)).collect::<Result<Vec<_>, _>>()?;
        Series::new(name.into(), values)
    } else if let Some(col) = view.as_int64() {
        let values = rows.map(|i| col.get(i)).collect::<Result<Vec<_>, _>>()?;
        Series::new(name.into(), values)
    } else if let Some(col) = view.as_string() {
        let values = rows
            .map(|i| Ok(col.get(i)?.map(str::to_string)))
            .collect::<BenchResult<Vec<Option<String>>>>()?;
        Series::new(name.into(), values)
    } else if let Some(col) = view.as_boolean() {
        let values = rows.map(|i| col.get(i)).collect::<Result<Vec<_>, _>>()?;
        Series::new(name.into(), values)
    } else {
        return Err(BenchError::PandrsError(format!(
            "column {} has unsupported type {:?}",
            name,
            view.column_type()
        )));
    };
    Ok(series.into())
}

impl FrameEngine for PandrsEngine {
    type Frame = OptimizedDataFrame;

    fn name(&self) -> &'static str {
        "pandrs"
    }

    fn title(&self) -> String {
        "Rust pandrs Benchmark".to_string()
    }

    fn load(&self, df: &DataFrame) -> BenchResult<OptimizedDataFrame> {
        let mut frame = OptimizedDataFrame::new();
        for column in df.get_columns() {
            frame.add_column(column.name().to_string(), to_pandrs(column)?)?;
        }
        Ok(frame)
    }

    fn export(&self, frame: &OptimizedDataFrame) -> BenchResult<DataFrame> {
        let columns = frame
            .column_names()
            .iter()
            .map(|name| to_polars(name, &frame.column(name)?))
            .collect::<BenchResult<Vec<_>>>()?;
        Ok(DataFrame::new(columns)?)
    }

    fn height(&self, frame: &OptimizedDataFrame) -> usize {
        frame.row_count()
    }

    fn filter(&self, frame: &OptimizedDataFrame) -> BenchResult<OptimizedDataFrame> {
        let mask: Vec<bool> = float_values(frame, "a")?
            .into_iter()
            .map(|a| a.is_some_and(|a| a > 0.5))
            .collect();
        let names: Vec<&str> = frame.column_names().iter().map(String::as_str).collect();

        let mut masked = frame.clone();
        masked.add_column(MASK, PdColumn::Boolean(BooleanColumn::new(mask)))?;
        Ok(masked.filter(MASK)?.select(&names)?)
    }

    fn group_by(&self, frame: &OptimizedDataFrame) -> BenchResult<OptimizedDataFrame> {
        let grouped = LazyFrame::new(frame.clone())
            .aggregate(
                vec!["c".to_string()],
                vec![
                    ("a".to_string(), AggregateOp::Mean, "a_mean".to_string()),
                    ("d".to_string(), AggregateOp::Sum, "d_sum".to_string()),
                ],
            )
            .execute()?;
        Ok(grouped)
    }

    // pandrs' own left_join writes zeros for unmatched rows, so the side
    // columns are gathered through an id index with a null mask instead.
    fn left_join(
        &self,
        frame: &OptimizedDataFrame,
        side: &OptimizedDataFrame,
    ) -> BenchResult<OptimizedDataFrame> {
        let mut index: HashMap<i64, usize> = HashMap::with_capacity(side.row_count());
        for (row, id) in int_values(side, "id")?.into_iter().enumerate() {
            if let Some(id) = id {
                index.entry(id).or_insert(row);
            }
        }
        let matches: Vec<Option<usize>> = int_values(frame, "id")?
            .into_iter()
            .map(|id| id.and_then(|id| index.get(&id).copied()))
            .collect();

        let mut out = frame.clone();
        for name in side.column_names().iter().filter(|name| name.as_str() != "id") {
            out.add_column(name.clone(), gather(&side.column(name)?, &matches)?)?;
        }
        Ok(out)
    }

    fn sort(&self, frame: &OptimizedDataFrame) -> BenchResult<OptimizedDataFrame> {
        let a = float_values(frame, "a")?;
        let mut order: Vec<usize> = (0..a.len()).collect();
        // Nulls last.
        order.sort_by(|&x, &y| match (a[x], a[y]) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (x, y) => y.is_some().cmp(&x.is_some()),
        });
        let rows: Vec<Option<usize>> = order.into_iter().map(Some).collect();

        let mut out = OptimizedDataFrame::new();
        for name in frame.column_names() {
            out.add_column(name.clone(), gather(&frame.column(name)?, &rows)?)?;
        }
        Ok(out)
    }

    fn calculate(&self, frame: &OptimizedDataFrame) -> BenchResult<OptimizedDataFrame> {
        let a = float_values(frame, "a")?;
        let b = float_values(frame, "b")?;
        let d = int_values(frame, "d")?;

        let result = a
            .into_iter()
            .zip(b)
            .zip(d)
            .map(|((a, b), d)| Some(a? * b? / d? as f64));
        let (values, nulls) = split_nulls(result);

        let mut out = frame.clone();
        out.add_column(
            "result",
            PdColumn::Float64(Float64Column::with_nulls(values, nulls)),
        )?;
        Ok(out)
    }
}

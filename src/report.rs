use crate::bench::{run_all, Operation, Timings};
use crate::config::{BenchConfig, OutputFormat};
use crate::eager::EagerEngine;
use crate::engine::{EngineKind, FrameEngine};
use crate::errors::{BenchError, BenchResult};
use crate::frame::PandrsEngine;
use crate::generate::{fingerprint, generate_dataframe_with_seed};
use crate::lazy::LazyEngine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info, info_span, Level};

pub const RULE_WIDTH: usize = 70;

/// One printed line of the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub size: usize,
    pub label: String,
    pub engine: String,
    #[serde(flatten)]
    pub timings: Timings,
    pub timestamp: DateTime<Utc>,
}

/// `2.0M` for a million rows and up, whole thousands (`100K`) below.
pub fn size_label(size: usize) -> String {
    if size >= 1_000_000 {
        format!("{:.1}M", size as f64 / 1_000_000.0)
    } else {
        format!("{}K", size / 1_000)
    }
}

pub fn header_line() -> String {
    let [filter, group_by, join, sort, calculate] = Operation::ALL.map(Operation::label);
    format!(
        "{:<10} {:<12} {:<12} {:<12} {:<12} {:<12}",
        "Size", filter, group_by, join, sort, calculate
    )
}

pub fn rule_line() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn format_row(label: &str, t: &Timings) -> String {
    format!(
        "{:<10} {:<12.4} {:<12.4} {:<12.4} {:<12.4} {:<12.4}",
        label, t.filter, t.group_by, t.join, t.sort, t.calculate
    )
}

fn io_err(e: std::io::Error) -> BenchError {
    BenchError::IoError(e)
}

/// Generate, benchmark and print every configured size in order.
pub fn run_report<W: Write>(config: &BenchConfig, out: &mut W) -> BenchResult<Vec<ReportRow>> {
    config.validate()?;
    match config.engine {
        EngineKind::Eager => report_with(&EagerEngine, config, out),
        EngineKind::Lazy => report_with(&LazyEngine, config, out),
        EngineKind::Pandrs => report_with(&PandrsEngine, config, out),
    }
}

fn report_with<E: FrameEngine, W: Write>(
    engine: &E,
    config: &BenchConfig,
    out: &mut W,
) -> BenchResult<Vec<ReportRow>> {
    info!(
        engine = engine.name(),
        sizes = ?config.sizes,
        seed = config.seed,
        "Starting benchmark"
    );

    if config.format == OutputFormat::Text {
        writeln!(out, "{}", engine.title()).map_err(io_err)?;
        writeln!(out, "{}", rule_line()).map_err(io_err)?;
        writeln!(out, "{}", header_line()).map_err(io_err)?;
        writeln!(out, "{}", rule_line()).map_err(io_err)?;
    }

    let mut rows = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let _span = info_span!("size", rows = size).entered();

        let progress = format!("Generating {} rows... ", size);
        match config.format {
            OutputFormat::Text => {
                write!(out, "{}", progress).map_err(io_err)?;
                out.flush().map_err(io_err)?;
            }
            OutputFormat::Json => eprint!("{}", progress),
        }

        let df = generate_dataframe_with_seed(size, config.seed)?;

        match config.format {
            OutputFormat::Text => writeln!(out, "done!").map_err(io_err)?,
            OutputFormat::Json => eprintln!("done!"),
        }
        if tracing::enabled!(Level::DEBUG) {
            let digest = fingerprint(&df)?;
            debug!(fingerprint = %digest, "Dataset generated");
        }

        let timings = run_all(engine, &df, size, config.seed)?;
        drop(df);

        let row = ReportRow {
            size,
            label: size_label(size),
            engine: engine.name().to_string(),
            timings,
            timestamp: Utc::now(),
        };

        match config.format {
            OutputFormat::Text => {
                writeln!(out, "{}", format_row(&row.label, &row.timings)).map_err(io_err)?
            }
            OutputFormat::Json => {
                let line = serde_json::to_string(&row).map_err(|e| BenchError::Unknown(e.into()))?;
                writeln!(out, "{}", line).map_err(io_err)?;
            }
        }
        out.flush().map_err(io_err)?;

        info!(label = %row.label, "Size completed");
        rows.push(row);
    }

    Ok(rows)
}

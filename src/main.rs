use clap::{Parser, Subcommand};
use framebench::config::{parse_size_list, BenchConfig, ConfigFile, OutputFormat, Overrides};
use framebench::engine::EngineKind;
use framebench::model;
use framebench::observability::{default_level, init_tracing, LogFormat};
use framebench::report::run_report;
use miette::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Parser)]
#[command(name = "framebench")]
#[command(version = "0.1.0")]
#[command(about = "Dataframe operation and logistic regression microbenchmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase logging verbosity (Info -> Debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Silence all logs
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format (text or json)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Time filter, group-by, join, sort and calculate over generated tables
    Run {
        /// Which dataframe engine runs the operations
        #[arg(long, value_enum)]
        engine: Option<EngineKind>,

        /// Comma separated dataset sizes, e.g. "100K,2M,50M"
        #[arg(long, value_name = "LIST")]
        sizes: Option<String>,

        /// YAML file with sizes, engine, format and seed
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Report format on stdout
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Seed for both random streams
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fit and predict the logistic regression model once
    Model,
}

fn run(
    engine: Option<EngineKind>,
    sizes: Option<String>,
    config: Option<PathBuf>,
    format: Option<OutputFormat>,
    seed: Option<u64>,
) -> Result<()> {
    let file = match config {
        Some(path) => {
            info!("Loading benchmark config from {:?}", path);
            Some(ConfigFile::from_path(&path)?)
        }
        None => None,
    };
    let sizes = sizes.as_deref().map(parse_size_list).transpose()?;

    let config = BenchConfig::resolve(
        file,
        Overrides {
            sizes,
            engine,
            format,
            seed,
        },
    )?;

    run_report(&config, &mut std::io::stdout().lock())?;
    Ok(())
}

fn run_model() -> Result<()> {
    let data = model::load_dataset()?;
    info!(
        samples = data.num_samples,
        features = data.num_features,
        "Loaded breast cancer dataset"
    );

    let start = Instant::now();
    let fitted = model::train()?;
    info!(elapsed = ?start.elapsed(), classes = ?fitted.classes(), "Train finished");

    let start = Instant::now();
    let predictions = model::predict()?;
    info!(
        elapsed = ?start.elapsed(),
        predictions = predictions.len(),
        accuracy = model::accuracy(&predictions, &data.y),
        "Predict finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(default_level(cli.quiet, cli.verbose), cli.log_format);

    let run_id = Uuid::new_v4();
    let _span = tracing::info_span!("root", run_id = %run_id).entered();

    match cli.command {
        Some(Commands::Run {
            engine,
            sizes,
            config,
            format,
            seed,
        }) => run(engine, sizes, config, format, seed)?,
        Some(Commands::Model) => run_model()?,
        None => run(None, None, None, None, None)?,
    }

    Ok(())
}

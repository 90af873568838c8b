use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "FRAMEBENCH_LOG";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

pub fn default_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries the report.
pub fn init_tracing(level: Level, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .with_span_list(false)
                .with_current_span(false)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true, true), Level::ERROR);
        assert_eq!(default_level(false, true), Level::DEBUG);
        assert_eq!(default_level(false, false), Level::INFO);
    }
}

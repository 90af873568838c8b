use crate::engine::EngineKind;
use crate::errors::{BenchError, BenchResult};
use crate::random::DEFAULT_SEED;
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dataset sizes benchmarked when nothing else is configured.
pub const DEFAULT_SIZES: [usize; 3] = [100_000, 2_000_000, 50_000_000];

/// Replaces the default sizes of the argument-free harness binaries.
pub const SIZES_ENV: &str = "FRAMEBENCH_SIZES";

const SIZE_PATTERN: &str = r"^\s*([0-9][0-9_]*(?:\.[0-9]+)?)\s*([kKmM]?)\s*$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A size as written in YAML: either a plain count or a string like `2.5M`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Count(usize),
    Text(String),
}

impl SizeValue {
    pub fn resolve(&self) -> BenchResult<usize> {
        match self {
            SizeValue::Count(0) => Err(BenchError::InvalidSize("0".to_string())),
            SizeValue::Count(n) => Ok(*n),
            SizeValue::Text(s) => parse_size(s),
        }
    }
}

/// Benchmark run settings as found in a YAML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub sizes: Option<Vec<SizeValue>>,
    #[serde(default)]
    pub engine: Option<EngineKind>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ConfigFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> BenchResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> BenchResult<Self> {
        serde_yaml::from_str(content).map_err(BenchError::ConfigError)
    }
}

/// Values given on the command line; `None` defers to the file or the default.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sizes: Option<Vec<usize>>,
    pub engine: Option<EngineKind>,
    pub format: Option<OutputFormat>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    pub engine: EngineKind,
    pub format: OutputFormat,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            engine: EngineKind::default(),
            format: OutputFormat::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl BenchConfig {
    pub fn for_engine(engine: EngineKind) -> Self {
        Self {
            engine,
            ..Default::default()
        }
    }

    /// Layer a config file and command-line overrides over the defaults.
    pub fn resolve(file: Option<ConfigFile>, overrides: Overrides) -> BenchResult<Self> {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(sizes) = file.sizes {
                config.sizes = sizes
                    .iter()
                    .map(SizeValue::resolve)
                    .collect::<BenchResult<Vec<_>>>()?;
            }
            if let Some(engine) = file.engine {
                config.engine = engine;
            }
            if let Some(format) = file.format {
                config.format = format;
            }
            if let Some(seed) = file.seed {
                config.seed = seed;
            }
        }

        if let Some(sizes) = overrides.sizes {
            config.sizes = sizes;
        }
        if let Some(engine) = overrides.engine {
            config.engine = engine;
        }
        if let Some(format) = overrides.format {
            config.format = format;
        }
        if let Some(seed) = overrides.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.sizes.is_empty() {
            return Err(BenchError::InvalidSize(
                "at least one size is required".to_string(),
            ));
        }
        if self.sizes.contains(&0) {
            return Err(BenchError::InvalidSize("0".to_string()));
        }
        Ok(())
    }
}

/// Parse `100000`, `100_000`, `100K` or `2.5M` into a row count.
pub fn parse_size(input: &str) -> BenchResult<usize> {
    let re = Regex::new(SIZE_PATTERN).map_err(|e| BenchError::Unknown(e.into()))?;
    let caps = re
        .captures(input)
        .ok_or_else(|| BenchError::InvalidSize(input.to_string()))?;

    let number = caps[1].replace('_', "");
    let multiplier = match &caps[2] {
        "k" | "K" => 1_000.0,
        "m" | "M" => 1_000_000.0,
        _ => 1.0,
    };

    let value: f64 = number
        .parse()
        .map_err(|_| BenchError::InvalidSize(input.to_string()))?;
    let rows = value * multiplier;

    if rows < 1.0 || (rows - rows.round()).abs() > 1e-6 {
        return Err(BenchError::InvalidSize(input.to_string()));
    }
    Ok(rows.round() as usize)
}

/// Parse a comma separated size list, as accepted by `--sizes`.
pub fn parse_size_list(input: &str) -> BenchResult<Vec<usize>> {
    input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_size)
        .collect()
}

/// Settings of a harness binary: defaults for `engine`, sizes from
/// `FRAMEBENCH_SIZES` when it is set.
pub fn harness_config(engine: EngineKind) -> BenchResult<BenchConfig> {
    harness_config_from(engine, std::env::var(SIZES_ENV).ok().as_deref())
}

fn harness_config_from(engine: EngineKind, sizes: Option<&str>) -> BenchResult<BenchConfig> {
    let mut config = BenchConfig::for_engine(engine);
    if let Some(list) = sizes {
        config.sizes = parse_size_list(list)?;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_forms() {
        assert_eq!(parse_size("100000").unwrap(), 100_000);
        assert_eq!(parse_size("100_000").unwrap(), 100_000);
        assert_eq!(parse_size("100K").unwrap(), 100_000);
        assert_eq!(parse_size("2M").unwrap(), 2_000_000);
        assert_eq!(parse_size(" 2.5m ").unwrap(), 2_500_000);
        assert_eq!(parse_size("1.5k").unwrap(), 1_500);
    }

    #[test]
    fn test_parse_size_rejects() {
        for bad in ["", "0", "-5", "abc", "1.5", "10G", "0.0001K"] {
            assert!(
                matches!(parse_size(bad), Err(BenchError::InvalidSize(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_size_list() {
        assert_eq!(
            parse_size_list("1000, 2K,3_000").unwrap(),
            vec![1_000, 2_000, 3_000]
        );
    }

    #[test]
    fn test_defaults() {
        let config = BenchConfig::resolve(None, Overrides::default()).unwrap();
        assert_eq!(config.sizes, vec![100_000, 2_000_000, 50_000_000]);
        assert_eq!(config.engine, EngineKind::Eager);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_harness_binaries_config() {
        for kind in EngineKind::ALL {
            let config = harness_config_from(kind, None).unwrap();
            assert_eq!(config, BenchConfig::for_engine(kind));
            assert_eq!(config.engine, kind);
            assert_eq!(config.sizes, DEFAULT_SIZES.to_vec());
            assert_eq!(config.format, OutputFormat::Text);
            assert_eq!(config.seed, DEFAULT_SEED);
        }

        let small = harness_config_from(EngineKind::Pandrs, Some("1K, 2_000")).unwrap();
        assert_eq!(small.sizes, vec![1_000, 2_000]);
        assert_eq!(small.seed, DEFAULT_SEED);

        let err = harness_config_from(EngineKind::Eager, Some("")).unwrap_err();
        assert!(matches!(err, BenchError::InvalidSize(_)));
    }

    #[test]
    fn test_file_then_overrides() {
        let file = ConfigFile::from_yaml(
            r#"
sizes: [1000, "2K"]
engine: lazy
format: json
seed: 7
"#,
        )
        .unwrap();
        let config = BenchConfig::resolve(
            Some(file),
            Overrides {
                engine: Some(EngineKind::Eager),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.sizes, vec![1_000, 2_000]);
        assert_eq!(config.engine, EngineKind::Eager);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = ConfigFile::from_yaml("rows: 10").unwrap_err();
        assert!(matches!(err, BenchError::ConfigError(_)));
    }

    #[test]
    fn test_zero_size_rejected() {
        let file = ConfigFile::from_yaml("sizes: [0]").unwrap();
        assert!(BenchConfig::resolve(Some(file), Overrides::default()).is_err());

        let empty = Overrides {
            sizes: Some(vec![]),
            ..Default::default()
        };
        assert!(BenchConfig::resolve(None, empty).is_err());
    }
}

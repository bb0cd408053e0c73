use clap::{Arg, ArgMatches};
use std::str::FromStr;

use crate::grid::ChunkSpec;

/// Physical constants used by the moisture physics
#[derive(Clone, Debug)]
pub struct Constants {
    /// Offset between the Kelvin and Celsius scales (K)
    pub celsius_offset: f64,
    /// Gas constant for dry air (J/(kg·K))
    pub r_dry: f64,
    /// Gas constant of water vapor (J/(kg·K))
    pub rv: f64,

    // Bolton (1980) saturation vapour pressure: es = es_ref * exp(es_a * Tc / (Tc + es_b))
    /// Saturation vapour pressure at 0 degC (Pa)
    pub es_ref: f64,
    pub es_a: f64,
    /// degC
    pub es_b: f64,

    // Bolton (1980) Eq. 15 for the LCL temperature
    /// K
    pub lcl_offset: f64,
    pub lcl_scale: f64,

    /// Poisson exponent Rd/cp for dry air
    pub kappa_dry: f64,
    /// Mixing-ratio correction of the Poisson exponent
    pub kappa_moisture: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            celsius_offset: 273.15,
            r_dry: 287.04,
            rv: 461.5,

            es_ref: 611.2,
            es_a: 17.67,
            es_b: 243.5,

            lcl_offset: 56.0,
            lcl_scale: 800.0,

            kappa_dry: 0.2854,
            kappa_moisture: 0.28,
        }
    }
}

impl Constants {
    /// Ratio of the gas constants of dry air and water vapour
    pub fn epsilon(&self) -> f64 {
        self.r_dry / self.rv
    }
}

/// Settings for building and materializing transform graphs
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Size of the fixed worker pool
    pub num_workers: usize,
    /// Chunking per axis; axes beyond the list are chunked automatically
    pub chunks: Vec<ChunkSpec>,
    /// Element budget per chunk shared by automatically chunked axes
    pub target_chunk_elements: usize,
    /// Log progress every this many completed chunks (0 disables)
    pub progress_interval: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            num_workers: 4,
            chunks: Vec::new(),
            target_chunk_elements: 1 << 20,
            progress_interval: 0,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.num_workers == 0 {
            return Err("Number of workers must be at least 1".to_string());
        }
        if self.target_chunk_elements == 0 {
            return Err("Target chunk size must be at least 1 element".to_string());
        }
        if self.chunks.iter().any(|c| matches!(c, ChunkSpec::Explicit(0))) {
            return Err("Explicit chunk sizes must be positive".to_string());
        }
        Ok(())
    }
}

/// Names of the input and output variables of the wet-bulb workflow
#[derive(Clone, Debug)]
pub struct VariableNames {
    /// Surface pressure (Pa)
    pub pressure: String,
    /// 2 m temperature (K)
    pub temperature: String,
    /// 2 m dewpoint temperature (K)
    pub dewpoint: String,
    /// Derived wet-bulb temperature
    pub output: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            pressure: "sp".to_string(),
            temperature: "t2m".to_string(),
            dewpoint: "d2m".to_string(),
            output: "tw".to_string(),
        }
    }
}

/// Main configuration structure with CLI support
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub constants: Constants,
    pub pipeline: PipelineConfig,
    pub variables: VariableNames,
}

impl Config {
    /// Arguments shared by every subcommand that runs the pipeline
    pub fn pipeline_args() -> Vec<Arg> {
        vec![
            Arg::new("workers")
                .short('j')
                .long("workers")
                .value_name("COUNT")
                .help("Number of worker threads")
                .default_value("4"),
            Arg::new("chunks")
                .short('c')
                .long("chunks")
                .value_name("SPEC")
                .help("Chunk size per axis, comma separated, e.g. auto,90,180")
                .default_value("auto"),
            Arg::new("target-chunk-elements")
                .long("target-chunk-elements")
                .value_name("COUNT")
                .help("Element budget per chunk for automatically chunked axes")
                .default_value("1048576"),
            Arg::new("progress-interval")
                .long("progress-interval")
                .value_name("CHUNKS")
                .help("Log progress every N completed chunks (0 disables)")
                .default_value("0"),
        ]
    }

    /// Build configuration from parsed arguments of [`Config::pipeline_args`]
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, String> {
        let pipeline = PipelineConfig {
            num_workers: parse_arg(matches, "workers")?,
            chunks: Self::parse_chunk_spec(&parse_arg::<String>(matches, "chunks")?)?,
            target_chunk_elements: parse_arg(matches, "target-chunk-elements")?,
            progress_interval: parse_arg(matches, "progress-interval")?,
        };

        let config = Self {
            pipeline,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a comma separated chunk specification such as `auto,4,auto`
    pub fn parse_chunk_spec(spec: &str) -> Result<Vec<ChunkSpec>, String> {
        spec.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "auto" => Ok(ChunkSpec::Auto),
                n => n
                    .parse::<usize>()
                    .map(ChunkSpec::Explicit)
                    .map_err(|_| format!("Invalid chunk size: {}", n)),
            })
            .collect()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        self.pipeline.validate()?;
        if self.constants.rv <= 0.0 || self.constants.r_dry <= 0.0 {
            return Err("Gas constants must be positive".to_string());
        }
        Ok(())
    }
}

/// Read an argument and parse it, reporting the argument name on failure
pub fn parse_arg<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, String> {
    let raw = matches
        .get_one::<String>(name)
        .ok_or_else(|| format!("Missing argument: --{}", name))?;
    raw.parse()
        .map_err(|_| format!("Invalid value for --{}: {}", name, raw))
}

//! Command-line argument parsing for the grotto generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Grotto command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "grotto", about = "Cave world generation demo")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Horizontal region size in voxels.
    #[arg(long)]
    pub region_size: Option<u32>,

    /// Cave noise threshold (-1.0 to 1.0).
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of regions per side of the generated grid.
    #[arg(long, default_value_t = 4)]
    pub grid: u32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(size) = args.region_size {
            self.world.region_size = size;
        }
        if let Some(threshold) = args.threshold {
            self.caves.threshold = threshold;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs {
            seed: None,
            region_size: None,
            threshold: None,
            log_level: None,
            config: None,
            grid: 4,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(777),
            log_level: Some("debug".to_string()),
            ..no_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 777);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.world.region_size, 32);
        assert_eq!(config.caves.threshold, -0.15);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&no_args());
        assert_eq!(config, original);
    }
}

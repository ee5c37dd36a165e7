//! Figure run configuration

use std::path::{Path, PathBuf};

use matrix_diagrams::config::Config;
use matrix_diagrams::core::config::DiagramConfig;
use matrix_diagrams::render::OutputFormat;
use serde::{Deserialize, Serialize};

use crate::error::FigureError;

/// Environment variable naming an alternative configuration file
pub const CONFIG_ENV_VAR: &str = "CALCULUS_FIGURES_CONFIG";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "figures.toml";

/// # Figures Configuration
///
/// Where figures go, which formats are written and the seed behind every
/// randomly generated matrix. Drawing style lives in [`DiagramConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FiguresConfig {
    /// Directory receiving the figure files
    pub output_dir: PathBuf,

    /// Formats written for every figure
    pub formats: Vec<OutputFormat>,

    /// Seed for random figure data
    pub seed: u64,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Drawing style shared by all figures
    pub diagram: DiagramConfig,
}

impl FiguresConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("figures"),
            formats: vec![OutputFormat::Svg, OutputFormat::Png],
            seed: 42,
            log_level: "info".to_string(),
            diagram: DiagramConfig::default(),
        }
    }

    /// Set output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set output formats
    pub fn with_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Set random seed
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Path of the configuration file to read
    ///
    /// `CALCULUS_FIGURES_CONFIG` wins over `figures.toml`.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, FigureError> {
        let config = Self::load_or_default(path)?;
        config.validate().map_err(FigureError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.formats.is_empty() {
            return Err("At least one output format is required".to_string());
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err("Output directory cannot be empty".to_string());
        }

        self.diagram.validate()
    }
}

impl Default for FiguresConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for FiguresConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FiguresConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert_eq!(config.formats, vec![OutputFormat::Svg, OutputFormat::Png]);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(FiguresConfig::new().with_formats(Vec::new()).validate().is_err());
        assert!(FiguresConfig::new().with_output_dir("").validate().is_err());

        let mut config = FiguresConfig::new();
        config.diagram.layout.cell_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let path = std::env::temp_dir().join("calculus_figures_partial.toml");
        std::fs::write(&path, "seed = 7\nformats = [\"svg\"]\n\n[diagram.layout]\ncell_size = 24.0\n").unwrap();

        let config = FiguresConfig::load(&path).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.formats, vec![OutputFormat::Svg]);
        assert_eq!(config.diagram.layout.cell_size, 24.0);
        assert_eq!(config.diagram.layout.spacing, DiagramConfig::default().layout.spacing);
        assert_eq!(config.output_dir, PathBuf::from("figures"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("calculus_figures_does_not_exist.toml");
        let config = FiguresConfig::load(&path).unwrap();
        assert_eq!(config.seed, FiguresConfig::default().seed);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = std::env::temp_dir().join("calculus_figures_round_trip.ron");
        let config = FiguresConfig::new().with_seed(99).with_formats(vec![OutputFormat::Png]);
        config.save_to_file(&path).unwrap();

        let loaded = FiguresConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.seed, 99);
        assert_eq!(loaded.formats, vec![OutputFormat::Png]);

        std::fs::remove_file(&path).ok();
    }
}

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::{DATASETS, DEFAULT_METHODS};
use crate::error::{Result, RpfLabError};
use crate::scene::{DEFAULT_NUM_POINTS, DEFAULT_OVERLAP_TAU, DEFAULT_SEED};
use crate::{Metric, Page, Selection};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpfLabConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

impl RpfLabConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RpfLabError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: RpfLabConfig = serde_json::from_str(&contents).map_err(|e| {
            RpfLabError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Loads `path` when given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub page: Page,
    pub datasets: Vec<String>,
    pub methods: Vec<String>,
    pub metrics: Vec<Metric>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            page: Page::MetricComparison,
            datasets: DATASETS.iter().map(|d| d.to_string()).collect(),
            methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
            metrics: vec![Metric::RotationError, Metric::TranslationError],
        }
    }
}

impl DefaultsConfig {
    pub fn selection(&self) -> Selection {
        Selection {
            datasets: self.datasets.clone(),
            methods: self.methods.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Width of the longest bar in text charts
    pub bar_width: usize,
    /// Decimal places in text output
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            bar_width: 40,
            precision: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub seed: u64,
    pub num_points: usize,
    pub overlap_tau: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            num_points: DEFAULT_NUM_POINTS,
            overlap_tau: DEFAULT_OVERLAP_TAU,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = RpfLabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(RpfLabError::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_selection_defaults() {
        let config = RpfLabConfig::default();
        assert_eq!(config.defaults.selection(), Selection::default());
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.scene.seed, 42);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RpfLabConfig =
            serde_json::from_str(r#"{ "output": { "format": "csv", "bar_width": 20, "precision": 2 } }"#)
                .unwrap();
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.output.bar_width, 20);
        assert_eq!(config.defaults, DefaultsConfig::default());
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(RpfLabError::UnknownFormat(_))
        ));
    }
}

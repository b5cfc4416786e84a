//! Metrics Configuration
//!
//! Loads the output layout for a training run from YAML:
//!
//! ```yaml
//! output_dir: ./summaries
//! run_id: ppo
//! brains:
//!   - Walker
//!   - Crawler
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// Default directory metrics files are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "./summaries";

/// Default run identifier used in file names.
pub const DEFAULT_RUN_ID: &str = "ppo";

/// Where and for which brains metrics are recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Directory holding one CSV file per brain
    pub output_dir: PathBuf,
    /// Identifier of the training run, prefixed to every file name
    pub run_id: String,
    /// Brains to create sessions for
    pub brains: Vec<String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            run_id: DEFAULT_RUN_ID.to_string(),
            brains: Vec::new(),
        }
    }
}

impl MetricsConfig {
    /// Parses a configuration from YAML text and validates it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: MetricsConfig = serde_yaml::from_str(yaml).map_err(|e| {
            MetricsError::Config(format!("failed to parse metrics YAML: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// CSV path for `brain`: `{output_dir}/{run_id}_{brain}.csv`.
    pub fn csv_path(&self, brain: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{}.csv", self.run_id, brain))
    }

    /// Rejects an empty run id, empty or duplicate brain names, and names
    /// that would place a file outside `output_dir`.
    pub fn validate(&self) -> Result<()> {
        if self.run_id.trim().is_empty() {
            return Err(MetricsError::Config("run_id must not be empty".to_string()));
        }
        check_file_name_part("run_id", &self.run_id)?;

        let mut seen = HashSet::new();
        for brain in &self.brains {
            if brain.trim().is_empty() {
                return Err(MetricsError::Config(
                    "brain names must not be empty".to_string(),
                ));
            }
            check_file_name_part("brain name", brain)?;
            if !seen.insert(brain.as_str()) {
                return Err(MetricsError::Config(format!(
                    "brain '{}' is listed more than once",
                    brain
                )));
            }
        }

        Ok(())
    }
}

/// Names are embedded in a single file name, so they may not contain path
/// separators or parent-directory references.
fn check_file_name_part(what: &str, name: &str) -> Result<()> {
    if name.contains(&['/', '\\'][..]) || name.contains("..") {
        return Err(MetricsError::Config(format!(
            "{} '{}' must not contain path separators or '..'",
            what, name
        )));
    }
    Ok(())
}

/// Loads and validates a metrics configuration file.
///
/// # Example
///
/// ```rust,no_run
/// use trainer_metrics::config::load_config;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_config("metrics.yaml")?;
///     println!("Recording {} brains", config.brains.len());
///     Ok(())
/// }
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MetricsConfig> {
    let path = path.as_ref();
    info!("Loading metrics configuration from: {}", path.display());

    let yaml = fs::read_to_string(path).map_err(|source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("YAML content loaded ({} bytes)", yaml.len());

    MetricsConfig::from_yaml_str(&yaml)
}

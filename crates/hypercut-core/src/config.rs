//! Analysis configuration loaded from `hypercut.toml`.
//!
//! Lookup order, first hit wins:
//! 1. an explicit path (`--config`),
//! 2. `hypercut.toml` in the working directory,
//! 3. `<user config dir>/hypercut/config.toml`,
//! 4. built-in defaults.
//!
//! Every field has a default, so partial files are fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::TextFormat;

pub const PROJECT_CONFIG_FILE: &str = "hypercut.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub input: TextFormat,
    #[serde(default)]
    pub spectral: SpectralConfig,
    #[serde(default)]
    pub random_walk: RandomWalkConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralConfig {
    /// Nodes whose Fiedler-vector entry is `>= threshold` land in the first part.
    #[serde(default)]
    pub threshold: f64,
    /// Refuse to cut a hypergraph with more than one connected component.
    #[serde(default = "default_true")]
    pub require_connected: bool,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            require_connected: default_true(),
        }
    }
}

/// How successive random-walk iterates are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceCheck {
    /// Not converged while some `pi[i] - pi_star[i] > tolerance`.
    /// Entries that grew by more than the tolerance are ignored.
    #[default]
    OneSided,
    /// Not converged while some `|pi[i] - pi_star[i]| > tolerance`.
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomWalkConfig {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default)]
    pub convergence: ConvergenceCheck,
    /// Seed for the random starting vectors. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
            convergence: ConvergenceCheck::default(),
            seed: None,
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_tolerance() -> f64 {
    1e-4
}

const fn default_max_iter() -> usize {
    10_000
}

/// Parse a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config_file(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve and load the effective configuration.
///
/// Returns the config and the file it came from (`None` for defaults).
///
/// # Errors
///
/// Returns an error if `explicit` is given but unreadable, or if any
/// discovered file fails to parse.
pub fn load_config(
    explicit: Option<&Path>,
    working_dir: &Path,
) -> Result<(AnalysisConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((load_config_file(path)?, Some(path.to_path_buf())));
    }

    let candidates = [
        Some(working_dir.join(PROJECT_CONFIG_FILE)),
        dirs::config_dir().map(|d| d.join("hypercut/config.toml")),
    ];

    for path in candidates.into_iter().flatten() {
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            return Ok((load_config_file(&path)?, Some(path)));
        }
    }

    Ok((AnalysisConfig::default(), None))
}

//! Workspace configuration.
//!
//! Configuration layers, later sources taking precedence:
//! 1. Bundled defaults (`include_str!` from `slidesmith.toml`)
//! 2. User overrides (`./slidesmith.toml`)
//! 3. Environment variables with the `SLIDESMITH_` prefix

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use slidesmith_core::{GenerationOptions, GenerationOptionsBuilder};
use slidesmith_error::{ConfigError, SlidesmithResult};
use std::path::PathBuf;
use tracing::debug;

/// Bundled default configuration.
const DEFAULTS: &str = include_str!("../slidesmith.toml");

/// Resolved workspace configuration.
///
/// # Examples
///
/// ```
/// use slidesmith::SlidesmithConfig;
///
/// let config = SlidesmithConfig::load().unwrap();
/// assert!(config.max_prompt_chars > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SlidesmithConfig {
    /// Model name passed to the generation client
    pub model: String,
    /// Generation endpoint URL
    pub endpoint: String,
    /// Directory holding stage prompt skeletons
    pub prompt_dir: PathBuf,
    /// Directory holding template subdirectories
    pub templates_dir: PathBuf,
    /// Maximum rendered prompt length in characters
    pub max_prompt_chars: usize,
    /// Unit-count estimate used for progress totals before composition
    pub estimated_units: usize,
    /// Script length divided by this yields the analysis argument-flow budget
    pub flow_divisor: usize,
}

impl SlidesmithConfig {
    /// Load configuration from bundled defaults, an optional
    /// `./slidesmith.toml`, and `SLIDESMITH_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an override file is malformed or a value fails to
    /// deserialize.
    pub fn load() -> SlidesmithResult<Self> {
        // Pick up a local .env before reading environment overrides.
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::with_name("slidesmith").required(false))
            .add_source(Environment::with_prefix("SLIDESMITH"))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build config: {}", e)))?;

        let resolved: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to deserialize config: {}", e)))?;

        debug!(
            model = %resolved.model,
            endpoint = %resolved.endpoint,
            "Loaded configuration"
        );
        Ok(resolved)
    }

    /// Generation options derived from this configuration.
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptionsBuilder::default()
            .model(self.model.clone())
            .max_prompt_chars(self.max_prompt_chars)
            .estimated_units(self.estimated_units)
            .flow_divisor(self.flow_divisor)
            .build()
            .unwrap_or_default()
    }
}

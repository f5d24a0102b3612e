//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use serde::Deserialize;
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use std::path::Path;
use thiserror::Error;

use crate::application::LaunchConfig;
use crate::domain::{NetworkMode, DEFAULT_COMPUTE_UNIT_LIMIT};

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkSection,
    pub solana: SolanaSection,
    #[serde(default)]
    pub launch: LaunchSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Which pump.fun address set to use
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkSection {
    #[serde(default)]
    pub mode: NetworkMode,
}

/// Solana RPC configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct SolanaSection {
    /// RPC endpoint (use private RPC for production)
    pub rpc_url: String,
    /// Commitment level for reads: "processed", "confirmed", "finalized"
    #[serde(default = "default_commitment")]
    pub commitment: String,
    /// Wallet keypair path (NEVER commit this file!)
    pub keypair_path: String,
}

impl SolanaSection {
    /// Get RPC URL with environment variable override
    /// Checks SOLANA_RPC_URL env var first, falls back to config value
    pub fn get_rpc_url(&self) -> String {
        std::env::var("SOLANA_RPC_URL").unwrap_or_else(|_| self.rpc_url.clone())
    }

    /// Get keypair path with environment variable override
    /// Checks SOLANA_KEYPAIR_PATH env var first, falls back to config value
    pub fn get_keypair_path(&self) -> String {
        std::env::var("SOLANA_KEYPAIR_PATH").unwrap_or_else(|_| self.keypair_path.clone())
    }

    pub fn commitment_config(&self) -> Result<CommitmentConfig, ConfigError> {
        parse_commitment(&self.commitment)
    }
}

/// Launch transaction settings
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchSection {
    #[serde(default = "default_compute_unit_limit")]
    pub compute_unit_limit: u32,
    /// Ceiling on the estimated priority fee; unset means no ceiling
    #[serde(default)]
    pub max_priority_fee_micro_lamports: Option<u64>,
    /// Slippage used when the CLI is not given one
    #[serde(default = "default_slippage_percent")]
    pub default_slippage_percent: f64,
    #[serde(default = "default_commitment")]
    pub confirm_commitment: String,
}

impl Default for LaunchSection {
    fn default() -> Self {
        Self {
            compute_unit_limit: default_compute_unit_limit(),
            max_priority_fee_micro_lamports: None,
            default_slippage_percent: default_slippage_percent(),
            confirm_commitment: default_commitment(),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_compute_unit_limit() -> u32 {
    DEFAULT_COMPUTE_UNIT_LIMIT
}

fn default_slippage_percent() -> f64 {
    10.0
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Parse "processed" / "confirmed" / "finalized"
pub fn parse_commitment(value: &str) -> Result<CommitmentConfig, ConfigError> {
    let commitment = match value.trim().to_ascii_lowercase().as_str() {
        "processed" => CommitmentLevel::Processed,
        "confirmed" => CommitmentLevel::Confirmed,
        "finalized" => CommitmentLevel::Finalized,
        other => {
            return Err(ConfigError::ValidationError(format!(
                "unknown commitment '{}', expected processed, confirmed or finalized",
                other
            )))
        }
    };
    Ok(CommitmentConfig { commitment })
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solana.rpc_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "rpc_url cannot be empty".to_string(),
            ));
        }

        if self.solana.keypair_path.is_empty() {
            return Err(ConfigError::ValidationError(
                "keypair_path cannot be empty".to_string(),
            ));
        }

        self.solana.commitment_config()?;
        parse_commitment(&self.launch.confirm_commitment)?;

        if self.launch.compute_unit_limit == 0 {
            return Err(ConfigError::ValidationError(
                "compute_unit_limit must be > 0".to_string(),
            ));
        }

        let slippage = self.launch.default_slippage_percent;
        if !slippage.is_finite() || !(0.0..=100.0).contains(&slippage) {
            return Err(ConfigError::ValidationError(format!(
                "default_slippage_percent must be 0-100, got {}",
                slippage
            )));
        }

        Ok(())
    }

    /// Launcher settings from the `[launch]` section
    pub fn launch_config(&self) -> Result<LaunchConfig, ConfigError> {
        Ok(LaunchConfig {
            compute_unit_limit: self.launch.compute_unit_limit,
            max_priority_fee: self.launch.max_priority_fee_micro_lamports,
            confirm_commitment: parse_commitment(&self.launch.confirm_commitment)?,
        })
    }
}

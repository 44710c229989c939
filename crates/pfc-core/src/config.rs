//! Application configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pfc/config/pfc.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::ai::AiOptions;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/pfc.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Printed in front of every amount
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                currency_symbol: "৳".to_string(),
            },
            ai: AiConfig {
                timeout: Duration::from_secs(60),
                temperature: 0.7,
            },
        }
    }
}

impl AppConfig {
    /// Load from the default override location, else the embedded defaults
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::parse(DEFAULT_CONFIG),
        }
    }

    /// Load from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse TOML, filling missing keys from the defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(display) = raw.display {
            if let Some(symbol) = display.currency_symbol {
                config.display.currency_symbol = symbol;
            }
        }

        if let Some(ai) = raw.ai {
            if let Some(secs) = ai.timeout_secs {
                if secs == 0 {
                    return Err(Error::Config("ai.timeout_secs must be positive".into()));
                }
                config.ai.timeout = Duration::from_secs(secs);
            }
            if let Some(temperature) = ai.temperature {
                if !(0.0..=2.0).contains(&temperature) {
                    return Err(Error::Config(format!(
                        "ai.temperature must be between 0 and 2, got {}",
                        temperature
                    )));
                }
                config.ai.temperature = temperature;
            }
        }

        Ok(config)
    }

    /// Backend request options derived from the `[ai]` table
    pub fn ai_options(&self) -> AiOptions {
        AiOptions {
            temperature: self.ai.temperature,
            timeout: self.ai.timeout,
        }
    }

    /// Format an amount with the configured currency symbol. A minus sign goes
    /// in front of the symbol.
    pub fn money(&self, amount: f64) -> String {
        let digits = format!("{:.2}", amount.abs());
        let sign = if amount < 0.0 && digits != "0.00" { "-" } else { "" };
        format!("{}{}{}", sign, self.display.currency_symbol, digits)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pfc").join("config").join("pfc.toml"))
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    display: Option<RawDisplay>,
    ai: Option<RawAi>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAi {
    timeout_secs: Option<u64>,
    temperature: Option<f32>,
}

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BinanceProviderConfig {
    pub base_url: String,
    /// Upper bound for a single quote request.
    pub timeout_secs: u64,
}

impl Default for BinanceProviderConfig {
    fn default() -> Self {
        BinanceProviderConfig {
            base_url: "https://api.binance.com".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ProvidersConfig {
    pub binance: BinanceProviderConfig,
}

/// Reference currencies used when valuing holdings.
///
/// Each holding is priced against `quote_currency`, and a single
/// `quote_currency`/`fiat_currency` cross rate converts it further.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ValuationConfig {
    pub quote_currency: String,
    /// Label printed for `quote_currency` amounts.
    pub quote_label: String,
    pub fiat_currency: String,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        ValuationConfig {
            quote_currency: "USDT".to_string(),
            quote_label: "USD".to_string(),
            fiat_currency: "RUB".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    pub valuation: ValuationConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to
    /// built-in defaults when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "wallet-tracker", "wallet-tracker")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

use crate::format::DEFAULT_CURRENCY_SYMBOL;
use crate::pricing::{PriceTable, PricingMode};
use crate::session::SessionStore;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Deployment settings for an estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub pricing_mode: PricingMode,
    pub currency_symbol: String,
    /// Custom price table; the built-in table is used when absent.
    pub price_table_path: Option<PathBuf>,
    /// Where session metadata lives; `~/.spraycalc/session.json` when absent.
    pub session_path: Option<PathBuf>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            pricing_mode: PricingMode::Flat,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            price_table_path: None,
            session_path: None,
        }
    }
}

impl EstimatorConfig {
    /// Load settings from the provided path. Missing files yield the defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
        let config: EstimatorConfig =
            serde_json::from_slice(&data).context("deserialize estimator config")?;
        Ok(config)
    }

    /// Resolve the default config path (`~/.spraycalc/config.json`).
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
        Ok(home.join(".spraycalc").join("config.json"))
    }

    /// The configured price table, or the built-in one.
    pub fn price_table(&self) -> Result<PriceTable> {
        match &self.price_table_path {
            Some(path) => PriceTable::load_from_path(path),
            None => PriceTable::builtin(),
        }
    }

    pub fn session_store(&self) -> Result<SessionStore> {
        match &self.session_path {
            Some(path) => Ok(SessionStore::new(path.clone())),
            None => SessionStore::at_default_path(),
        }
    }
}

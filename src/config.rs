use crate::history::InsertionOrder;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "cart-checkout.toml";
pub const ENV_PREFIX: &str = "CART";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub history: HistorySettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    pub path: PathBuf, // sled directory
    pub cart_key: String,
    pub order_history_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistorySettings {
    pub insertion_order: InsertionOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub date_format: String,
    pub currency_symbol: String,
}

impl Settings {
    /// Reads the config file (if any) and `CART__*` environment overrides.
    /// A missing or broken default file falls back to defaults; an explicitly
    /// requested file that cannot be read is an error.
    pub fn load(config_path: Option<&str>) -> Result<Self, SettingsError> {
        match Self::load_from_sources(config_path) {
            Ok(settings) => Ok(settings),
            Err(err) if config_path.is_none() => {
                warn!("Could not read config file: {err}. Using default configuration.");
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    fn load_from_sources(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cart-data"),
            cart_key: "@cart_items".to_string(),
            order_history_key: "@order_history".to_string(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
            currency_symbol: "₱".to_string(),
        }
    }
}

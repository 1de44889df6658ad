//! # Configuration
//!
//! Where the gateway lives and how amounts are displayed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the CLI)          │
//! │     --gateway http://10.0.0.5:8080                                     │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     VENTAS_GATEWAY_URL=http://10.0.0.5:8080                            │
//! │     VENTAS_TIMEOUT_SECS=5                                              │
//! │     VENTAS_CURRENCY_SYMBOL=€                                           │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/ventas/ventas.toml (Linux)                               │
//! │     ~/Library/Application Support/com.ventas.cli/ventas.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, 30s timeout, "$" with 2 decimals            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # ventas.toml
//! [gateway]
//! base_url = "http://localhost:8080"
//! timeout_secs = 30
//!
//! [display]
//! currency_symbol = "$"
//! currency_decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{GatewayError, GatewayResult};

/// Address of the gateway when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

// =============================================================================
// Gateway Settings
// =============================================================================

/// Connection settings for the REST gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Base address; resource groups are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for GatewaySettings {
    fn default() -> Self {
        GatewaySettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// How money is rendered in tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Decimal places shown (0-2).
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewaySettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (ventas.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> GatewayResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file, returning the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> GatewayResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| GatewayError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GatewayError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| GatewayError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GatewayResult<()> {
        self.base_url()?;

        if self.gateway.timeout_secs == 0 {
            return Err(GatewayError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.display.currency_decimals > 2 {
            return Err(GatewayError::InvalidConfig(format!(
                "currency_decimals must be between 0 and 2, got: {}",
                self.display.currency_decimals
            )));
        }

        Ok(())
    }

    /// Parses the base URL, which must be http or https.
    pub fn base_url(&self) -> GatewayResult<Url> {
        let url = Url::parse(&self.gateway.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidUrl(format!(
                "Gateway URL must start with http:// or https://, got: {}",
                self.gateway.base_url
            )));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.gateway.timeout_secs)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup; unparsable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VENTAS_GATEWAY_URL") {
            debug!(url = %url, "Overriding gateway URL from environment");
            self.gateway.base_url = url;
        }

        if let Some(timeout) = lookup("VENTAS_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.gateway.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid VENTAS_TIMEOUT_SECS"),
            }
        }

        if let Some(symbol) = lookup("VENTAS_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ventas", "cli")
            .map(|dirs| dirs.config_dir().join("ventas.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("ventas-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.gateway.base_url, "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.display.currency_symbol, "$");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.gateway.base_url = "ws://localhost:8080".to_string();
        assert!(matches!(config.validate(), Err(GatewayError::InvalidUrl(_))));

        config.gateway.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.gateway.base_url = "https://ventas.example.com/api/".to_string();
        assert!(config.validate().is_ok());

        config.gateway.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(GatewayError::InvalidConfig(_))));

        config.gateway.timeout_secs = 5;
        config.display.currency_decimals = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_beat_file_values() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [gateway]
            base_url = "http://file-host:8080"
            timeout_secs = 10
            "#,
        )
        .unwrap();

        config.apply_overrides(lookup(&[
            ("VENTAS_GATEWAY_URL", "http://env-host:9090"),
            ("VENTAS_TIMEOUT_SECS", "3"),
            ("VENTAS_CURRENCY_SYMBOL", "€"),
        ]));

        assert_eq!(config.gateway.base_url, "http://env-host:9090");
        assert_eq!(config.gateway.timeout_secs, 3);
        assert_eq!(config.display.currency_symbol, "€");
        assert_eq!(config.display.currency_decimals, 2);
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[("VENTAS_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.gateway.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[display]\ncurrency_symbol = \"ARS \"\n").unwrap();
        assert_eq!(config.gateway, GatewaySettings::default());
        assert_eq!(config.display.currency_symbol, "ARS ");
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip/ventas.toml");
        let mut config = AppConfig::default();
        config.gateway.base_url = "http://127.0.0.1:8181".to_string();

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[gateway]"));
        assert!(contents.contains("[display]"));

        let mut loaded: AppConfig = toml::from_str(&contents).unwrap();
        loaded.apply_overrides(|_| None);
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let path = temp_path("malformed/ventas.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[gateway\nbase_url = ").unwrap();

        let err = AppConfig::load(Some(path.clone())).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigLoadFailed(_)));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Event poll timeout in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Run over a session history (true) or with no history at all (false)
    #[serde(default = "default_history_enabled")]
    pub history_enabled: bool,
    /// Default filter when HISTORY_MODALS_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Prefix for the ids of modals opened with `o`
    #[serde(default = "default_modal_prefix")]
    pub modal_prefix: String,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_history_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_modal_prefix() -> String {
    "modal".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            history_enabled: default_history_enabled(),
            log_level: default_log_level(),
            modal_prefix: default_modal_prefix(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".history-modals"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("history-modals.log"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "history_enabled": false }"#).unwrap();
        assert!(!config.history_enabled);
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.modal_prefix, "modal");
    }

    #[test]
    fn test_default_runs_with_history() {
        let config = Config::default();
        assert!(config.history_enabled);
    }
}

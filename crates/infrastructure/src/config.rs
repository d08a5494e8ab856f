use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Default public endpoint serving the demo tag collection.
pub const DEFAULT_ENDPOINT: &str = "https://gist.githubusercontent.com/jgritman/7f2e89d1937ba9d9fc678f4c9844cbf1/raw/729eecaacbe749fbeeb891cc430d55235aa8036a/tags.json";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RemoteConfig {
    pub endpoint: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    30
}
fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LocalConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

fn default_database_url() -> String {
    "sqlite://data/tags.db?mode=rwc".to_string()
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_host")]
    pub host: String,
    #[serde(default = "default_probe_port")]
    pub port: u16,
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_probe_host() -> String {
    "1.1.1.1".to_string()
}
fn default_probe_port() -> u16 {
    53
}
fn default_probe_timeout_ms() -> u64 {
    1500
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: default_probe_host(),
            port: default_probe_port(),
            timeout_ms: default_probe_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl AppConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Start with default settings
            .set_default("remote.endpoint", DEFAULT_ENDPOINT)?
            // Local config file, optional - e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Environment variables (e.g. TAGGER__REMOTE__ENDPOINT=https://...)
            .add_source(Environment::with_prefix("TAGGER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_file_present() {
        let cfg = AppConfig::load("definitely/not/a/config/dir").unwrap();

        assert_eq!(cfg.remote.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.remote.connect_timeout_secs, 30);
        assert_eq!(cfg.remote.request_timeout_secs, 60);
        assert_eq!(cfg.local.database_url, "sqlite://data/tags.db?mode=rwc");
        assert_eq!(cfg.probe.port, 53);
    }
}

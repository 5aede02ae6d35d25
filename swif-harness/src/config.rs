//
// Copyright (c) The Swif Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::time::Duration;

use serde::Deserialize;
use swif_model::Platform;

// Harness settings shared by every test case in a suite.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // Operating system of the device under test.
    pub platform: Platform,
    // Interface type the suite runs against.
    pub intf_type: String,
    // How many times resource-state verification is retried before a case
    // fails.
    pub verify_retries: u32,
    // Delay between verification retries, in milliseconds.
    pub retry_interval_ms: u64,
}

// ===== impl Config =====

impl Config {
    const DFLT_FILEPATH: &'static str = "swif-test.toml";

    // Loads the configuration file, falling back to defaults when it is
    // absent or unreadable.
    pub fn load(config_file: Option<&str>) -> Config {
        let env_file = std::env::var("SWIF_TEST_CONFIG").ok();
        let config_file = config_file
            .or(env_file.as_deref())
            .unwrap_or(Config::DFLT_FILEPATH);

        match std::fs::read_to_string(config_file) {
            Ok(config_str) => toml::from_str(&config_str)
                .expect("Failed to parse configuration file"),
            Err(_) => Config::default(),
        }
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    // Returns a copy of the configuration targeting another platform.
    pub fn with_platform(&self, platform: Platform) -> Config {
        Config { platform, ..self.clone() }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            platform: Platform::Nexus,
            intf_type: "ethernet".to_owned(),
            verify_retries: 3,
            retry_interval_ms: 100,
        }
    }
}

// ===== unit tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full() {
        let config: Config = toml::from_str(
            r#"
            platform = "ios_xr"
            intf_type = "ethernet"
            verify_retries = 5
            retry_interval_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.platform, Platform::IosXr);
        assert_eq!(config.verify_retries, 5);
        assert_eq!(config.retry_interval(), Duration::from_millis(250));
    }

    #[test]
    fn parse_partial_uses_defaults() {
        let config: Config = toml::from_str("platform = \"nexus\"").unwrap();
        assert_eq!(config.platform, Platform::Nexus);
        assert_eq!(config.intf_type, "ethernet");
        assert_eq!(config.verify_retries, 3);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("agent = \"rt1\"").is_err());
    }

    #[test]
    fn load_explicit_file() {
        let path = std::env::temp_dir().join("swif-config-load.toml");
        std::fs::write(&path, "platform = \"ios_xr\"\nverify_retries = 1\n")
            .unwrap();
        let config = Config::load(path.to_str());
        assert_eq!(config.platform, Platform::IosXr);
        assert_eq!(config.verify_retries, 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let config = Config::load(Some("/nonexistent/swif-test.toml"));
        assert_eq!(config.platform, Platform::Nexus);
        assert_eq!(config.intf_type, "ethernet");
    }
}

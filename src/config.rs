//! Settings loading.
//!
//! Keys come from a local settings file, optionally overridden through
//! `NBMAP_`-prefixed environment variables (`NBMAP_MAP_KEY`,
//! `NBMAP_API__TIMEOUT_SECS`). Both API keys are required; a missing key is
//! a startup failure.

use std::path::Path;

use serde::Deserialize;

use crate::api::ApiConfig;
use crate::error::ConfigError;

const ENV_PREFIX: &str = "NBMAP";

/// API keys for the two services the demo talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeys {
    /// Key for map style, directions and matching requests.
    pub map: String,
    /// Key for reverse geocoding requests.
    pub geocode: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub keys: ApiKeys,
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    map_key: Option<String>,
    geocode_key: Option<String>,
    #[serde(default)]
    api: ApiConfig,
}

impl Settings {
    /// Loads settings from `path`, applying environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw: RawSettings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(Self {
            keys: ApiKeys {
                map: required(raw.map_key, "map_key")?,
                geocode: required(raw.geocode_key, "geocode_key")?,
            },
            api: raw.api,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingKey(name)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn settings_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create settings file");
        file.write_all(contents.as_bytes()).expect("write settings");
        file
    }

    #[test]
    fn test_load_both_keys_with_api_defaults() {
        let file = settings_file("map_key = \"map-123\"\ngeocode_key = \"geo-456\"\n");
        let settings = Settings::load(file.path()).expect("load settings");
        assert_eq!(settings.keys.map, "map-123");
        assert_eq!(settings.keys.geocode, "geo-456");
        assert_eq!(settings.api.base_url, ApiConfig::default().base_url);
        assert_eq!(settings.api.timeout_secs, 15);
    }

    #[test]
    fn test_load_api_section() {
        let file = settings_file(
            "map_key = \"m\"\ngeocode_key = \"g\"\n[api]\nbase_url = \"http://127.0.0.1:9000\"\ntimeout_secs = 3\n",
        );
        let settings = Settings::load(file.path()).expect("load settings");
        assert_eq!(settings.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.api.timeout_secs, 3);
    }

    #[test]
    fn test_missing_geocode_key_is_fatal() {
        let file = settings_file("map_key = \"map-123\"\n");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("geocode_key")));
    }

    #[test]
    fn test_blank_map_key_is_fatal() {
        let file = settings_file("map_key = \"  \"\ngeocode_key = \"geo\"\n");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("map_key")));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Settings::load("/nonexistent/overlay-settings.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }
}

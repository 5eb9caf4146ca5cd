use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::enrich::EnrichConfig;
use self::paths::PathsConfig;
use self::sources::SourcesConfig;

pub mod enrich;
pub mod paths;
pub mod sources;

fn default_target_size() -> usize {
    10_000
}

fn default_abbreviations() -> Vec<String> {
    vec!["xhtml".to_string(), "ng".to_string()]
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BuildConfig {
    pub paths: PathsConfig,
    pub sources: SourcesConfig,
    pub enrich: EnrichConfig,

    /// Stop adding word-list keys once the dictionary holds this many entries
    #[serde(default = "default_target_size")]
    pub target_size: usize,
    /// Short acronym keys dropped before merging
    #[serde(default = "default_abbreviations")]
    pub abbreviations: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            sources: SourcesConfig::default(),
            enrich: EnrichConfig::default(),
            target_size: default_target_size(),
            abbreviations: default_abbreviations(),
        }
    }
}

impl BuildConfig {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Read a JSON config file; missing fields take their defaults.
    /// Environment overrides are applied on top.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Some(target) = env_parse("PODLEX_TARGET") {
            self.target_size = target;
        }

        if let Some(delay) = env_parse("TRANSLATE_DELAY_MS") {
            self.enrich.synonym_delay_ms = delay;
        }

        if let Some(timeout) = env_parse("PODLEX_REQUEST_TIMEOUT_MS") {
            self.enrich.request_timeout_ms = timeout;
        }

        if let Some(cap) = env_parse("PODLEX_INDIVIDUAL_CAP") {
            self.enrich.individual_cap = cap;
        }

        if let Ok(url) = env::var("LIBRETRANSLATE_URL") {
            self.enrich.libretranslate_url = url;
        }

        if let Ok(url) = env::var("MYMEMORY_URL") {
            self.enrich.mymemory_url = url;
        }

        if let Ok(path) = env::var("PODLEX_DICTIONARY") {
            self.paths.dictionary = path.into();
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = BuildConfig::default();
        assert_eq!(config.target_size, 10_000);
        assert_eq!(config.enrich.batch_size, 30);
        assert_eq!(config.enrich.individual_cap, 300);
        assert_eq!(config.enrich.request_timeout_ms, 8000);
        assert_eq!(config.abbreviations, ["xhtml", "ng"]);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"target_size": 500, "enrich": {{"batch_size": 10}}}}"#).unwrap();

        let config = BuildConfig::from_file(file.path()).unwrap();
        assert_eq!(config.enrich.batch_size, 10);
        assert_eq!(config.enrich.word_delay_ms, 250);
        assert_eq!(config.paths.curated, Path::new("scripts/it-curated.json"));
    }

    #[test]
    fn invalid_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = BuildConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

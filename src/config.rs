//! Environment layering and sync configuration.
//!
//! The sync tool reads its credentials from the process environment, with a
//! repository-local `.env` file providing defaults. Precedence is explicit
//! rather than process-global: file values are parsed with `dotenvy` without
//! mutating the environment, and a real environment value always wins over a
//! file value for the same key.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// Repository-relative path of the env-file consulted for defaults.
pub const ENV_FILE: &str = ".env";

/// Errors encountered while resolving the sync configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The OpenAI API key was absent from both the environment and the env-file.
    #[error("OPENAI_API_KEY must be set in the environment or the .env file")]
    MissingApiKey,
}

/// Layered view over the process environment and an optional env-file.
///
/// Lookups consult the process environment first and fall back to the file,
/// so pre-existing environment values keep precedence over file defaults.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    file: HashMap<String, String>,
    process: HashMap<String, String>,
}

impl EnvSource {
    /// Capture the current process environment layered over `env_file`.
    ///
    /// A missing or unreadable env-file is not an error; the file layer is
    /// simply empty in that case.
    pub fn load(env_file: &Path) -> Self {
        let mut file = HashMap::new();
        match dotenvy::from_path_iter(env_file) {
            Ok(entries) => {
                for entry in entries {
                    match entry {
                        Ok((key, value)) => {
                            file.insert(key, value);
                        }
                        Err(err) => {
                            tracing::warn!(path = %env_file.display(), error = %err, "Skipping malformed env-file line");
                        }
                    }
                }
            }
            Err(err) if err.not_found() => {}
            Err(err) => {
                tracing::warn!(path = %env_file.display(), error = %err, "Failed to read env-file");
            }
        }

        Self::from_parts(file, std::env::vars().collect())
    }

    /// Build a source from explicit layers, used by tests and callers that
    /// already hold a snapshot of the environment.
    pub fn from_parts(file: HashMap<String, String>, process: HashMap<String, String>) -> Self {
        Self { file, process }
    }

    /// Resolve a key, preferring a non-empty process environment value over
    /// the env-file default.
    pub fn get(&self, key: &str) -> Option<String> {
        self.process
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.file.get(key))
            .cloned()
    }
}

/// Resolved configuration for a sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// API key presented to the OpenAI API.
    pub api_key: String,
    /// Optional override for the API base URL, mainly for tests.
    pub base_url: Option<String>,
}

impl SyncConfig {
    /// Resolve the sync configuration from a layered environment.
    ///
    /// A missing API key is fatal for the whole run; per-account store ids
    /// are resolved later so that their absence only skips one account.
    pub fn resolve(env: &EnvSource) -> Result<Self, ConfigError> {
        let api_key = env.get("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            api_key,
            base_url: env.get("OPENAI_BASE_URL"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn process_environment_wins_over_env_file() {
        let env = EnvSource::from_parts(
            map(&[("KEY", "file_value")]),
            map(&[("KEY", "env_value")]),
        );
        assert_eq!(env.get("KEY").as_deref(), Some("env_value"));
    }

    #[test]
    fn env_file_fills_in_missing_keys() {
        let env = EnvSource::from_parts(map(&[("ONLY_IN_FILE", "from_file")]), map(&[]));
        assert_eq!(env.get("ONLY_IN_FILE").as_deref(), Some("from_file"));
        assert_eq!(env.get("ABSENT"), None);
    }

    #[test]
    fn blank_process_values_fall_back_to_file() {
        let env = EnvSource::from_parts(map(&[("KEY", "file_value")]), map(&[("KEY", "   ")]));
        assert_eq!(env.get("KEY").as_deref(), Some("file_value"));
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let env = EnvSource::from_parts(map(&[]), map(&[]));
        assert!(matches!(
            SyncConfig::resolve(&env),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn api_key_resolves_from_file_layer() {
        let env = EnvSource::from_parts(map(&[("OPENAI_API_KEY", "sk-test")]), map(&[]));
        let config = SyncConfig::resolve(&env).expect("config");
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, None);
    }
}

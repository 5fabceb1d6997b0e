//! Configuration system (layered: defaults < config file < env < code).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::AgentError;
use crate::types::GenerationSettings;

/// Default device API base: the ESP8266 soft-AP address.
pub const DEFAULT_API_BASE: &str = "http://192.168.4.1";
pub const DEFAULT_OLLAMA_BASE: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_MAX_TOOL_ITERATIONS: usize = 10;
pub const DEFAULT_DEVICE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Runtime configuration, passed explicitly into constructors.
#[derive(Clone, PartialEq)]
pub struct AgentConfig {
    /// Base URL of the LED device API.
    pub api_base: String,
    /// Base URL of the Ollama server.
    pub ollama_base: String,
    /// Model identifier served by Ollama.
    pub model: String,
    /// Upper bound on model round-trips per chat turn.
    pub max_tool_iterations: usize,
    pub device_timeout: Duration,
    pub llm_timeout: Duration,
    /// Sampling options sent with every model request.
    pub generation: GenerationSettings,
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_base", &self.api_base)
            .field("ollama_base", &self.ollama_base)
            .field("model", &self.model)
            .field("max_tool_iterations", &self.max_tool_iterations)
            .field("device_timeout_secs", &self.device_timeout.as_secs())
            .field("llm_timeout_secs", &self.llm_timeout.as_secs())
            .field("generation", &self.generation)
            .finish()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            ollama_base: DEFAULT_OLLAMA_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
            device_timeout: Duration::from_secs(DEFAULT_DEVICE_TIMEOUT_SECS),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            generation: GenerationSettings::default(),
        }
    }
}

/// On-disk config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub api_base: Option<String>,
    pub ollama_base: Option<String>,
    pub model: Option<String>,
    pub max_tool_iterations: Option<usize>,
    pub device_timeout_secs: Option<u64>,
    pub llm_timeout_secs: Option<u64>,
    pub temperature: Option<f64>,
    pub seed: Option<u64>,
    pub max_tokens: Option<u32>,
}

impl ConfigFile {
    /// Read and parse a TOML config file.
    pub fn read(path: &Path) -> Result<Self, AgentError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| {
            AgentError::Configuration(format!("Invalid config file {}: {e}", path.display()))
        })
    }
}

impl AgentConfig {
    /// Load from environment variables only (after `.env`).
    pub fn from_env() -> Result<Self, AgentError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Full layered load.
    ///
    /// An explicit `path` (or `MICKY_CONFIG`) must exist. Otherwise the
    /// platform config file is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, AgentError> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("MICKY_CONFIG").map(PathBuf::from));
        match explicit {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                config.apply_file(ConfigFile::read(&path)?)?;
            }
            None => {
                if let Some(path) = default_config_path().filter(|p| p.is_file()) {
                    debug!(path = %path.display(), "loading config file");
                    config.apply_file(ConfigFile::read(&path)?)?;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values from a parsed config file.
    pub fn apply_file(&mut self, file: ConfigFile) -> Result<(), AgentError> {
        if let Some(v) = file.api_base {
            self.api_base = v;
        }
        if let Some(v) = file.ollama_base {
            self.ollama_base = v;
        }
        if let Some(v) = file.model {
            self.model = v;
        }
        if let Some(v) = file.max_tool_iterations {
            self.max_tool_iterations = v;
        }
        if let Some(v) = file.device_timeout_secs {
            self.device_timeout = timeout("device_timeout_secs", v)?;
        }
        if let Some(v) = file.llm_timeout_secs {
            self.llm_timeout = timeout("llm_timeout_secs", v)?;
        }
        if file.temperature.is_some() {
            self.generation.temperature = file.temperature;
        }
        if file.seed.is_some() {
            self.generation.seed = file.seed;
        }
        if file.max_tokens.is_some() {
            self.generation.max_tokens = file.max_tokens;
        }
        Ok(())
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AgentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HOME_API_BASE") {
            self.api_base = v;
        }
        if let Some(v) = lookup("OLLAMA_API_BASE") {
            self.ollama_base = v;
        }
        if let Some(v) = lookup("OLLAMA_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("MICKY_MAX_TOOL_ITERATIONS") {
            self.max_tool_iterations = parse_env("MICKY_MAX_TOOL_ITERATIONS", &v)?;
        }
        if let Some(v) = lookup("MICKY_DEVICE_TIMEOUT_SECS") {
            let key = "MICKY_DEVICE_TIMEOUT_SECS";
            self.device_timeout = timeout(key, parse_env(key, &v)?)?;
        }
        if let Some(v) = lookup("MICKY_LLM_TIMEOUT_SECS") {
            let key = "MICKY_LLM_TIMEOUT_SECS";
            self.llm_timeout = timeout(key, parse_env(key, &v)?)?;
        }
        if let Some(v) = lookup("MICKY_TEMPERATURE") {
            self.generation.temperature = Some(parse_env("MICKY_TEMPERATURE", &v)?);
        }
        if let Some(v) = lookup("MICKY_SEED") {
            self.generation.seed = Some(parse_env("MICKY_SEED", &v)?);
        }
        if let Some(v) = lookup("MICKY_MAX_TOKENS") {
            self.generation.max_tokens = Some(parse_env("MICKY_MAX_TOKENS", &v)?);
        }
        Ok(())
    }

    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    pub fn with_ollama_base(mut self, url: impl Into<String>) -> Self {
        self.ollama_base = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Platform config file location, e.g. `~/.config/micky/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "micky")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// A zero timeout would fail every request before it is sent.
fn timeout(key: &str, secs: u64) -> Result<Duration, AgentError> {
    if secs == 0 {
        return Err(AgentError::Configuration(format!("{key} must be at least 1 second")));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AgentError>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AgentError::Configuration(format!("Invalid {key}={value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AgentConfig::default();
        assert_eq!(config.api_base, "http://192.168.4.1");
        assert_eq!(config.ollama_base, "http://localhost:11434");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.max_tool_iterations, 10);
    }

    #[test]
    fn env_overrides_each_field() {
        let mut config = AgentConfig::default();
        config
            .apply_env(env(&[
                ("HOME_API_BASE", "http://10.0.0.7"),
                ("OLLAMA_API_BASE", "http://gpu:11434"),
                ("OLLAMA_MODEL", "qwen2.5"),
                ("MICKY_MAX_TOOL_ITERATIONS", "3"),
                ("MICKY_DEVICE_TIMEOUT_SECS", "5"),
            ]))
            .unwrap();

        assert_eq!(config.api_base, "http://10.0.0.7");
        assert_eq!(config.ollama_base, "http://gpu:11434");
        assert_eq!(config.model, "qwen2.5");
        assert_eq!(config.max_tool_iterations, 3);
        assert_eq!(config.device_timeout, Duration::from_secs(5));
        assert_eq!(config.llm_timeout, Duration::from_secs(120));
    }

    #[test]
    fn invalid_numeric_env_is_configuration_error() {
        let mut config = AgentConfig::default();
        let err = config
            .apply_env(env(&[("MICKY_MAX_TOOL_ITERATIONS", "many")]))
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::Configuration(msg) if msg.contains("MICKY_MAX_TOOL_ITERATIONS")
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = AgentConfig::default();
        let err = config
            .apply_env(env(&[("MICKY_DEVICE_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::Configuration(msg) if msg.contains("MICKY_DEVICE_TIMEOUT_SECS")
        ));

        let file = ConfigFile {
            llm_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.apply_file(file).is_err());
        assert_eq!(config.llm_timeout, Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS));
    }

    #[test]
    fn generation_settings_from_env() {
        let mut config = AgentConfig::default();
        config
            .apply_env(env(&[
                ("MICKY_TEMPERATURE", "0.2"),
                ("MICKY_SEED", "7"),
                ("MICKY_MAX_TOKENS", "256"),
            ]))
            .unwrap();
        assert_eq!(
            config.generation,
            GenerationSettings {
                max_tokens: Some(256),
                temperature: Some(0.2),
                seed: Some(7),
            }
        );
    }

    #[test]
    fn missing_env_leaves_values_untouched() {
        let mut config = AgentConfig::default();
        config.apply_env(env(&[])).unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn builder_overrides() {
        let config = AgentConfig::default()
            .with_api_base("http://led.local")
            .with_model("mistral");
        assert_eq!(config.api_base, "http://led.local");
        assert_eq!(config.model, "mistral");
    }
}

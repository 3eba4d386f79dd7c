use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";

/// Settings for the text-generation backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Summaries use their own, tighter sampling.
    #[serde(default = "default_summary_max_tokens")]
    pub summary_max_tokens: u32,

    #[serde(default = "default_summary_temperature")]
    pub summary_temperature: f32,

    /// Per-call limit; 0 disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable holding the bearer token. The token
    /// itself never goes into the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_summary_max_tokens() -> u32 {
    200
}

fn default_summary_temperature() -> f32 {
    0.5
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            summary_max_tokens: default_summary_max_tokens(),
            summary_temperature: default_summary_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl AssistConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Configuration for reportdash, stored as `config.json` in the config dir.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashConfig {
    #[serde(default)]
    pub assist: AssistConfig,

    /// JSON file to seed the store from; the bundled samples otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

/// Keys addressable through `config <key> [value]`.
pub const CONFIG_KEYS: &[&str] = &[
    "api-base",
    "model",
    "max-tokens",
    "temperature",
    "summary-max-tokens",
    "summary-temperature",
    "timeout-secs",
    "api-key-env",
    "seed-file",
];

impl DashConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DashConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let a = &self.assist;
        Ok(match key {
            "api-base" => a.api_base.clone(),
            "model" => a.model.clone(),
            "max-tokens" => a.max_tokens.to_string(),
            "temperature" => a.temperature.to_string(),
            "summary-max-tokens" => a.summary_max_tokens.to_string(),
            "summary-temperature" => a.summary_temperature.to_string(),
            "timeout-secs" => a.timeout_secs.to_string(),
            "api-key-env" => a.api_key_env.clone(),
            "seed-file" => self
                .seed_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            other => return Err(unknown_key(other)),
        })
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let a = &mut self.assist;
        match key {
            "api-base" => a.api_base = value.to_string(),
            "model" => a.model = value.to_string(),
            "max-tokens" => a.max_tokens = parse_value(key, value)?,
            "temperature" => a.temperature = parse_temperature(key, value)?,
            "summary-max-tokens" => a.summary_max_tokens = parse_value(key, value)?,
            "summary-temperature" => a.summary_temperature = parse_temperature(key, value)?,
            "timeout-secs" => a.timeout_secs = parse_value(key, value)?,
            "api-key-env" => a.api_key_env = value.to_string(),
            "seed-file" => {
                self.seed_file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ReportError {
    ReportError::Config(format!(
        "unknown config key '{}' (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_temperature(key: &str, value: &str) -> Result<f32> {
    let t: f32 = parse_value(key, value)?;
    if !(0.0..=2.0).contains(&t) {
        return Err(ReportError::Config(format!(
            "{} must be between 0 and 2, got {}",
            key, t
        )));
    }
    Ok(t)
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ReportError::Config(format!("invalid value for {}: {}", key, value)))
}

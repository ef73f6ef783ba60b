use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TRELLO_BASE_URL: &str = "https://api.trello.com/1";
pub const ASANA_BASE_URL: &str = "https://app.asana.com/api/1.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_TRELLO_API_KEY: &str = "TRELLO_API_KEY";
pub const ENV_TRELLO_TOKEN: &str = "TRELLO_TOKEN";
pub const ENV_ASANA_ACCESS_TOKEN: &str = "ASANA_ACCESS_TOKEN";
pub const ENV_WORKSPACE_ID: &str = "WORKSPACE_ID";

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub trello: TrelloConfig,
    pub asana: AsanaConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TrelloConfig {
    pub api_key: String,
    pub token: String,
    pub base_url: String,
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            token: String::new(),
            base_url: TRELLO_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AsanaConfig {
    pub access_token: String,
    pub workspace_id: String,
    pub base_url: String,
}

impl Default for AsanaConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            workspace_id: String::new(),
            base_url: ASANA_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Overlay credentials from `lookup` (normally the process environment).
    /// Only non-empty values replace what the config file provided.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_TRELLO_API_KEY) {
            self.trello.api_key = v;
        }
        if let Some(v) = get(ENV_TRELLO_TOKEN) {
            self.trello.token = v;
        }
        if let Some(v) = get(ENV_ASANA_ACCESS_TOKEN) {
            self.asana.access_token = v;
        }
        if let Some(v) = get(ENV_WORKSPACE_ID) {
            self.asana.workspace_id = v;
        }
        self
    }

    /// Names of the credentials that are still empty after loading.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            (ENV_TRELLO_API_KEY, &self.trello.api_key),
            (ENV_TRELLO_TOKEN, &self.trello.token),
            (ENV_ASANA_ACCESS_TOKEN, &self.asana.access_token),
            (ENV_WORKSPACE_ID, &self.asana.workspace_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".board-migrate")
        .join("config.toml")
}

pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

pub fn load_config() -> Result<AppConfig> {
    let config = load_config_file(&config_path())?.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

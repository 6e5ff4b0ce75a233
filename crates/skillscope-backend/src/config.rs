//! Backend configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::mock::MockBackend;
use crate::rest::RestBackend;
use crate::DocumentBackend;

/// Configuration for the persistence backend.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    /// PostgREST-style hosted table.
    Rest {
        base_url: String,
        api_key: String,
        #[serde(default = "default_table")]
        table: String,
    },
    /// In-memory backend; useful offline and in tests.
    Memory,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendConfig::Rest {
                api_key: _,
                base_url,
                table,
            } => f
                .debug_struct("Rest")
                .field("base_url", base_url)
                .field("api_key", &"***")
                .field("table", table)
                .finish(),
            BackendConfig::Memory => f.debug_struct("Memory").finish(),
        }
    }
}

fn default_table() -> String {
    "evaluations".to_string()
}

/// Top-level skillscope configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillscopeConfig {
    /// Persistence backend; `None` means local-file only.
    #[serde(default)]
    pub backend: Option<BackendConfig>,
    /// Seconds between autosave ticks.
    #[serde(default = "default_autosave_interval")]
    pub autosave_interval_secs: u64,
    /// Max retries on transient backend errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Local store file the CLI operates on.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_autosave_interval() -> u64 {
    60
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}
fn default_store_path() -> PathBuf {
    PathBuf::from("skillscope.json")
}

impl Default for SkillscopeConfig {
    fn default() -> Self {
        Self {
            backend: None,
            autosave_interval_secs: default_autosave_interval(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            store_path: default_store_path(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_backend_config(config: &BackendConfig) -> BackendConfig {
    match config {
        BackendConfig::Rest {
            base_url,
            api_key,
            table,
        } => BackendConfig::Rest {
            base_url: resolve_env_vars(base_url),
            api_key: resolve_env_vars(api_key),
            table: resolve_env_vars(table),
        },
        BackendConfig::Memory => BackendConfig::Memory,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `skillscope.toml` in the current directory
/// 2. `~/.config/skillscope/config.toml`
///
/// Environment variable override: `SKILLSCOPE_API_KEY`.
pub fn load_config() -> Result<SkillscopeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SkillscopeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("skillscope.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<SkillscopeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SkillscopeConfig::default(),
    };

    // Apply env var override
    if let Ok(key) = std::env::var("SKILLSCOPE_API_KEY") {
        if let Some(BackendConfig::Rest { api_key, .. }) = config.backend.as_mut() {
            *api_key = key;
        }
    }

    config.backend = config.backend.as_ref().map(resolve_backend_config);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("skillscope"))
}

/// Create a backend instance from its configuration.
pub fn create_backend(config: &BackendConfig) -> Result<Box<dyn DocumentBackend>> {
    match config {
        BackendConfig::Rest {
            base_url,
            api_key,
            table,
        } => Ok(Box::new(RestBackend::new(base_url, api_key, table))),
        BackendConfig::Memory => Ok(Box::new(MockBackend::new())),
    }
}

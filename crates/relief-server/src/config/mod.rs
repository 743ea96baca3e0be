// SPDX-License-Identifier: Apache-2.0

use relief_cards::CardRegistry;
use relief_model::SheetConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_RESOURCES_SHEET_ID: &str = "1DX0_eUz1QRe0xWdnVAhIOYYsp7lpOUsmMg74QIjwDac";
pub const DEFAULT_RESOURCES_RANGE: &str = "Sheet1!A3:F";
pub const DEFAULT_CATEGORIES_RANGE: &str = "Sheet1!C3:E";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be > 0")]
    ZeroLimit(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("sheet config has no tabs")]
    NoTabs,
    #[error("tab {tab:?} of {spreadsheet_id} uses unregistered component {component:?}")]
    UnknownComponent {
        spreadsheet_id: String,
        tab: String,
        component: String,
    },
    #[error("invalid sheet config: {0}")]
    InvalidSheetConfig(String),
    #[error("failed to read sheet config {}: {source}", .path.display())]
    ReadSheetConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetsClientConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    #[serde(skip_serializing)]
    pub bearer: Option<String>,
    pub timeout: Duration,
}

impl Default for SheetsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            api_key: None,
            bearer: None,
            timeout: Duration::from_millis(15_000),
        }
    }
}

/// Where the landing page categories and the per-category resources live.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryConfig {
    pub spreadsheet_id: String,
    pub resources_range: String,
    pub categories_range: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_RESOURCES_SHEET_ID.to_string(),
            resources_range: DEFAULT_RESOURCES_RANGE.to_string(),
            categories_range: DEFAULT_CATEGORIES_RANGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub log_json: bool,
    pub max_body_bytes: usize,
    pub sheet_config_path: Option<PathBuf>,
    pub sheets: SheetsClientConfig,
    pub directory: DirectoryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_json: true,
            max_body_bytes: 16 * 1024,
            sheet_config_path: None,
            sheets: SheetsClientConfig::default(),
            directory: DirectoryConfig::default(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads `RELIEF_*` settings through `lookup`. Unset or unparsable values
    /// fall back to defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = EnvReader(&lookup);
        let defaults = Self::default();
        let bind_addr = env.string("RELIEF_BIND").unwrap_or_else(|| {
            let port = env.string("PORT").unwrap_or_else(|| "8080".to_string());
            format!("0.0.0.0:{port}")
        });
        Self {
            bind_addr,
            log_json: env.bool("RELIEF_LOG_JSON", defaults.log_json),
            max_body_bytes: env.usize("RELIEF_MAX_BODY_BYTES", defaults.max_body_bytes),
            sheet_config_path: env.string("RELIEF_SHEET_CONFIG").map(PathBuf::from),
            sheets: SheetsClientConfig {
                base_url: env
                    .string("RELIEF_SHEETS_BASE_URL")
                    .unwrap_or(defaults.sheets.base_url),
                api_key: env.string("RELIEF_SHEETS_API_KEY"),
                bearer: env.string("RELIEF_SHEETS_BEARER"),
                timeout: Duration::from_millis(env.u64("RELIEF_SHEETS_TIMEOUT_MS", 15_000)),
            },
            directory: DirectoryConfig {
                spreadsheet_id: env
                    .string("RELIEF_RESOURCES_SHEET_ID")
                    .unwrap_or(defaults.directory.spreadsheet_id),
                resources_range: env
                    .string("RELIEF_RESOURCES_RANGE")
                    .unwrap_or(defaults.directory.resources_range),
                categories_range: env
                    .string("RELIEF_CATEGORIES_RANGE")
                    .unwrap_or(defaults.directory.categories_range),
            },
        }
    }
}

struct EnvReader<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> EnvReader<'_, F> {
    fn string(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn bool(&self, name: &str, default: bool) -> bool {
        self.string(name)
            .and_then(|v| match v.as_str() {
                "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
                "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
                _ => None,
            })
            .unwrap_or(default)
    }

    fn u64(&self, name: &str, default: u64) -> u64 {
        self.string(name)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(default)
    }

    fn usize(&self, name: &str, default: usize) -> usize {
        self.string(name)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(default)
    }
}

/// The built-in table, or the JSON file at `path` when one is given.
pub fn load_sheet_config(path: Option<&Path>) -> Result<SheetConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(SheetConfig::builtin());
    };
    let bytes = std::fs::read(path).map_err(|source| ConfigError::ReadSheetConfig {
        path: path.to_path_buf(),
        source,
    })?;
    SheetConfig::from_json_slice(&bytes).map_err(|e| ConfigError::InvalidSheetConfig(e.0))
}

pub fn validate_startup_config(
    config: &ServerConfig,
    sheets: &SheetConfig,
    registry: &CardRegistry,
) -> Result<(), ConfigError> {
    if config.max_body_bytes == 0 {
        return Err(ConfigError::ZeroLimit("max body bytes"));
    }
    if config.sheets.timeout.is_zero() {
        return Err(ConfigError::ZeroLimit("sheets timeout"));
    }
    if config.sheets.base_url.trim().is_empty() {
        return Err(ConfigError::Empty("sheets base url"));
    }
    if config.directory.spreadsheet_id.trim().is_empty() {
        return Err(ConfigError::Empty("resources spreadsheet id"));
    }
    if sheets.is_empty() {
        return Err(ConfigError::NoTabs);
    }
    sheets
        .validate()
        .map_err(|e| ConfigError::InvalidSheetConfig(e.0))?;
    for (spreadsheet_id, tab, tab_config) in sheets.entries() {
        if !registry.contains(&tab_config.component) {
            return Err(ConfigError::UnknownComponent {
                spreadsheet_id: spreadsheet_id.to_string(),
                tab: tab.to_string(),
                component: tab_config.component.clone(),
            });
        }
    }
    Ok(())
}

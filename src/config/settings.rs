//! Configuration settings for Nordpuls.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "NORDPULS_API_URL";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from the default location, layered with the environment.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, then layer `NORDPULS_*` environment variables on top.
    ///
    /// Nested keys use a double underscore, e.g. `NORDPULS_API__TIMEOUT_SECS=5`.
    /// A missing file is not an error.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_path);

        let layered = ::config::Config::builder()
            .add_source(::config::File::from(config_path.as_path()).required(false))
            .add_source(
                ::config::Environment::with_prefix("NORDPULS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::Error::config(e.to_string()))?;

        let mut config: Self = layered
            .try_deserialize()
            .map_err(|e| crate::Error::config(e.to_string()))?;
        config.apply_env_overrides(std::env::var(API_URL_ENV).ok());

        tracing::debug!(path = %config_path.display(), base_url = %config.api.base_url, "Loaded configuration");
        Ok(config)
    }

    /// Apply the flat `NORDPULS_API_URL` override. Blank values are ignored.
    pub fn apply_env_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.map(|u| u.trim().to_string())
            && !url.is_empty()
        {
            self.api.base_url = url;
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Parse a TOML document without touching the filesystem or environment.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::config(e.to_string()))
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| Path::new("config.toml").to_path_buf())
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Briefing API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Rate limit (requests per second).
    pub rate_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            rate_limit: 10,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates (drives the header clock).
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Stock cards per dashboard page.
    pub stocks_per_page: usize,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Show help bar.
    pub show_help_bar: bool,
    /// Days of rocket history and simulation to request.
    pub rocket_days: u32,
    /// Default congress look-back in days.
    pub congress_days: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: false,
            stocks_per_page: 30,
            show_status_bar: true,
            show_help_bar: true,
            rocket_days: 30,
            congress_days: 30,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub quit: String,
    pub help: String,
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub select: String,
    pub back: String,
    pub refresh: String,
    pub search: String,
    pub next_page: String,
    pub prev_page: String,
    pub dashboard: String,
    pub morning: String,
    pub evening: String,
    pub rockets: String,
    pub simulator: String,
    pub congress: String,
    pub climate: String,
    pub watchlist: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            left: "h".to_string(),
            right: "l".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            search: "/".to_string(),
            next_page: "n".to_string(),
            prev_page: "p".to_string(),
            dashboard: "1".to_string(),
            morning: "2".to_string(),
            evening: "3".to_string(),
            rockets: "4".to_string(),
            simulator: "5".to_string(),
            congress: "6".to_string(),
            climate: "7".to_string(),
            watchlist: "8".to_string(),
        }
    }
}

/// Theme configuration. Colors are hex strings or ratatui color names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Accent color for titles and the active tab.
    pub accent: String,
    /// Gains, BUY signals, open market.
    pub positive: String,
    /// Losses, SELL/AVOID signals, closed market, high impact.
    pub negative: String,
    /// WATCH signals, pre-open, medium impact.
    pub warning: String,
    /// Unchanged values.
    pub neutral: String,
    /// Secondary text and low impact.
    pub muted: String,
    /// Background color.
    pub background: String,
    /// Foreground/text color.
    pub foreground: String,
    /// Border color.
    pub border: String,
    /// Selection/highlight color.
    pub selection: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#60a5fa".to_string(),
            positive: "#22c55e".to_string(),
            negative: "#ef4444".to_string(),
            warning: "#f59e0b".to_string(),
            neutral: "#cbd5e1".to_string(),
            muted: "#64748b".to_string(),
            background: "#0f172a".to_string(),
            foreground: "#e2e8f0".to_string(),
            border: "#334155".to_string(),
            selection: "#1e293b".to_string(),
        }
    }
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.emoji-zoo/config.toml`. If missing on first run, a
//! commented-out default is generated so parents can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ContentSource;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GameConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub narration: NarrationConfig,
    #[serde(default)]
    pub coloring: ColoringConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub content_source: Option<ContentSource>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NarrationConfig {
    pub enabled: Option<bool>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ColoringConfig {
    pub seed: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NARRATION_COMMAND: &str = "espeak-ng";

pub fn default_narration_args() -> Vec<String> {
    ["-v", "{voice}", "-s", "150", "{text}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NarrationSettings {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub content_source: ContentSource,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub narration: NarrationSettings,
    pub coloring_seed: Option<u64>,
}

/// Flags given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub content_source: Option<ContentSource>,
    pub seed: Option<u64>,
    pub mute: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.emoji-zoo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".emoji-zoo").join("config.toml"))
}

/// Load config from `~/.emoji-zoo/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GameConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GameConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GameConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<GameConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GameConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GameConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config without the API key.
fn redacted(config: &GameConfig) -> String {
    format!(
        "source={:?}, gemini(key={}, base_url={:?}, model={:?}), narration={:?}, seed={:?}",
        config.general.content_source,
        if config.gemini.api_key.is_some() { "set" } else { "unset" },
        config.gemini.base_url,
        config.gemini.model,
        config.narration,
        config.coloring.seed
    )
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Emoji Zoo Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# content_source = "auto"            # "auto", "gemini" or "builtin"

# [gemini]
# api_key = "AIza..."                # Or set GEMINI_API_KEY / API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# model = "gemini-2.5-flash"
# temperature = 1.0
# timeout_secs = 30

# [narration]
# enabled = true
# command = "espeak-ng"
# args = ["-v", "{voice}", "-s", "150", "{text}"]

# [coloring]
# seed = 42                          # Fixed seed for repeatable colors
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GameConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &GameConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Source: CLI → env → config → default
    let content_source = cli
        .content_source
        .or_else(|| env("EMOJI_ZOO_SOURCE").and_then(|s| ContentSource::parse(&s)))
        .or(config.general.content_source)
        .unwrap_or_default();

    // API key: env → config. Blank keys count as missing.
    let non_blank = |key: Option<String>| key.filter(|k| !k.trim().is_empty());
    let gemini_api_key = non_blank(env("GEMINI_API_KEY"))
        .or_else(|| non_blank(env("API_KEY")))
        .or_else(|| non_blank(config.gemini.api_key.clone()));

    let gemini_base_url = env("GEMINI_BASE_URL")
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    let gemini_model = env("EMOJI_ZOO_MODEL")
        .or_else(|| config.gemini.model.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

    let narration = NarrationSettings {
        enabled: !cli.mute && config.narration.enabled.unwrap_or(true),
        command: config
            .narration
            .command
            .clone()
            .unwrap_or_else(|| DEFAULT_NARRATION_COMMAND.to_string()),
        args: config
            .narration
            .args
            .clone()
            .unwrap_or_else(default_narration_args),
    };

    ResolvedConfig {
        content_source,
        gemini_api_key,
        gemini_base_url,
        gemini_model,
        temperature: config.gemini.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        timeout_secs: config.gemini.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        narration,
        coloring_seed: cli.seed.or(config.coloring.seed),
    }
}

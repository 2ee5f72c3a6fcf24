//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.marquee/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MarqueeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub title: Option<String>,
    /// Rows from the bottom of the grid that count as "near the bottom".
    pub bottom_threshold: Option<u16>,
    /// Width of one poster tile in terminal cells.
    pub tile_width: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub api_base_url: Option<String>,
    pub image_base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "Romantic Comedy";
pub const DEFAULT_BOTTOM_THRESHOLD: u16 = 10;
pub const DEFAULT_TILE_WIDTH: u16 = 22;
/// Page number and `.json` are appended to this, i.e. `...page1.json`.
pub const DEFAULT_API_BASE_URL: &str = "https://test.create.diagnal.com/data/page";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://test.create.diagnal.com/images/";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub title: String,
    pub bottom_threshold: u16,
    pub tile_width: u16,
    pub api_base_url: String,
    pub image_base_url: String,
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

/// Returns the path to `~/.marquee/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".marquee").join("config.toml"))
}

/// Load config from `~/.marquee/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MarqueeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MarqueeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MarqueeConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MarqueeConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MarqueeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Marquee Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# title = "Romantic Comedy"
# bottom_threshold = 10     # Rows from the bottom that trigger the next page
# tile_width = 22           # Poster tile width in terminal cells

# [catalog]
# api_base_url = "https://test.create.diagnal.com/data/page"
# image_base_url = "https://test.create.diagnal.com/images/"
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

/// CLI flag values fed into resolution (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub api_base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub title: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MarqueeConfig, cli: &CliOverrides) -> ResolvedConfig {
    // API base URL: CLI → env → config → default
    let api_base_url = cli
        .api_base_url
        .clone()
        .or_else(|| std::env::var("MARQUEE_API_BASE_URL").ok())
        .or_else(|| config.catalog.api_base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Image base URL: CLI → env → config → default
    let image_base_url = cli
        .image_base_url
        .clone()
        .or_else(|| std::env::var("MARQUEE_IMAGE_BASE_URL").ok())
        .or_else(|| config.catalog.image_base_url.clone())
        .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

    // Title: CLI → config → default
    let title = cli
        .title
        .clone()
        .or_else(|| config.general.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    ResolvedConfig {
        title,
        bottom_threshold: config
            .general
            .bottom_threshold
            .unwrap_or(DEFAULT_BOTTOM_THRESHOLD),
        tile_width: config.general.tile_width.unwrap_or(DEFAULT_TILE_WIDTH).max(8),
        api_base_url,
        image_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = MarqueeConfig::default();
        assert!(config.general.title.is_none());
        assert!(config.catalog.api_base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = MarqueeConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.title, DEFAULT_TITLE);
        assert_eq!(resolved.bottom_threshold, DEFAULT_BOTTOM_THRESHOLD);
        assert_eq!(resolved.tile_width, DEFAULT_TILE_WIDTH);
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MarqueeConfig {
            general: GeneralConfig {
                title: Some("Film Noir".to_string()),
                bottom_threshold: Some(4),
                tile_width: Some(30),
            },
            catalog: CatalogConfig {
                api_base_url: Some("https://example.com/catalog/page".to_string()),
                image_base_url: Some("https://example.com/art/".to_string()),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.title, "Film Noir");
        assert_eq!(resolved.bottom_threshold, 4);
        assert_eq!(resolved.tile_width, 30);
        assert_eq!(resolved.api_base_url, "https://example.com/catalog/page");
        assert_eq!(resolved.image_base_url, "https://example.com/art/");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = MarqueeConfig {
            catalog: CatalogConfig {
                api_base_url: Some("https://config.example.com/page".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            api_base_url: Some("https://cli.example.com/page".to_string()),
            image_base_url: None,
            title: Some("CLI Title".to_string()),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.api_base_url, "https://cli.example.com/page");
        assert_eq!(resolved.title, "CLI Title");
    }

    #[test]
    fn test_tile_width_has_a_floor() {
        let config = MarqueeConfig {
            general: GeneralConfig {
                tile_width: Some(2),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.tile_width, 8);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
title = "Westerns"
"#;
        let config: MarqueeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.title.as_deref(), Some("Westerns"));
        assert!(config.general.bottom_threshold.is_none());
        assert!(config.catalog.api_base_url.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
title = "Romantic Comedy"
bottom_threshold = 10
tile_width = 22

[catalog]
api_base_url = "https://test.create.diagnal.com/data/page"
image_base_url = "https://test.create.diagnal.com/images/"
"#;
        let config: MarqueeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.title.as_deref(), Some("Romantic Comedy"));
        assert_eq!(config.general.bottom_threshold, Some(10));
        assert_eq!(
            config.catalog.image_base_url.as_deref(),
            Some("https://test.create.diagnal.com/images/")
        );
    }
}

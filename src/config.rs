//! Runtime configuration read from `QRSTUDIO_*` environment variables.

use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "QRSTUDIO_";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(String),
    #[error("{name} must be {expected}, got {value}")]
    OutOfRange { name: &'static str, expected: &'static str, value: f64 },
    #[error("QRSTUDIO_API_BASE_URL is required for template storage")]
    MissingApiBaseUrl,
}

// Render configuration
//------------------------------------------------------------------------------

/// Layout constants shared by the compositor and the preview pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Padding between the card edge and the QR block, in pixels.
    pub card_padding: f64,
    /// Minimum light modules between the symbol and the edge of the QR block.
    pub quiet_zone: usize,
    /// Logo badge side relative to the QR block side.
    pub logo_ratio: f64,
    /// QR block side relative to the shorter side of a framed composite, before scaling.
    pub framed_block_ratio: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { card_padding: 16.0, quiet_zone: 4, logo_ratio: 0.22, framed_block_ratio: 0.46 }
    }
}

// Application configuration
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    api_base_url: Option<String>,
    api_token: Option<String>,
    asset_root: String,
    render_size: u32,
    render: RenderConfig,
}

// Every field is optional here; defaults and range checks live in `from_raw`.
#[derive(Debug, Default, Deserialize)]
pub struct RawConfig {
    api_base_url: Option<String>,
    api_token: Option<String>,
    asset_root: Option<String>,
    render_size: Option<u32>,
    card_padding: Option<f64>,
    quiet_zone: Option<usize>,
    logo_ratio: Option<f64>,
    framed_block_ratio: Option<f64>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars = std::env::vars().filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX).map(|name| (name.to_string(), value))
        });
        Self::from_vars(vars)
    }

    /// Variables without the `QRSTUDIO_` prefix, e.g. `("RENDER_SIZE", "512")`.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect::<Vec<_>>();
        let raw: RawConfig = serde_env::from_iter(vars).map_err(|e| ConfigError::Env(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let defaults = RenderConfig::default();

        let render_size = raw.render_size.unwrap_or(512);
        if render_size == 0 {
            return Err(ConfigError::OutOfRange {
                name: "RENDER_SIZE",
                expected: "greater than 0",
                value: 0.0,
            });
        }

        let card_padding = raw.card_padding.unwrap_or(defaults.card_padding);
        if !(card_padding >= 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "CARD_PADDING",
                expected: "at least 0",
                value: card_padding,
            });
        }

        let logo_ratio = raw.logo_ratio.unwrap_or(defaults.logo_ratio);
        if !(logo_ratio > 0.0 && logo_ratio <= 0.4) {
            return Err(ConfigError::OutOfRange {
                name: "LOGO_RATIO",
                expected: "in (0, 0.4]",
                value: logo_ratio,
            });
        }

        let framed_block_ratio = raw.framed_block_ratio.unwrap_or(defaults.framed_block_ratio);
        if !(framed_block_ratio > 0.0 && framed_block_ratio <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "FRAMED_BLOCK_RATIO",
                expected: "in (0, 1]",
                value: framed_block_ratio,
            });
        }

        Ok(Self {
            api_base_url: raw.api_base_url.map(|url| url.trim_end_matches('/').to_string()),
            api_token: raw.api_token,
            asset_root: raw.asset_root.unwrap_or_else(|| "assets".to_string()),
            render_size,
            render: RenderConfig {
                card_padding,
                quiet_zone: raw.quiet_zone.unwrap_or(defaults.quiet_zone),
                logo_ratio,
                framed_block_ratio,
            },
        })
    }

    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    pub fn require_api_base_url(&self) -> Result<&str, ConfigError> {
        self.api_base_url().ok_or(ConfigError::MissingApiBaseUrl)
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    pub fn asset_root(&self) -> &str {
        &self.asset_root
    }

    pub fn render_size(&self) -> u32 {
        self.render_size
    }

    pub fn render(&self) -> RenderConfig {
        self.render
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_token: None,
            asset_root: "assets".to_string(),
            render_size: 512,
            render: RenderConfig::default(),
        }
    }
}

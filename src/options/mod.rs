mod ids;
mod resolve;

pub use ids::{DotStyle, Frame, Level, Logo, OuterBorder, Shape};
pub use resolve::{ContainerClip, FrameArt, ResolvedOptions};

use serde::{Deserialize, Serialize};

pub const DEFAULT_BG_COLOR: &str = "#ffffff";
pub const DEFAULT_FG_COLOR: &str = "#000000";

// Design options
//------------------------------------------------------------------------------

/// Complete design of a QR code. Values are replaced whole; every `with_*` helper
/// consumes the value and returns a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignOptions {
    #[serde(default)]
    pub frame: Frame,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub logo: Logo,
    #[serde(default)]
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_style: Option<DotStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_border: Option<OuterBorder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<String>,
}

impl DesignOptions {
    pub fn new(frame: Frame, shape: Shape, logo: Logo, level: Level) -> Self {
        Self { frame, shape, logo, level, ..Self::default() }
    }

    pub fn with_frame(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    pub fn with_shape(self, shape: Shape) -> Self {
        Self { shape, ..self }
    }

    pub fn with_logo(self, logo: Logo) -> Self {
        Self { logo, ..self }
    }

    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    pub fn with_dot_style(self, dot_style: DotStyle) -> Self {
        Self { dot_style: Some(dot_style), ..self }
    }

    pub fn with_bg_color(self, bg_color: impl Into<String>) -> Self {
        Self { bg_color: Some(bg_color.into()), ..self }
    }

    pub fn with_fg_color(self, fg_color: impl Into<String>) -> Self {
        Self { fg_color: Some(fg_color.into()), ..self }
    }

    pub fn with_outer_border(self, outer_border: OuterBorder) -> Self {
        Self { outer_border: Some(outer_border), ..self }
    }

    pub fn dot_style(&self) -> DotStyle {
        self.dot_style.unwrap_or_default()
    }

    pub fn bg_color(&self) -> &str {
        self.bg_color.as_deref().unwrap_or(DEFAULT_BG_COLOR)
    }

    pub fn fg_color(&self) -> &str {
        self.fg_color.as_deref().unwrap_or(DEFAULT_FG_COLOR)
    }

    pub fn outer_border(&self) -> OuterBorder {
        self.outer_border.unwrap_or_default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

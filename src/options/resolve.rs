use std::f64::consts::FRAC_1_SQRT_2;

use num_traits::ToPrimitive;

use super::{DesignOptions, DotStyle, Frame, Logo, OuterBorder, Shape};
use crate::codec::ECLevel;
use crate::common::Rgba;
use crate::tables::{self, BorderStyle, Placement};

// Container clip
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerClip {
    None,
    Medium,
    Large,
    Full,
}

impl ContainerClip {
    pub const fn from_shape(shape: Shape) -> Self {
        match shape {
            Shape::Square | Shape::Unknown(_) => Self::None,
            Shape::Rounded => Self::Medium,
            Shape::Dots => Self::Large,
            Shape::Circle => Self::Full,
        }
    }

    /// Corner radius as a fraction of the block side. `Full` clips to a circle.
    pub const fn corner_ratio(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Medium => 0.08,
            Self::Large => 0.16,
            Self::Full => 0.5,
        }
    }

    /// Quiet modules needed on each side so a symbol `modules` wide keeps its
    /// finder corners inside the clip, plus one module of light margin.
    pub fn min_quiet_zone(self, modules: usize) -> usize {
        let radius = self.corner_ratio();
        if radius == 0.0 {
            return 0;
        }
        // Depth of the rounded corner along the diagonal, as a fraction of the side
        let cut = radius * (1.0 - FRAC_1_SQRT_2);
        let needed = cut * modules as f64 / (1.0 - 2.0 * cut);
        needed.ceil().to_usize().unwrap_or(0) + 1
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::None => "rounded-none",
            Self::Medium => "rounded-md",
            Self::Large => "rounded-xl",
            Self::Full => "rounded-full",
        }
    }
}

// Resolved options
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameArt {
    pub frame: Frame,
    pub image: &'static str,
    pub placement: Placement,
}

/// Concrete rendering parameters. Every field is populated; `None` means
/// "draw nothing" for that element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOptions {
    pub frame: Option<FrameArt>,
    pub clip: ContainerClip,
    pub logo: Option<&'static str>,
    pub ec_level: ECLevel,
    pub dot_style: DotStyle,
    pub background: Rgba,
    pub foreground: Rgba,
    pub border: Option<&'static BorderStyle>,
}

impl ResolvedOptions {
    /// Anchor of the QR block and the logo badge.
    pub fn placement(&self) -> Placement {
        self.frame.map(|art| art.placement).unwrap_or(Placement::CENTERED)
    }
}

impl DesignOptions {
    /// Total and pure: unknown ids and malformed colors fall back to defaults.
    pub fn resolve(&self) -> ResolvedOptions {
        let frame = tables::frame_entry(self.frame).and_then(|entry| {
            entry.image.map(|image| FrameArt { frame: entry.frame, image, placement: entry.placement })
        });
        let logo = match self.logo {
            Logo::NoLogo => None,
            logo => tables::logo_entry(logo).and_then(|entry| entry.icon),
        };
        let border = match self.outer_border() {
            OuterBorder::NoBorder => None,
            border => tables::border_style(border),
        };

        ResolvedOptions {
            frame,
            clip: ContainerClip::from_shape(self.shape),
            logo,
            ec_level: self.level.ec_level(),
            dot_style: self.dot_style().or_default(),
            background: Rgba::parse_or(self.bg_color.as_deref(), Rgba::WHITE),
            foreground: Rgba::parse_or(self.fg_color.as_deref(), Rgba::BLACK),
            border,
        }
    }
}

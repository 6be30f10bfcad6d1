//! Static catalog shared by option pickers and the renderer.
//!
//! Every lookup is a `match` over the id enums, so adding a frame, logo or border
//! fails to compile until it is given an entry here.

use crate::common::Rgba;
use crate::options::{DotStyle, Frame, Level, Logo, OuterBorder, Shape};

// Frames
//------------------------------------------------------------------------------

/// Where the QR block sits on a frame, as CSS-style percentages of the frame box.
/// The block is centered on the anchor with `translate(-50%, -50%)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top_pct: f64,
    pub left_pct: f64,
    pub origin: &'static str,
    pub scale: f64,
}

impl Placement {
    /// Centered anchor used by the card layout.
    pub const CENTERED: Self = Self { top_pct: 50.0, left_pct: 50.0, origin: "center", scale: 1.0 };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEntry {
    pub frame: Frame,
    pub label: &'static str,
    pub thumbnail: &'static str,
    pub image: Option<&'static str>,
    pub placement: Placement,
}

const fn framed(
    frame: Frame,
    label: &'static str,
    thumbnail: &'static str,
    image: &'static str,
    top_pct: f64,
    left_pct: f64,
    origin: &'static str,
    scale: f64,
) -> FrameEntry {
    FrameEntry {
        frame,
        label,
        thumbnail,
        image: Some(image),
        placement: Placement { top_pct, left_pct, origin, scale },
    }
}

pub static FRAMES: [FrameEntry; 10] = [
    FrameEntry {
        frame: Frame::NoFrame,
        label: "No frame",
        thumbnail: "/frames/thumbs/none.png",
        image: None,
        placement: Placement::CENTERED,
    },
    framed(Frame::Coffee, "Coffee", "/frames/thumbs/coffee.png", "/frames/coffee.png", 40.0, 50.0, "center", 0.82),
    framed(Frame::Scooter, "Scooter", "/frames/thumbs/scooter.png", "/frames/scooter.png", 27.0, 27.0, "top left", 0.9),
    framed(Frame::Gift, "Gift", "/frames/thumbs/gift.png", "/frames/gift.png", 58.0, 50.0, "center", 0.78),
    framed(Frame::Envelope, "Envelope", "/frames/thumbs/envelope.png", "/frames/envelope.png", 55.0, 50.0, "center", 0.72),
    framed(Frame::Clipboard, "Clipboard", "/frames/thumbs/clipboard.png", "/frames/clipboard.png", 57.0, 50.0, "center", 0.8),
    framed(Frame::Phone, "Phone", "/frames/thumbs/phone.png", "/frames/phone.png", 45.0, 50.0, "center", 0.7),
    framed(Frame::Ticket, "Ticket", "/frames/thumbs/ticket.png", "/frames/ticket.png", 50.0, 30.0, "center", 0.68),
    framed(Frame::ShoppingBag, "Shopping bag", "/frames/thumbs/bag.png", "/frames/bag.png", 60.0, 50.0, "center", 0.66),
    framed(Frame::Billboard, "Billboard", "/frames/thumbs/billboard.png", "/frames/billboard.png", 38.0, 50.0, "center bottom", 0.75),
];

pub fn frame_entry(frame: Frame) -> Option<&'static FrameEntry> {
    let idx = match frame {
        Frame::NoFrame => 0,
        Frame::Coffee => 1,
        Frame::Scooter => 2,
        Frame::Gift => 3,
        Frame::Envelope => 4,
        Frame::Clipboard => 5,
        Frame::Phone => 6,
        Frame::Ticket => 7,
        Frame::ShoppingBag => 8,
        Frame::Billboard => 9,
        Frame::Unknown(_) => return None,
    };
    FRAMES.get(idx)
}

// Logos
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoEntry {
    pub logo: Logo,
    pub label: &'static str,
    pub icon: Option<&'static str>,
}

pub static LOGOS: [LogoEntry; 7] = [
    LogoEntry { logo: Logo::NoLogo, label: "None", icon: None },
    LogoEntry { logo: Logo::Link, label: "Link", icon: Some("/logos/link.png") },
    LogoEntry { logo: Logo::Location, label: "Location", icon: Some("/logos/location.png") },
    LogoEntry { logo: Logo::Mail, label: "Mail", icon: Some("/logos/mail.png") },
    LogoEntry { logo: Logo::Phone, label: "Phone", icon: Some("/logos/phone.png") },
    LogoEntry { logo: Logo::Wifi, label: "Wi-Fi", icon: Some("/logos/wifi.png") },
    LogoEntry { logo: Logo::Scan, label: "Scan me", icon: Some("/logos/scan.png") },
];

pub fn logo_entry(logo: Logo) -> Option<&'static LogoEntry> {
    let idx = match logo {
        Logo::NoLogo => 0,
        Logo::Link => 1,
        Logo::Location => 2,
        Logo::Mail => 3,
        Logo::Phone => 4,
        Logo::Wifi => 5,
        Logo::Scan => 6,
        Logo::Unknown(_) => return None,
    };
    LOGOS.get(idx)
}

// Outer borders
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl LineStyle {
    pub const fn css(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStyle {
    pub border: OuterBorder,
    pub label: &'static str,
    pub width: f64,
    pub line: LineStyle,
    pub color: Rgba,
    /// CSS `box-shadow` value drawn around the block, if any.
    pub effect: Option<&'static str>,
}

impl BorderStyle {
    /// CSS `border` shorthand, e.g. `2px solid #111827`.
    pub fn css(&self) -> String {
        format!("{}px {} {}", self.width, self.line.css(), self.color)
    }
}

const INK: Rgba = Rgba::opaque(0x11, 0x18, 0x27);
const MIST: Rgba = Rgba::opaque(0xe5, 0xe7, 0xeb);
const BLUE: Rgba = Rgba::opaque(0x3b, 0x82, 0xf6);

pub static BORDERS: [BorderStyle; 7] = [
    BorderStyle { border: OuterBorder::Thin, label: "Thin", width: 2.0, line: LineStyle::Solid, color: INK, effect: None },
    BorderStyle { border: OuterBorder::Thick, label: "Thick", width: 6.0, line: LineStyle::Solid, color: INK, effect: None },
    BorderStyle { border: OuterBorder::Dashed, label: "Dashed", width: 3.0, line: LineStyle::Dashed, color: INK, effect: None },
    BorderStyle { border: OuterBorder::Dotted, label: "Dotted", width: 3.0, line: LineStyle::Dotted, color: INK, effect: None },
    BorderStyle { border: OuterBorder::Double, label: "Double", width: 6.0, line: LineStyle::Double, color: INK, effect: None },
    BorderStyle {
        border: OuterBorder::Shadow,
        label: "Shadow",
        width: 1.0,
        line: LineStyle::Solid,
        color: MIST,
        effect: Some("0 10px 25px rgba(0, 0, 0, 0.25)"),
    },
    BorderStyle {
        border: OuterBorder::Glow,
        label: "Glow",
        width: 2.0,
        line: LineStyle::Solid,
        color: BLUE,
        effect: Some("0 0 18px rgba(59, 130, 246, 0.65)"),
    },
];

/// `None` for [`OuterBorder::NoBorder`] and unknown ids.
pub fn border_style(border: OuterBorder) -> Option<&'static BorderStyle> {
    let idx = match border {
        OuterBorder::NoBorder | OuterBorder::Unknown(_) => return None,
        OuterBorder::Thin => 0,
        OuterBorder::Thick => 1,
        OuterBorder::Dashed => 2,
        OuterBorder::Dotted => 3,
        OuterBorder::Double => 4,
        OuterBorder::Shadow => 5,
        OuterBorder::Glow => 6,
    };
    BORDERS.get(idx)
}

// Labels
//------------------------------------------------------------------------------

pub const fn shape_label(shape: Shape) -> &'static str {
    match shape {
        Shape::Square | Shape::Unknown(_) => "Square",
        Shape::Rounded => "Rounded",
        Shape::Dots => "Dots",
        Shape::Circle => "Circle",
    }
}

pub const fn dot_style_label(style: DotStyle) -> &'static str {
    match style {
        DotStyle::Square | DotStyle::Unknown(_) => "Square",
        DotStyle::Rounded => "Rounded",
        DotStyle::Circle => "Circle",
        DotStyle::Heart => "Heart",
        DotStyle::Star => "Star",
        DotStyle::Diamond => "Diamond",
        DotStyle::Hexagon => "Hexagon",
        DotStyle::Triangle => "Triangle",
    }
}

pub const fn level_label(level: Level) -> &'static str {
    match level {
        Level::L | Level::Unknown(_) => "Low (7%)",
        Level::M => "Medium (15%)",
        Level::Q => "Quartile (25%)",
        Level::H => "High (30%)",
    }
}

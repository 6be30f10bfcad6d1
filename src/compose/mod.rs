//! Frame and logo compositor.
//!
//! Layers a backdrop (card or frame artwork), the QR block and an optional logo
//! badge. Placement comes from the shared frame table; the block and the badge
//! always share one anchor.

mod raster;
mod svg;

pub use raster::{AssetSource, DirAssets, NoAssets};

use crate::codec::ModuleMatrix;
use crate::common::{Point, Rgba, Size};
use crate::config::RenderConfig;
use crate::options::{ContainerClip, DesignOptions, Frame, ResolvedOptions};
use crate::render::{ModuleRender, ModuleRenderer};
use crate::tables::{BorderStyle, Placement};

pub const FRAME_Z: i32 = 0;
pub const QR_BLOCK_Z: i32 = 10;
pub const LOGO_Z: i32 = 20;

pub const CARD_FILL: Rgba = Rgba::WHITE;
pub const CARD_CORNER_RATIO: f64 = 0.06;
pub const CARD_SHADOW: &str = "0 4px 12px rgba(0, 0, 0, 0.15)";

// Anchor
//------------------------------------------------------------------------------

/// Absolute CSS-style position: the box is placed at `(left%, top%)`, shifted by
/// `translate(-50%, -50%)` and scaled by `scale` around `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub top_pct: f64,
    pub left_pct: f64,
    pub origin: &'static str,
    pub scale: f64,
}

impl From<Placement> for Anchor {
    fn from(p: Placement) -> Self {
        Self { top_pct: p.top_pct, left_pct: p.left_pct, origin: p.origin, scale: p.scale }
    }
}

impl Anchor {
    pub fn css_transform(&self) -> String {
        format!("translate(-50%, -50%) scale({})", crate::render::fmt_num(self.scale))
    }

    /// Top left corner and side of a `side x side` box once transformed inside `canvas`.
    pub fn place(&self, canvas: Size, side: f64) -> (Point, f64) {
        let px = canvas.width * self.left_pct / 100.0;
        let py = canvas.height * self.top_pct / 100.0;
        let (ox, oy) = origin_fractions(self.origin);
        let (ox, oy) = (ox * side, oy * side);
        let x = px - side / 2.0 + ox * (1.0 - self.scale);
        let y = py - side / 2.0 + oy * (1.0 - self.scale);
        (Point::new(x, y), side * self.scale)
    }
}

// CSS transform-origin keywords; anything unrecognised stays centered
fn origin_fractions(origin: &str) -> (f64, f64) {
    let mut fx = 0.5;
    let mut fy = 0.5;
    for token in origin.split_whitespace() {
        match token {
            "left" => fx = 0.0,
            "right" => fx = 1.0,
            "top" => fy = 0.0,
            "bottom" => fy = 1.0,
            _ => {}
        }
    }
    (fx, fy)
}

// Layers
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum QrContent {
    /// Pre-rendered image; its own styling is trusted as is.
    Bitmap { href: String },
    Modules(ModuleRender),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QrBlock {
    pub anchor: Anchor,
    /// Side before the anchor scale is applied.
    pub side: f64,
    pub clip: ContainerClip,
    pub background: Rgba,
    pub border: Option<&'static BorderStyle>,
    pub content: QrContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogoBadge {
    pub anchor: Anchor,
    pub href: &'static str,
    /// Badge side relative to the QR block side.
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backdrop {
    Card { padding: f64, corner_radius: f64, fill: Rgba, shadow: &'static str },
    Frame { frame: Frame, href: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Backdrop(Backdrop),
    QrBlock(QrBlock),
    Logo(LogoBadge),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub z: i32,
    pub kind: LayerKind,
}

// Composite
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub size: Size,
    pub layers: Vec<Layer>,
}

impl Composite {
    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.layers.iter().find_map(|l| match &l.kind {
            LayerKind::Backdrop(b) => Some(b),
            _ => None,
        })
    }

    pub fn qr_block(&self) -> Option<&QrBlock> {
        self.layers.iter().find_map(|l| match &l.kind {
            LayerKind::QrBlock(b) => Some(b),
            _ => None,
        })
    }

    pub fn logo(&self) -> Option<&LogoBadge> {
        self.layers.iter().find_map(|l| match &l.kind {
            LayerKind::Logo(b) => Some(b),
            _ => None,
        })
    }

    pub fn is_framed(&self) -> bool {
        matches!(self.backdrop(), Some(Backdrop::Frame { .. }))
    }

    /// Drawn rect of the QR block: top left corner and scaled side.
    pub fn block_rect(&self) -> Option<(Point, f64)> {
        self.qr_block().map(|b| b.anchor.place(self.size, b.side))
    }
}

// Compositor
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Compositor {
    config: RenderConfig,
}

impl Compositor {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Unscaled side of the QR block, which is also the module render size.
    pub fn block_side(&self, resolved: &ResolvedOptions, size: Size) -> f64 {
        let min = size.min_side();
        match resolved.frame {
            Some(_) => min * self.config.framed_block_ratio,
            None => (min - 2.0 * self.config.card_padding).max(0.0),
        }
    }

    pub fn compose(&self, resolved: &ResolvedOptions, size: Size, content: QrContent) -> Composite {
        let side = self.block_side(resolved, size);
        let anchor = Anchor::from(resolved.placement());

        let backdrop = match resolved.frame {
            Some(art) => Backdrop::Frame { frame: art.frame, href: art.image },
            None => Backdrop::Card {
                padding: self.config.card_padding,
                corner_radius: size.min_side() * CARD_CORNER_RATIO,
                fill: CARD_FILL,
                shadow: CARD_SHADOW,
            },
        };

        let mut layers = vec![
            Layer { z: FRAME_Z, kind: LayerKind::Backdrop(backdrop) },
            Layer {
                z: QR_BLOCK_Z,
                kind: LayerKind::QrBlock(QrBlock {
                    anchor,
                    side,
                    clip: resolved.clip,
                    background: resolved.background,
                    border: resolved.border,
                    content,
                }),
            },
        ];
        if let Some(href) = resolved.logo {
            layers.push(Layer {
                z: LOGO_Z,
                kind: LayerKind::Logo(LogoBadge { anchor, href, ratio: self.config.logo_ratio }),
            });
        }
        layers.sort_by_key(|l| l.z);

        Composite { size, layers }
    }

    /// Quiet modules around a symbol `modules` wide: the configured margin, widened
    /// when the container clip would otherwise cut into the finder patterns.
    pub fn quiet_zone(&self, clip: ContainerClip, modules: usize) -> usize {
        self.config.quiet_zone.max(clip.min_quiet_zone(modules))
    }

    /// Live path: styles each module of `matrix`, or shows the loading
    /// placeholder when the matrix is not available yet.
    pub fn compose_modules(
        &self,
        options: &DesignOptions,
        matrix: Option<&ModuleMatrix>,
        size: Size,
    ) -> Composite {
        let resolved = options.resolve();
        let side = self.block_side(&resolved, size);
        let quiet_zone = matrix.map_or(0, |m| self.quiet_zone(resolved.clip, m.width()));
        let modules = ModuleRenderer::from_resolved(&resolved, side)
            .quiet_zone(quiet_zone)
            .render_or_placeholder(matrix);
        self.compose(&resolved, size, QrContent::Modules(modules))
    }

    /// Stored-image path: same placement, no per-module styling.
    pub fn compose_bitmap(&self, options: &DesignOptions, href: impl Into<String>, size: Size) -> Composite {
        self.compose(&options.resolve(), size, QrContent::Bitmap { href: href.into() })
    }
}

#[cfg(test)]
mod compositor_tests {
    use test_case::test_case;

    use super::{origin_fractions, Anchor, Backdrop, Compositor, LayerKind, QrContent};
    use crate::codec::ModuleMatrix;
    use crate::common::{Point, Size};
    use crate::config::RenderConfig;
    use crate::options::{ContainerClip, DesignOptions, Frame, Logo, Shape};
    use crate::render::ModuleRender;
    use crate::tables::Placement;

    fn matrix() -> ModuleMatrix {
        ModuleMatrix::from_rows(&["##", "#."]).unwrap()
    }

    #[test_case("center", (0.5, 0.5))]
    #[test_case("top left", (0.0, 0.0))]
    #[test_case("center bottom", (0.5, 1.0))]
    #[test_case("right", (1.0, 0.5))]
    #[test_case("50% 50%", (0.5, 0.5))]
    fn test_origin_fractions(origin: &str, exp: (f64, f64)) {
        assert_eq!(origin_fractions(origin), exp);
    }

    #[test]
    fn test_centered_anchor_place() {
        let anchor = Anchor::from(Placement::CENTERED);
        assert_eq!(anchor.place(Size::square(100.0), 60.0), (Point::new(20.0, 20.0), 60.0));
        assert_eq!(anchor.css_transform(), "translate(-50%, -50%) scale(1)");
    }

    #[test]
    fn test_scaled_anchor_keeps_center_for_center_origin() {
        let anchor = Anchor { top_pct: 50.0, left_pct: 50.0, origin: "center", scale: 0.5 };
        let (p, side) = anchor.place(Size::square(200.0), 100.0);
        assert_eq!(side, 50.0);
        assert_eq!(p, Point::new(75.0, 75.0));
    }

    #[test]
    fn test_no_frame_card_layout() {
        let compositor = Compositor::default();
        let composite = compositor.compose_modules(&DesignOptions::default(), Some(&matrix()), Size::square(232.0));
        assert!(matches!(composite.backdrop(), Some(Backdrop::Card { padding, .. }) if *padding == 16.0));
        let block = composite.qr_block().unwrap();
        assert_eq!(block.side, 200.0);
        assert_eq!(composite.block_rect(), Some((Point::new(16.0, 16.0), 200.0)));
        assert!(composite.logo().is_none());
    }

    #[test_case(Frame::NoFrame)]
    #[test_case(Frame::Unknown(0))]
    #[test_case(Frame::Unknown(11))]
    fn test_missing_frame_falls_back_to_card(frame: Frame) {
        let opts = DesignOptions::default().with_frame(frame);
        let composite = Compositor::default().compose_modules(&opts, Some(&matrix()), Size::square(300.0));
        assert!(!composite.is_framed());
        assert_eq!(composite.qr_block().unwrap().anchor, Anchor::from(Placement::CENTERED));
    }

    #[test]
    fn test_layers_sorted_by_z() {
        let opts = DesignOptions::default().with_frame(Frame::Gift).with_logo(Logo::Wifi);
        let composite = Compositor::default().compose_modules(&opts, None, Size::square(300.0));
        let zs = composite.layers.iter().map(|l| l.z).collect::<Vec<_>>();
        assert_eq!(zs, vec![0, 10, 20]);
        assert!(matches!(composite.layers[0].kind, LayerKind::Backdrop(Backdrop::Frame { frame: Frame::Gift, .. })));
    }

    #[test]
    fn test_logo_shares_block_anchor() {
        let opts = DesignOptions::default().with_frame(Frame::Scooter).with_logo(Logo::Location);
        let composite = Compositor::default().compose_modules(&opts, Some(&matrix()), Size::square(400.0));
        let block = composite.qr_block().unwrap();
        let logo = composite.logo().unwrap();
        assert_eq!(block.anchor, logo.anchor);
        assert_eq!((block.anchor.top_pct, block.anchor.left_pct), (27.0, 27.0));
        assert_eq!(logo.href, "/logos/location.png");
    }

    #[test]
    fn test_bitmap_and_modules_share_placement() {
        let compositor = Compositor::default();
        let opts = DesignOptions::default().with_frame(Frame::Coffee);
        let size = Size::new(300.0, 420.0);
        let live = compositor.compose_modules(&opts, Some(&matrix()), size);
        let stored = compositor.compose_bitmap(&opts, "/previews/42.png", size);
        assert_eq!(live.block_rect(), stored.block_rect());
        assert_eq!(live.qr_block().unwrap().anchor, stored.qr_block().unwrap().anchor);
        assert_eq!(
            stored.qr_block().unwrap().content,
            QrContent::Bitmap { href: "/previews/42.png".to_string() }
        );
    }

    #[test]
    fn test_loading_placeholder_without_matrix() {
        let composite = Compositor::default().compose_modules(&DesignOptions::default(), None, Size::square(100.0));
        assert!(matches!(
            composite.qr_block().unwrap().content,
            QrContent::Modules(ModuleRender::Loading { .. })
        ));
    }

    #[test_case(0, ContainerClip::None, 0)]
    #[test_case(4, ContainerClip::None, 4)]
    #[test_case(4, ContainerClip::Full, 7)]
    #[test_case(10, ContainerClip::Full, 10)]
    fn test_quiet_zone_widens_for_clip(configured: usize, clip: ContainerClip, exp: usize) {
        let compositor = Compositor::new(RenderConfig { quiet_zone: configured, ..RenderConfig::default() });
        assert_eq!(compositor.quiet_zone(clip, 25), exp);
    }

    #[test]
    fn test_modules_inset_by_quiet_zone() {
        let matrix = ModuleMatrix::from_rows(&["#.", ".#"]).unwrap();
        let opts = DesignOptions::default();
        let size = Size::square(132.0);

        let tight = Compositor::new(RenderConfig { quiet_zone: 0, ..RenderConfig::default() });
        let roomy = Compositor::new(RenderConfig { quiet_zone: 4, ..RenderConfig::default() });
        let layer = |c: &Compositor| match &c.compose_modules(&opts, Some(&matrix), size).qr_block().unwrap().content {
            QrContent::Modules(ModuleRender::Drawn(layer)) => layer.clone(),
            other => panic!("Expected drawn modules, got {other:?}"),
        };

        let (tight, roomy) = (layer(&tight), layer(&roomy));
        assert_eq!((tight.dot_size, tight.primitives[0].origin), (50.0, Point::new(0.0, 0.0)));
        assert_eq!((roomy.dot_size, roomy.primitives[0].origin), (10.0, Point::new(40.0, 40.0)));
        assert_eq!(roomy.size, tight.size);
    }

    #[test]
    fn test_circle_shape_widens_quiet_zone() {
        let matrix = ModuleMatrix::from_rows(&["#.", ".#"]).unwrap();
        let opts = DesignOptions::default().with_shape(Shape::Circle);
        let compositor = Compositor::new(RenderConfig { quiet_zone: 0, ..RenderConfig::default() });
        let composite = compositor.compose_modules(&opts, Some(&matrix), Size::square(132.0));
        let QrContent::Modules(ModuleRender::Drawn(layer)) = &composite.qr_block().unwrap().content else {
            panic!("Expected drawn modules");
        };
        assert_eq!(layer.quiet_zone, 2);
    }
}

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba as Pixel, RgbaImage};
use log::warn;

use super::{Backdrop, Composite, LayerKind, QrBlock, QrContent};
use crate::common::{f64_to_i32, f64_to_px, Point, Rgba};
use crate::render::ModuleRender;

// Asset resolution
//------------------------------------------------------------------------------

/// Resolves the fixed asset paths used by frames, logos and stored previews.
/// A missing asset is `None`; callers draw nothing in its place.
pub trait AssetSource {
    fn load(&self, href: &str) -> Option<RgbaImage>;
}

/// Loads assets from a directory; `/frames/gift.png` maps to `<root>/frames/gift.png`.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn path_of(&self, href: &str) -> PathBuf {
        self.root.join(href.trim_start_matches('/'))
    }
}

impl AssetSource for DirAssets {
    fn load(&self, href: &str) -> Option<RgbaImage> {
        let path = self.path_of(href);
        match image::open(&path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                warn!("Asset {} unavailable, drawing without it: {e}", path.display());
                None
            }
        }
    }
}

/// Resolves nothing; every frame, logo and bitmap is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn load(&self, _href: &str) -> Option<RgbaImage> {
        None
    }
}

// Bitmap output
//------------------------------------------------------------------------------

impl Composite {
    /// Flattens all layers into one image. Drop shadows and dash patterns are
    /// vector-only and are not drawn here.
    pub fn flatten(&self, assets: &dyn AssetSource) -> RgbaImage {
        let w = f64_to_px(self.size.width).max(1);
        let h = f64_to_px(self.size.height).max(1);
        let mut canvas = RgbaImage::from_pixel(w, h, Rgba::TRANSPARENT.to_pixel());

        for layer in &self.layers {
            match &layer.kind {
                LayerKind::Backdrop(Backdrop::Card { corner_radius, fill, .. }) => {
                    let side = self.size.min_side();
                    let at = Point::new((self.size.width - side) / 2.0, (self.size.height - side) / 2.0);
                    fill_rounded(&mut canvas, at, side, *corner_radius, fill.to_pixel());
                }
                LayerKind::Backdrop(Backdrop::Frame { href, .. }) => {
                    if let Some(frame) = assets.load(href) {
                        let frame = imageops::resize(&frame, w, h, FilterType::Triangle);
                        imageops::overlay(&mut canvas, &frame, 0, 0);
                    }
                }
                LayerKind::QrBlock(block) => {
                    let (at, side) = block.anchor.place(self.size, block.side);
                    let img = block_image(block, side, assets);
                    imageops::overlay(&mut canvas, &img, f64_to_i32(at.x).into(), f64_to_i32(at.y).into());
                }
                LayerKind::Logo(logo) => {
                    let Some((at, block_side)) = self.block_rect() else { continue };
                    let side = f64_to_px(block_side * logo.ratio).max(1);
                    if let Some(icon) = assets.load(logo.href) {
                        let icon = imageops::resize(&icon, side, side, FilterType::Triangle);
                        let offset = (block_side - side as f64) / 2.0;
                        let x = f64_to_i32(at.x + offset);
                        let y = f64_to_i32(at.y + offset);
                        imageops::overlay(&mut canvas, &icon, x.into(), y.into());
                    }
                }
            }
        }
        canvas
    }
}

fn block_image(block: &QrBlock, side: f64, assets: &dyn AssetSource) -> RgbaImage {
    let side_px = f64_to_px(side).max(1);
    let mut img = RgbaImage::from_pixel(side_px, side_px, block.background.to_pixel());

    let content = match &block.content {
        QrContent::Modules(ModuleRender::Drawn(layer)) => Some(layer.to_image(0)),
        QrContent::Modules(ModuleRender::Loading { .. }) => None,
        QrContent::Bitmap { href } => assets.load(href),
    };
    if let Some(content) = content {
        let content = if content.dimensions() == (side_px, side_px) {
            content
        } else {
            imageops::resize(&content, side_px, side_px, FilterType::Nearest)
        };
        imageops::overlay(&mut img, &content, 0, 0);
    }

    let radius = block.clip.corner_ratio() * side;
    if let Some(border) = block.border {
        let width = border.width * block.anchor.scale;
        let color = border.color.to_pixel();
        for (x, y, px) in img.enumerate_pixels_mut() {
            let (fx, fy) = (x as f64 + 0.5, y as f64 + 0.5);
            let inner = (radius - width).max(0.0);
            if !in_rounded(fx - width, fy - width, side - 2.0 * width, inner) {
                *px = color;
            }
        }
    }

    // Clip last so the border follows the container shape
    let clear = Rgba::TRANSPARENT.to_pixel();
    for (x, y, px) in img.enumerate_pixels_mut() {
        if !in_rounded(x as f64 + 0.5, y as f64 + 0.5, side, radius) {
            *px = clear;
        }
    }
    img
}

fn fill_rounded(canvas: &mut RgbaImage, at: Point, side: f64, radius: f64, color: Pixel<u8>) {
    for (x, y, px) in canvas.enumerate_pixels_mut() {
        if in_rounded(x as f64 + 0.5 - at.x, y as f64 + 0.5 - at.y, side, radius) {
            *px = color;
        }
    }
}

// Point-in-rounded-square test in the square's own coordinates
fn in_rounded(x: f64, y: f64, side: f64, radius: f64) -> bool {
    if x < 0.0 || y < 0.0 || x > side || y > side {
        return false;
    }
    let r = radius.min(side / 2.0);
    let cx = x.clamp(r, side - r);
    let cy = y.clamp(r, side - r);
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
mod flatten_tests {
    use std::collections::HashMap;

    use image::{Rgba, RgbaImage};

    use super::{in_rounded, AssetSource, NoAssets};
    use crate::codec::ModuleMatrix;
    use crate::common::Size;
    use crate::compose::Compositor;
    use crate::config::RenderConfig;
    use crate::options::{DesignOptions, Frame, Logo, OuterBorder, Shape};

    struct MapAssets(HashMap<&'static str, RgbaImage>);

    impl AssetSource for MapAssets {
        fn load(&self, href: &str) -> Option<RgbaImage> {
            self.0.get(href).cloned()
        }
    }

    fn matrix() -> ModuleMatrix {
        ModuleMatrix::from_rows(&["#.", ".."]).unwrap()
    }

    // Modules run edge to edge unless a clip asks for more room
    fn edge_to_edge() -> Compositor {
        Compositor::new(RenderConfig { quiet_zone: 0, ..RenderConfig::default() })
    }

    #[test]
    fn test_in_rounded() {
        assert!(in_rounded(5.0, 5.0, 10.0, 0.0));
        assert!(in_rounded(0.1, 0.1, 10.0, 0.0));
        assert!(!in_rounded(0.1, 0.1, 10.0, 5.0));
        assert!(in_rounded(5.0, 0.1, 10.0, 5.0));
        assert!(!in_rounded(-0.1, 5.0, 10.0, 0.0));
    }

    #[test]
    fn test_flatten_card() {
        let opts = DesignOptions::default().with_bg_color("#3b82f6");
        let composite = edge_to_edge().compose_modules(&opts, Some(&matrix()), Size::square(132.0));
        let img = composite.flatten(&NoAssets);
        assert_eq!(img.dimensions(), (132, 132));
        // padding is card white, first module dark, last module shows the background
        assert_eq!(*img.get_pixel(8, 66), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(20, 20), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(110, 110), Rgba([0x3b, 0x82, 0xf6, 255]));
    }

    #[test]
    fn test_flatten_circle_clip() {
        let opts = DesignOptions::default().with_shape(Shape::Circle);
        let composite = edge_to_edge().compose_modules(&opts, Some(&matrix()), Size::square(132.0));
        let img = composite.flatten(&NoAssets);
        // block corner is clipped away, leaving the card fill; the circle keeps
        // two quiet modules so the dark module sits inside the clip
        assert_eq!(*img.get_pixel(17, 17), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(40, 40), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(55, 55), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_flatten_quiet_zone_margin() {
        let opts = DesignOptions::default().with_bg_color("#3b82f6");
        let size = Size::square(132.0);
        let img = Compositor::default().compose_modules(&opts, Some(&matrix()), size).flatten(&NoAssets);
        // Four quiet modules of 10px: the block corner shows the background and
        // the dark module starts at 16 + 40
        assert_eq!(*img.get_pixel(20, 20), Rgba([0x3b, 0x82, 0xf6, 255]));
        assert_eq!(*img.get_pixel(55, 55), Rgba([0x3b, 0x82, 0xf6, 255]));
        assert_eq!(*img.get_pixel(57, 57), Rgba([0, 0, 0, 255]));

        let wide = Compositor::new(RenderConfig { quiet_zone: 10, ..RenderConfig::default() });
        let wide_img = wide.compose_modules(&opts, Some(&matrix()), size).flatten(&NoAssets);
        assert_ne!(img, wide_img);
        assert_ne!(img, edge_to_edge().compose_modules(&opts, Some(&matrix()), size).flatten(&NoAssets));
    }

    #[test]
    fn test_flatten_border() {
        let opts = DesignOptions::default().with_outer_border(OuterBorder::Thick);
        let composite = edge_to_edge().compose_modules(&opts, Some(&matrix()), Size::square(132.0));
        let img = composite.flatten(&NoAssets);
        assert_eq!(*img.get_pixel(110, 17), Rgba([0x11, 0x18, 0x27, 255]));
        assert_eq!(*img.get_pixel(100, 30), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_missing_assets_still_draw_block() {
        let opts = DesignOptions::default().with_frame(Frame::Phone).with_logo(Logo::Scan);
        let composite = edge_to_edge().compose_modules(&opts, Some(&matrix()), Size::square(200.0));
        let img = composite.flatten(&NoAssets);
        assert_eq!(img.dimensions(), (200, 200));
        let (at, _) = composite.block_rect().unwrap();
        let px = img.get_pixel(at.x.ceil() as u32 + 1, at.y.ceil() as u32 + 1);
        assert_eq!(*px, Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_frame_and_logo_drawn_when_available() {
        let red = Rgba([255, 0, 0, 255]);
        let green = Rgba([0, 255, 0, 255]);
        let assets = MapAssets(HashMap::from([
            ("/frames/phone.png", RgbaImage::from_pixel(4, 4, red)),
            ("/logos/scan.png", RgbaImage::from_pixel(4, 4, green)),
        ]));
        let opts = DesignOptions::default().with_frame(Frame::Phone).with_logo(Logo::Scan);
        let composite = Compositor::default().compose_modules(&opts, Some(&matrix()), Size::square(200.0));
        let img = composite.flatten(&assets);
        assert_eq!(*img.get_pixel(1, 1), red);
        let (at, side) = composite.block_rect().unwrap();
        let center = img.get_pixel((at.x + side / 2.0) as u32, (at.y + side / 2.0) as u32);
        assert_eq!(*center, green);
    }
}

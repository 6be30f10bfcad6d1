use super::{Backdrop, Composite, LayerKind, LogoBadge, QrBlock, QrContent};
use crate::common::{Point, Size};
use crate::render::{fmt_num, ModuleRender};
use crate::tables::LineStyle;

const LOADING_FILL: &str = "#e5e7eb";

// Vector output
//------------------------------------------------------------------------------

const DEFAULT_ID: &str = "qr";

impl Composite {
    /// Standalone document. Use [`Composite::to_svg_with_id`] when several
    /// composites are inlined into one page.
    pub fn to_svg(&self) -> String {
        self.to_svg_with_id(DEFAULT_ID)
    }

    /// Element ids (clip path, card shadow) are prefixed with `id` so inlined
    /// composites never resolve each other's definitions.
    pub fn to_svg_with_id(&self, id: &str) -> String {
        let id = id_prefix(id);
        let (w, h) = (fmt_num(self.size.width), fmt_num(self.size.height));
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        for layer in &self.layers {
            match &layer.kind {
                LayerKind::Backdrop(backdrop) => out.push_str(&backdrop_svg(backdrop, self.size, &id)),
                LayerKind::QrBlock(block) => out.push_str(&block_svg(block, self.size, &id)),
                LayerKind::Logo(logo) => {
                    if let Some((at, side)) = self.block_rect() {
                        out.push_str(&logo_svg(logo, at, side));
                    }
                }
            }
        }
        out.push_str("</svg>");
        out
    }
}

// Keeps characters valid in an XML id and a url(#...) reference
fn id_prefix(id: &str) -> String {
    let id = id.chars().filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_')).collect::<String>();
    let first = id.chars().next();
    match first {
        None => DEFAULT_ID.to_string(),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => id,
        Some(_) => format!("{DEFAULT_ID}-{id}"),
    }
}

/// Escapes a value for a double-quoted XML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn backdrop_svg(backdrop: &Backdrop, size: Size, id: &str) -> String {
    let (w, h) = (fmt_num(size.width), fmt_num(size.height));
    match backdrop {
        Backdrop::Card { corner_radius, fill, .. } => {
            let side = size.min_side();
            let x = (size.width - side) / 2.0;
            let y = (size.height - side) / 2.0;
            format!(
                concat!(
                    r#"<defs><filter id="{id}-card-shadow" x="-10%" y="-10%" width="120%" height="130%">"#,
                    r#"<feDropShadow dx="0" dy="4" stdDeviation="6" flood-opacity="0.15"/></filter></defs>"#,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" filter="url(#{id}-card-shadow)"/>"#
                ),
                fmt_num(x),
                fmt_num(y),
                fmt_num(side),
                fmt_num(side),
                fmt_num(*corner_radius),
                fill,
                id = id,
            )
        }
        // Stretched to the canvas, matching the raster back-end
        Backdrop::Frame { href, .. } => format!(
            r#"<image class="qr-frame" href="{}" width="{w}" height="{h}" preserveAspectRatio="none"/>"#,
            escape_attr(href)
        ),
    }
}

fn block_svg(block: &QrBlock, canvas: Size, id: &str) -> String {
    let (at, _) = block.anchor.place(canvas, block.side);
    let side = fmt_num(block.side);
    let radius = fmt_num(block.clip.corner_ratio() * block.side);

    let mut out = format!(
        r#"<g class="qr-block {}" transform="translate({} {}) scale({})">"#,
        block.clip.css_class(),
        fmt_num(at.x),
        fmt_num(at.y),
        fmt_num(block.anchor.scale)
    );
    out.push_str(&format!(
        r#"<clipPath id="{id}-clip"><rect width="{side}" height="{side}" rx="{radius}"/></clipPath><g clip-path="url(#{id}-clip)">"#
    ));
    out.push_str(&format!(r#"<rect width="{side}" height="{side}" fill="{}"/>"#, block.background));
    match &block.content {
        QrContent::Bitmap { href } => {
            out.push_str(&format!(r#"<image href="{}" width="{side}" height="{side}"/>"#, escape_attr(href)));
        }
        QrContent::Modules(ModuleRender::Drawn(layer)) => {
            out.push_str(&layer.to_svg_fragment(Point::default()));
        }
        QrContent::Modules(ModuleRender::Loading { .. }) => {
            out.push_str(&format!(
                r#"<rect class="qr-loading" width="{side}" height="{side}" fill="{LOADING_FILL}" opacity="0.6"/>"#
            ));
        }
    }
    out.push_str("</g>");

    if let Some(border) = block.border {
        let inset = border.width / 2.0;
        let dash = match border.line {
            LineStyle::Dashed => format!(r#" stroke-dasharray="{}""#, fmt_num(border.width * 3.0)),
            LineStyle::Dotted => format!(r#" stroke-dasharray="{}" stroke-linecap="round""#, fmt_num(border.width)),
            LineStyle::Solid | LineStyle::Double => String::new(),
        };
        let effect = border.effect.map(|e| format!(r#" style="filter: drop-shadow({e})""#)).unwrap_or_default();
        out.push_str(&format!(
            r#"<rect x="{i}" y="{i}" width="{s}" height="{s}" rx="{radius}" fill="none" stroke="{}" stroke-width="{}"{dash}{effect}/>"#,
            border.color,
            fmt_num(border.width),
            i = fmt_num(inset),
            s = fmt_num(block.side - border.width),
        ));
    }
    out.push_str("</g>");
    out
}

// Centered on the drawn block whatever the anchor origin
fn logo_svg(logo: &LogoBadge, block_at: Point, block_side: f64) -> String {
    let side = block_side * logo.ratio;
    let x = block_at.x + (block_side - side) / 2.0;
    let y = block_at.y + (block_side - side) / 2.0;
    format!(
        r#"<image class="qr-logo" href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
        escape_attr(logo.href),
        fmt_num(x),
        fmt_num(y),
        fmt_num(side),
        fmt_num(side)
    )
}

#[cfg(test)]
mod composite_svg_tests {
    use image::{Rgba, RgbaImage};
    use test_case::test_case;

    use super::{escape_attr, id_prefix};
    use crate::render::fmt_num;
    use crate::codec::ModuleMatrix;
    use crate::common::Size;
    use crate::compose::{AssetSource, Compositor};
    use crate::options::{DesignOptions, Frame, Logo, OuterBorder, Shape};

    fn matrix() -> ModuleMatrix {
        ModuleMatrix::from_rows(&["#.", ".#"]).unwrap()
    }

    #[test]
    fn test_card_svg() {
        let svg = Compositor::default().compose_modules(&DesignOptions::default(), Some(&matrix()), Size::square(132.0)).to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains("xmlns:xlink"));
        assert!(svg.contains(r#"<filter id="qr-card-shadow""#));
        assert!(svg.contains(r#"filter="url(#qr-card-shadow)""#));
        assert!(svg.contains(r#"clip-path="url(#qr-clip)""#));
        assert!(svg.contains(r#"transform="translate(16 16) scale(1)""#));
        assert_eq!(svg.matches("<rect x=\"").count(), 3);
        assert!(!svg.contains("qr-logo"));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn test_framed_svg_with_logo_and_border() {
        let opts = DesignOptions::default()
            .with_frame(Frame::Ticket)
            .with_logo(Logo::Mail)
            .with_outer_border(OuterBorder::Dashed);
        let svg = Compositor::default().compose_modules(&opts, Some(&matrix()), Size::square(400.0)).to_svg();
        assert!(svg.contains(r#"href="/frames/ticket.png""#));
        assert!(svg.contains(r#"href="/logos/mail.png""#));
        assert!(svg.contains("stroke-dasharray"));
        let frame_pos = svg.find("/frames/ticket.png").unwrap();
        let block_pos = svg.find("qr-block").unwrap();
        let logo_pos = svg.find("qr-logo").unwrap();
        assert!(frame_pos < block_pos && block_pos < logo_pos);
    }

    #[test]
    fn test_loading_svg() {
        let svg = Compositor::default().compose_modules(&DesignOptions::default(), None, Size::square(100.0)).to_svg();
        assert!(svg.contains("qr-loading"));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("/previews/7.png?w=1&h=2"), "/previews/7.png?w=1&amp;h=2");
        assert_eq!(escape_attr(r#"a"b<c>'d"#), "a&quot;b&lt;c&gt;&apos;d");
        assert_eq!(escape_attr("/logos/mail.png"), "/logos/mail.png");
    }

    #[test]
    fn test_bitmap_href_is_escaped() {
        let opts = DesignOptions::default();
        let composite = Compositor::default().compose_bitmap(&opts, r#"/previews/7.png?w=1&h=2"x="#, Size::square(200.0));
        let svg = composite.to_svg();
        assert!(svg.contains(r#"href="/previews/7.png?w=1&amp;h=2&quot;x=""#));
        assert!(!svg.contains("&h="));
    }

    #[test_case("saved-3", "saved-3")]
    #[test_case("a b\"c", "abc")]
    #[test_case("7", "qr-7")]
    #[test_case("", "qr")]
    fn test_id_prefix(id: &str, exp: &str) {
        assert_eq!(id_prefix(id), exp);
    }

    #[test]
    fn test_inlined_composites_use_distinct_ids() {
        let compositor = Compositor::default();
        let round = DesignOptions::default().with_shape(Shape::Circle);
        let first = compositor.compose_modules(&round, Some(&matrix()), Size::square(100.0)).to_svg_with_id("saved-1");
        let second = compositor
            .compose_modules(&DesignOptions::default(), Some(&matrix()), Size::square(300.0))
            .to_svg_with_id("saved-2");

        assert!(first.contains(r#"<clipPath id="saved-1-clip">"#));
        assert!(first.contains(r#"url(#saved-1-card-shadow)"#));
        assert!(second.contains(r#"<clipPath id="saved-2-clip">"#));
        assert!(!second.contains("saved-1"));
    }

    struct OneFrame(RgbaImage);

    impl AssetSource for OneFrame {
        fn load(&self, href: &str) -> Option<RgbaImage> {
            (href == "/frames/billboard.png").then(|| self.0.clone())
        }
    }

    #[test]
    fn test_frame_box_matches_raster_on_wide_canvas() {
        let opts = DesignOptions::default().with_frame(Frame::Billboard);
        let composite = Compositor::default().compose_modules(&opts, Some(&matrix()), Size::new(640.0, 480.0));

        // Vector: the artwork fills the whole canvas without letterboxing
        let svg = composite.to_svg();
        assert!(svg.contains(r#"width="640" height="480" preserveAspectRatio="none""#));

        // Raster: a square frame asset is stretched to the same box
        let red = Rgba([255, 0, 0, 255]);
        let img = composite.flatten(&OneFrame(RgbaImage::from_pixel(8, 8, red)));
        assert_eq!(img.dimensions(), (640, 480));
        for (x, y) in [(0, 0), (639, 0), (0, 479), (639, 479)] {
            assert_eq!(*img.get_pixel(x, y), red);
        }

        // Both back-ends place the block from the same rect
        let (at, _) = composite.block_rect().unwrap();
        let scale = composite.qr_block().unwrap().anchor.scale;
        let transform = format!("translate({} {}) scale({})", fmt_num(at.x), fmt_num(at.y), fmt_num(scale));
        assert!(svg.contains(&transform), "{transform} missing");
    }
}

use super::{Glyph, ModuleLayer, Primitive};
use crate::common::Point;

// SVG back-end
//------------------------------------------------------------------------------

/// Formats with at most three decimals and no trailing zeros.
pub(crate) fn fmt_num(num: f64) -> String {
    let s = format!("{num:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        s => s.to_string(),
    }
}

impl ModuleLayer {
    /// Standalone document with the background filled.
    pub fn to_svg(&self) -> String {
        let sz = fmt_num(self.size);
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{sz}" height="{sz}" viewBox="0 0 {sz} {sz}">"#
        );
        out.push_str(&format!(r#"<rect width="{sz}" height="{sz}" fill="{}"/>"#, self.background));
        out.push_str(&self.to_svg_fragment(Point::default()));
        out.push_str("</svg>");
        out
    }

    /// Dark modules only, grouped and translated by `at`.
    pub fn to_svg_fragment(&self, at: Point) -> String {
        let mut out = format!(
            r#"<g transform="translate({} {})" fill="{}">"#,
            fmt_num(at.x),
            fmt_num(at.y),
            self.foreground
        );
        for p in &self.primitives {
            out.push_str(&primitive_svg(p));
        }
        out.push_str("</g>");
        out
    }
}

fn primitive_svg(p: &Primitive) -> String {
    let (x, y, sz) = (fmt_num(p.origin.x), fmt_num(p.origin.y), fmt_num(p.size));
    match &p.glyph {
        Glyph::Rect => format!(r#"<rect x="{x}" y="{y}" width="{sz}" height="{sz}"/>"#),
        Glyph::RoundedRect { radius } => {
            let r = fmt_num(*radius);
            format!(r#"<rect x="{x}" y="{y}" width="{sz}" height="{sz}" rx="{r}" ry="{r}"/>"#)
        }
        Glyph::Circle { center, radius } => format!(
            r#"<circle cx="{}" cy="{}" r="{}"/>"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(*radius)
        ),
        Glyph::Polygon(points) => {
            let pts = points
                .iter()
                .map(|pt| format!("{},{}", fmt_num(pt.x), fmt_num(pt.y)))
                .collect::<Vec<_>>()
                .join(" ");
            format!(r#"<polygon points="{pts}"/>"#)
        }
    }
}

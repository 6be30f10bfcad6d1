//! Module renderer: turns a module matrix into positioned drawable primitives.

mod glyph;
mod raster;
mod svg;

pub use glyph::unit_outline;
pub(crate) use svg::fmt_num;

use crate::codec::ModuleMatrix;
use crate::common::{Point, Rgba};
use crate::options::{DotStyle, ResolvedOptions};

pub const ROUNDED_RADIUS_RATIO: f64 = 0.15;

// Primitives
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    Rect,
    RoundedRect { radius: f64 },
    Circle { center: Point, radius: f64 },
    /// Closed outline in absolute pixel coordinates.
    Polygon(Vec<Point>),
}

/// One dark module. `origin` is the top left corner of its `size x size` cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub row: usize,
    pub col: usize,
    pub origin: Point,
    pub size: f64,
    pub glyph: Glyph,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleLayer {
    pub size: f64,
    pub dot_size: f64,
    pub modules: usize,
    /// Light modules kept clear on each side of the symbol, inside `size`.
    pub quiet_zone: usize,
    pub style: DotStyle,
    pub foreground: Rgba,
    pub background: Rgba,
    pub primitives: Vec<Primitive>,
}

/// Output of the renderer. `Loading` stands in while the codec has not produced
/// a matrix yet.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleRender {
    Loading { size: f64, background: Rgba },
    Drawn(ModuleLayer),
}

impl ModuleRender {
    pub fn size(&self) -> f64 {
        match self {
            Self::Loading { size, .. } => *size,
            Self::Drawn(layer) => layer.size,
        }
    }

    pub fn background(&self) -> Rgba {
        match self {
            Self::Loading { background, .. } => *background,
            Self::Drawn(layer) => layer.background,
        }
    }

    pub fn layer(&self) -> Option<&ModuleLayer> {
        match self {
            Self::Loading { .. } => None,
            Self::Drawn(layer) => Some(layer),
        }
    }
}

// Renderer
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleRenderer {
    style: DotStyle,
    foreground: Rgba,
    background: Rgba,
    size: f64,
    quiet_zone: usize,
}

impl ModuleRenderer {
    pub fn new(size: f64) -> Self {
        Self {
            style: DotStyle::Square,
            foreground: Rgba::BLACK,
            background: Rgba::WHITE,
            size: size.max(0.0),
            quiet_zone: 0,
        }
    }

    pub fn from_resolved(resolved: &ResolvedOptions, size: f64) -> Self {
        Self::new(size)
            .style(resolved.dot_style)
            .foreground(resolved.foreground)
            .background(resolved.background)
    }

    /// Unknown styles render as squares.
    pub fn style(self, style: DotStyle) -> Self {
        Self { style: style.or_default(), ..self }
    }

    pub fn foreground(self, foreground: Rgba) -> Self {
        Self { foreground, ..self }
    }

    pub fn background(self, background: Rgba) -> Self {
        Self { background, ..self }
    }

    /// Shrinks the symbol so `quiet_zone` light modules fit on each side within `size`.
    pub fn quiet_zone(self, quiet_zone: usize) -> Self {
        Self { quiet_zone, ..self }
    }

    pub fn render(&self, matrix: &ModuleMatrix) -> ModuleLayer {
        let modules = matrix.width();
        let dot_size = self.size / (modules + 2 * self.quiet_zone) as f64;
        let inset = self.quiet_zone as f64 * dot_size;

        // Light modules draw nothing so the container background shows through
        let primitives = matrix
            .iter_dark()
            .map(|(row, col)| {
                let origin = Point::new(inset + col as f64 * dot_size, inset + row as f64 * dot_size);
                Primitive { row, col, origin, size: dot_size, glyph: self.glyph(origin, dot_size) }
            })
            .collect();

        ModuleLayer {
            size: self.size,
            dot_size,
            modules,
            quiet_zone: self.quiet_zone,
            style: self.style,
            foreground: self.foreground,
            background: self.background,
            primitives,
        }
    }

    pub fn render_or_placeholder(&self, matrix: Option<&ModuleMatrix>) -> ModuleRender {
        match matrix {
            Some(matrix) => ModuleRender::Drawn(self.render(matrix)),
            None => self.placeholder(),
        }
    }

    pub fn placeholder(&self) -> ModuleRender {
        ModuleRender::Loading { size: self.size, background: self.background }
    }

    fn glyph(&self, origin: Point, dot: f64) -> Glyph {
        match self.style {
            DotStyle::Square | DotStyle::Unknown(_) => Glyph::Rect,
            DotStyle::Rounded => Glyph::RoundedRect { radius: ROUNDED_RADIUS_RATIO * dot },
            DotStyle::Circle => Glyph::Circle {
                center: Point::new(origin.x + dot / 2.0, origin.y + dot / 2.0),
                radius: dot / 2.0,
            },
            DotStyle::Heart
            | DotStyle::Star
            | DotStyle::Diamond
            | DotStyle::Hexagon
            | DotStyle::Triangle => {
                let outline = unit_outline(self.style).unwrap_or_default();
                Glyph::Polygon(outline.iter().map(|p| p.scale_into(origin, dot)).collect())
            }
        }
    }
}

#[cfg(test)]
mod renderer_tests {
    use test_case::test_case;

    use super::{Glyph, ModuleRender, ModuleRenderer};
    use crate::codec::ModuleMatrix;
    use crate::common::{Point, Rgba};
    use crate::options::DotStyle;

    fn checker() -> ModuleMatrix {
        ModuleMatrix::from_rows(&["#.#", ".#.", "#.#"]).unwrap()
    }

    #[test]
    fn test_dot_size_and_origins() {
        let layer = ModuleRenderer::new(90.0).render(&checker());
        assert_eq!(layer.dot_size, 30.0);
        assert_eq!(layer.primitives.len(), 5);
        let origins = layer.primitives.iter().map(|p| p.origin).collect::<Vec<_>>();
        assert_eq!(
            origins,
            vec![
                Point::new(0.0, 0.0),
                Point::new(60.0, 0.0),
                Point::new(30.0, 30.0),
                Point::new(0.0, 60.0),
                Point::new(60.0, 60.0),
            ]
        );
    }

    #[test]
    fn test_quiet_zone_shrinks_and_insets() {
        let layer = ModuleRenderer::new(70.0).quiet_zone(2).render(&checker());
        assert_eq!(layer.size, 70.0);
        assert_eq!(layer.dot_size, 10.0);
        assert_eq!(layer.quiet_zone, 2);
        assert_eq!(layer.primitives[0].origin, Point::new(20.0, 20.0));
        assert_eq!(layer.primitives[4].origin, Point::new(40.0, 40.0));
    }

    #[test]
    fn test_rounded_radius() {
        let layer = ModuleRenderer::new(90.0).style(DotStyle::Rounded).render(&checker());
        assert_eq!(layer.primitives[0].glyph, Glyph::RoundedRect { radius: 4.5 });
    }

    #[test]
    fn test_circle_centered() {
        let layer = ModuleRenderer::new(90.0).style(DotStyle::Circle).render(&checker());
        assert_eq!(
            layer.primitives[2].glyph,
            Glyph::Circle { center: Point::new(45.0, 45.0), radius: 15.0 }
        );
    }

    #[test]
    fn test_hexagon_inset() {
        let layer = ModuleRenderer::new(30.0).style(DotStyle::Hexagon).render(&checker());
        let Glyph::Polygon(points) = &layer.primitives[0].glyph else {
            panic!("Hexagon should be a polygon");
        };
        assert_eq!(points[0], Point::new(3.0, 0.0));
        assert_eq!(points[1], Point::new(7.0, 0.0));
    }

    #[test_case(0)]
    #[test_case(9)]
    #[test_case(-1)]
    fn test_unknown_style_falls_back_to_square(id: i32) {
        let renderer = ModuleRenderer::new(90.0).style(DotStyle::from(id));
        let layer = renderer.render(&checker());
        assert_eq!(layer.style, DotStyle::Square);
        assert!(layer.primitives.iter().all(|p| p.glyph == Glyph::Rect));
    }

    #[test]
    fn test_placeholder_without_matrix() {
        let renderer = ModuleRenderer::new(64.0).background(Rgba::BLACK);
        assert_eq!(
            renderer.render_or_placeholder(None),
            ModuleRender::Loading { size: 64.0, background: Rgba::BLACK }
        );
        assert!(matches!(renderer.render_or_placeholder(Some(&checker())), ModuleRender::Drawn(_)));
    }
}

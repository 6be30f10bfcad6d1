use image::{Rgba as Pixel, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point as PxPoint;
use imageproc::rect::Rect;

use super::{Glyph, ModuleLayer, Primitive};
use crate::common::{f64_to_i32, f64_to_px, Point};

// Raster back-end
//------------------------------------------------------------------------------

impl ModuleLayer {
    /// Draws the layer on its background with a margin of `quiet_zone` modules.
    pub fn to_image(&self, quiet_zone: usize) -> RgbaImage {
        let qz_sz = quiet_zone as f64 * self.dot_size;
        let total_sz = f64_to_px(self.size + 2.0 * qz_sz).max(1);

        let mut canvas = RgbaImage::from_pixel(total_sz, total_sz, self.background.to_pixel());
        self.draw_onto(&mut canvas, Point::new(qz_sz, qz_sz));
        canvas
    }

    /// Draws only the dark modules, offset by `at`.
    pub fn draw_onto(&self, canvas: &mut RgbaImage, at: Point) {
        let color = self.foreground.to_pixel();
        for p in &self.primitives {
            draw_primitive(canvas, p, at, color);
        }
    }
}

fn draw_primitive(canvas: &mut RgbaImage, p: &Primitive, at: Point, color: Pixel<u8>) {
    let x = at.x + p.origin.x;
    let y = at.y + p.origin.y;
    match &p.glyph {
        Glyph::Rect => fill_rect(canvas, x, y, x + p.size, y + p.size, color),
        Glyph::RoundedRect { radius } => fill_rounded_rect(canvas, x, y, p.size, *radius, color),
        Glyph::Circle { center, radius } => {
            let r = f64_to_i32(*radius - 0.5).max(0);
            let c = (f64_to_i32(at.x + center.x - 0.5), f64_to_i32(at.y + center.y - 0.5));
            draw_filled_circle_mut(canvas, c, r, color);
        }
        Glyph::Polygon(points) => {
            let poly = pixel_polygon(points, at);
            if poly.len() < 3 {
                fill_rect(canvas, x, y, x + p.size, y + p.size, color);
            } else {
                draw_polygon_mut(canvas, &poly, color);
            }
        }
    }
}

// Edges snap to the pixel grid so adjacent modules tile without seams
pub(crate) fn fill_rect(canvas: &mut RgbaImage, x0: f64, y0: f64, x1: f64, y1: f64, color: Pixel<u8>) {
    let (l, t) = (f64_to_i32(x0), f64_to_i32(y0));
    let (r, b) = (f64_to_i32(x1), f64_to_i32(y1));
    if r <= l || b <= t {
        return;
    }
    let rect = Rect::at(l, t).of_size((r - l) as u32, (b - t) as u32);
    draw_filled_rect_mut(canvas, rect, color);
}

fn fill_rounded_rect(canvas: &mut RgbaImage, x: f64, y: f64, size: f64, radius: f64, color: Pixel<u8>) {
    let r = radius.min(size / 2.0);
    if r < 1.0 {
        return fill_rect(canvas, x, y, x + size, y + size, color);
    }
    fill_rect(canvas, x + r, y, x + size - r, y + size, color);
    fill_rect(canvas, x, y + r, x + size, y + size - r, color);

    let rad = f64_to_i32(r - 0.5).max(0);
    for (cx, cy) in [(x + r, y + r), (x + size - r, y + r), (x + r, y + size - r), (x + size - r, y + size - r)] {
        draw_filled_circle_mut(canvas, (f64_to_i32(cx - 0.5), f64_to_i32(cy - 0.5)), rad, color);
    }
}

// Rounding can merge vertices of small glyphs; repeated and closing points are dropped
fn pixel_polygon(points: &[Point], at: Point) -> Vec<PxPoint<i32>> {
    let mut poly: Vec<PxPoint<i32>> = Vec::with_capacity(points.len());
    for p in points {
        let px = PxPoint::new(f64_to_i32(at.x + p.x), f64_to_i32(at.y + p.y));
        if poly.last() != Some(&px) {
            poly.push(px);
        }
    }
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    poly
}

#[cfg(test)]
mod raster_tests {
    use image::Rgba;
    use test_case::test_case;

    use super::pixel_polygon;
    use crate::codec::ModuleMatrix;
    use crate::common::{Point, Rgba as Color};
    use crate::options::DotStyle;
    use crate::render::ModuleRenderer;

    fn single() -> ModuleMatrix {
        ModuleMatrix::from_rows(&["...", ".#.", "..."]).unwrap()
    }

    #[test]
    fn test_image_size_includes_quiet_zone() {
        let layer = ModuleRenderer::new(30.0).render(&single());
        let img = layer.to_image(4);
        assert_eq!(img.dimensions(), (110, 110));
    }

    #[test]
    fn test_square_module_pixels() {
        let layer = ModuleRenderer::new(30.0).background(Color::opaque(0x3b, 0x82, 0xf6)).render(&single());
        let img = layer.to_image(0);
        assert_eq!(*img.get_pixel(15, 15), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(10, 10), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(9, 9), Rgba([0x3b, 0x82, 0xf6, 255]));
        assert_eq!(*img.get_pixel(20, 20), Rgba([0x3b, 0x82, 0xf6, 255]));
    }

    #[test_case(DotStyle::Rounded)]
    #[test_case(DotStyle::Circle)]
    #[test_case(DotStyle::Heart)]
    #[test_case(DotStyle::Star)]
    #[test_case(DotStyle::Diamond)]
    #[test_case(DotStyle::Hexagon)]
    #[test_case(DotStyle::Triangle)]
    fn test_glyph_center_is_filled_and_corner_is_not(style: DotStyle) {
        let layer = ModuleRenderer::new(60.0).style(style).render(&single());
        let img = layer.to_image(0);
        assert_eq!(*img.get_pixel(30, 32), Rgba([0, 0, 0, 255]), "{style:?} center");
        assert_eq!(*img.get_pixel(20, 20), Rgba([255, 255, 255, 255]), "{style:?} corner");
    }

    #[test_case(DotStyle::Heart)]
    #[test_case(DotStyle::Star)]
    #[test_case(DotStyle::Triangle)]
    fn test_tiny_glyphs_do_not_panic(style: DotStyle) {
        let layer = ModuleRenderer::new(3.0).style(style).render(&single());
        let img = layer.to_image(1);
        assert_eq!(img.dimensions(), (5, 5));
    }

    #[test]
    fn test_pixel_polygon_dedup() {
        let points = [Point::new(0.1, 0.1), Point::new(0.2, 0.2), Point::new(3.0, 0.0), Point::new(0.0, 0.3)];
        let poly = pixel_polygon(&points, Point::default());
        assert_eq!(poly.len(), 2);
    }
}

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::common::Point;
use crate::options::DotStyle;

// Unit-square outlines for polygonal dot styles
//------------------------------------------------------------------------------

const HEART_SAMPLES: usize = 32;
const STAR_INNER_RATIO: f64 = 0.382;

static DIAMOND: [Point; 4] =
    [Point::new(0.5, 0.0), Point::new(1.0, 0.5), Point::new(0.5, 1.0), Point::new(0.0, 0.5)];

static HEXAGON: [Point; 6] = [
    Point::new(0.3, 0.0),
    Point::new(0.7, 0.0),
    Point::new(1.0, 0.5),
    Point::new(0.7, 1.0),
    Point::new(0.3, 1.0),
    Point::new(0.0, 0.5),
];

static TRIANGLE: [Point; 3] = [Point::new(0.5, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)];

static HEART: OnceLock<Vec<Point>> = OnceLock::new();
static STAR: OnceLock<Vec<Point>> = OnceLock::new();

/// Outline in `[0, 1] x [0, 1]`, or `None` for styles drawn as rects and circles.
pub fn unit_outline(style: DotStyle) -> Option<&'static [Point]> {
    match style {
        DotStyle::Square | DotStyle::Rounded | DotStyle::Circle | DotStyle::Unknown(_) => None,
        DotStyle::Heart => Some(HEART.get_or_init(heart)),
        DotStyle::Star => Some(STAR.get_or_init(star)),
        DotStyle::Diamond => Some(&DIAMOND),
        DotStyle::Hexagon => Some(&HEXAGON),
        DotStyle::Triangle => Some(&TRIANGLE),
    }
}

// x = 16 sin^3 t, y = 13 cos t - 5 cos 2t - 2 cos 3t - cos 4t, fitted to the unit box
fn heart() -> Vec<Point> {
    let raw = (0..HEART_SAMPLES)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / HEART_SAMPLES as f64;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            Point::new(x, -y)
        })
        .collect::<Vec<_>>();
    fit_unit(&raw)
}

// Ten vertices alternating outer and inner radius, first tip pointing up
fn star() -> Vec<Point> {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { 0.5 } else { 0.5 * STAR_INNER_RATIO };
            let a = -PI / 2.0 + i as f64 * PI / 5.0;
            Point::new(0.5 + r * a.cos(), 0.5 + r * a.sin())
        })
        .collect()
}

fn fit_unit(points: &[Point]) -> Vec<Point> {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let w = (max_x - min_x).max(f64::EPSILON);
    let h = (max_y - min_y).max(f64::EPSILON);
    points.iter().map(|p| Point::new((p.x - min_x) / w, (p.y - min_y) / h)).collect()
}

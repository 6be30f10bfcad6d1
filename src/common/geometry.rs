// Point
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Maps a point given in unit-square coordinates into the box at `origin` with side `size`.
    pub fn scale_into(self, origin: Point, size: f64) -> Self {
        Self { x: origin.x + self.x * size, y: origin.y + self.y * size }
    }
}

// Size
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f64) -> Self {
        Self { width: side, height: side }
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height).max(0.0)
    }
}

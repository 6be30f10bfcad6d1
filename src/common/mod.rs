pub mod cast;
pub mod color;
pub mod geometry;

pub use cast::*;
pub use color::*;
pub use geometry::*;

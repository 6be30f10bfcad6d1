//! # qrstudio
//!
//! A Rust library for designing styled QR codes. It turns a payload and a small,
//! versionable set of design options into a layered composite: frame artwork or a
//! card, the QR block with custom module glyphs, and an optional logo badge.
//!
//! ## Features
//!
//! - **Design options**: Closed id enums for frame, container shape, logo, error
//!   correction level, dot style and outer border. Unknown ids never fail; they
//!   resolve to documented defaults
//! - **Module rendering**: Eight dot styles (square, rounded, circle, heart, star,
//!   diamond, hexagon, triangle) as positioned primitives, with raster and SVG output
//! - **Compositing**: Frame placement from a shared table, card layout fallback,
//!   container clipping, outer borders and logo badges anchored with the QR block
//! - **Preview pipeline**: Async symbol encoding with memoization and stale result
//!   discarding, observable through a watch channel
//! - **Template storage**: Typed HTTP client for saved designs
//!
//! ## Quick Start
//!
//! ```rust
//! use qrstudio::{Compositor, DesignOptions, DotStyle, Frame, Logo, QrcodeCodec, Size};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = DesignOptions::default()
//!     .with_frame(Frame::Scooter)
//!     .with_logo(Logo::Location)
//!     .with_dot_style(DotStyle::Circle)
//!     .with_bg_color("#3b82f6");
//!
//! let matrix = QrcodeCodec.encode_sync("https://example.com", opts.resolve().ec_level)?;
//! let composite = Compositor::default().compose_modules(&opts, Some(&matrix), Size::square(400.0));
//!
//! let svg = composite.to_svg();
//! assert!(svg.starts_with("<svg"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Live preview
//!
//! ```rust,no_run
//! use qrstudio::pipeline::{PreviewPipeline, PreviewSize, RenderInput};
//! use qrstudio::{DesignOptions, QrcodeCodec, RenderConfig};
//!
//! # async fn run() {
//! let pipeline = PreviewPipeline::new(QrcodeCodec, RenderConfig::default());
//! let mut preview = pipeline.subscribe();
//!
//! let input = RenderInput::new("https://example.com", DesignOptions::default(), PreviewSize::new(640, 480));
//! pipeline.render(input).await;
//! let state = preview.borrow_and_update().clone();
//! assert!(state.is_ready());
//! # }
//! ```
//!
//! ## Option ids
//!
//! The integer ids are a wire contract shared with saved templates:
//!
//! - **Frame**: 1 none, 2 coffee, 3 scooter, 4 gift, 5 envelope, 6 clipboard, 7 phone,
//!   8 ticket, 9 shopping bag, 10 billboard
//! - **Shape**: 1 square, 2 rounded, 3 dots, 4 circle
//! - **Logo**: 0 none, 1 link, 2 location, 3 mail, 4 phone, 5 wifi, 6 scan
//! - **Level**: 1 L, 2 M, 3 Q, 4 H
//! - **Dot style**: 1 square, 2 rounded, 3 circle, 4 heart, 5 star, 6 diamond,
//!   7 hexagon, 8 triangle
//! - **Outer border**: 1 none, 2 thin, 3 thick, 4 dashed, 5 dotted, 6 double,
//!   7 shadow, 8 glow
//!
//! Shape clips the whole QR container while dot style draws each module; the two
//! are independent.

#![allow(clippy::items_after_test_module)]

pub mod codec;
pub(crate) mod common;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod options;
pub mod pipeline;
pub mod render;
pub mod tables;
pub mod template;

pub use codec::{ECLevel, ModuleMatrix, QrcodeCodec, SymbolCodec};
pub use common::{Point, Rgba, Size};
pub use compose::{AssetSource, Composite, Compositor, DirAssets, NoAssets};
pub use config::{Config, ConfigError, RenderConfig};
pub use error::{ExportError, QRError, QRResult};
pub use export::{export, ExportFormat};
pub use options::{DesignOptions, DotStyle, Frame, Level, Logo, OuterBorder, ResolvedOptions, Shape};
pub use render::{ModuleRender, ModuleRenderer};

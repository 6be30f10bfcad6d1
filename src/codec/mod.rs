//! Boundary to the symbol encoder.
//!
//! The encoder turns a payload and an error correction level into a square grid of
//! dark and light modules. Encoding itself is delegated; this module only defines
//! the contract and the matrix type the renderer consumes.

mod matrix;
mod qr_codec;

pub use matrix::ModuleMatrix;
pub use qr_codec::QrcodeCodec;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::QRResult;

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

// Symbol codec
//------------------------------------------------------------------------------

/// Produces the module matrix for a payload. Implementations must be pure in
/// `(payload, ec_level)` and may complete asynchronously.
#[async_trait]
pub trait SymbolCodec: Send + Sync {
    async fn encode(&self, payload: &str, ec_level: ECLevel) -> QRResult<ModuleMatrix>;
}

#[async_trait]
impl<C: SymbolCodec + ?Sized> SymbolCodec for Arc<C> {
    async fn encode(&self, payload: &str, ec_level: ECLevel) -> QRResult<ModuleMatrix> {
        (**self).encode(payload, ec_level).await
    }
}

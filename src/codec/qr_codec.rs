use async_trait::async_trait;
use log::debug;
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};

use super::{ECLevel, ModuleMatrix, SymbolCodec};
use crate::error::{QRError, QRResult};

// Codec backed by the `qrcode` crate
//------------------------------------------------------------------------------

/// Picks the smallest version that fits the payload at the requested level.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrcodeCodec;

impl QrcodeCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn encode_sync(&self, payload: &str, ec_level: ECLevel) -> QRResult<ModuleMatrix> {
        if payload.is_empty() {
            return Err(QRError::EmptyData);
        }

        debug!("Encoding {} bytes at level {ec_level:?}...", payload.len());
        let code = QrCode::with_error_correction_level(payload.as_bytes(), ec_level.into())
            .map_err(QRError::from)?;

        let w = code.width();
        let grid = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        debug!("Encoded {w}x{w} symbol");
        ModuleMatrix::new(w, grid)
    }
}

#[async_trait]
impl SymbolCodec for QrcodeCodec {
    async fn encode(&self, payload: &str, ec_level: ECLevel) -> QRResult<ModuleMatrix> {
        self.encode_sync(payload, ec_level)
    }
}

impl From<ECLevel> for EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => EcLevel::L,
            ECLevel::M => EcLevel::M,
            ECLevel::Q => EcLevel::Q,
            ECLevel::H => EcLevel::H,
        }
    }
}

impl From<QrError> for QRError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::DataTooLong => Self::DataTooLong,
            QrError::InvalidVersion => Self::InvalidVersion,
            QrError::InvalidCharacter => Self::InvalidChar,
            other => Self::Encoder(other.to_string()),
        }
    }
}

//! Writes composites to disk. The format follows the file extension.

use std::fs;
use std::path::Path;

use image::ImageFormat;

use crate::compose::{AssetSource, Composite};
use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// SVG output references frame and logo art by path; PNG output loads it through `assets`.
pub fn export(composite: &Composite, path: &Path, assets: &dyn AssetSource) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Svg => fs::write(path, composite.to_svg())?,
        ExportFormat::Png => composite.flatten(assets).save_with_format(path, ImageFormat::Png)?,
    }
    Ok(format)
}

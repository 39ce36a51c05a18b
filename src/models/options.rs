use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use dark_recolor::Scheme;
use serde::Deserialize;

use crate::error::ConvertError;

/// How a PDF is turned dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Render every page to an image, recolor pixels, rebuild the PDF
    #[default]
    Raster,
    /// Rewrite color operators inside the page content streams
    Direct,
}

impl ConversionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::Raster => "raster",
            ConversionMode::Direct => "direct",
        }
    }
}

impl FromStr for ConversionMode {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raster" => Ok(ConversionMode::Raster),
            "direct" => Ok(ConversionMode::Direct),
            _ => Err(ConvertError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a single conversion needs
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: ConversionMode,
    pub scheme: Scheme,
    /// Raster rendering resolution
    pub dpi: u32,
    /// Direct mode only: leave embedded images untouched
    pub preserve_images: bool,
    /// Worker threads for pixel work, 0 for one per core
    pub threads: usize,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, scheme: Scheme) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            mode: ConversionMode::default(),
            scheme,
            dpi: 150,
            preserve_images: true,
            threads: 0,
        }
    }

    pub fn with_mode(mut self, mode: ConversionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_preserve_images(mut self, preserve: bool) -> Self {
        self.preserve_images = preserve;
        self
    }
}

/// `report.pdf` -> `report_dark.pdf`, next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_dark.pdf"))
}

/// Outcome of a conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Pages written to the output
    pub pages: usize,
    /// Distinct color operators rewritten (direct mode)
    pub colors_changed: usize,
    /// Pages left as they were because processing failed
    pub pages_skipped: usize,
    /// Embedded images recolored (direct mode with images enabled)
    pub images_recolored: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pages", self.pages)?;
        if self.colors_changed > 0 {
            write!(f, ", {} colors changed", self.colors_changed)?;
        }
        if self.images_recolored > 0 {
            write!(f, ", {} images recolored", self.images_recolored)?;
        }
        if self.pages_skipped > 0 {
            write!(f, ", {} pages skipped", self.pages_skipped)?;
        }
        Ok(())
    }
}

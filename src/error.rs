use std::path::PathBuf;

use dark_recolor::{ImageError, SchemeError};
use thiserror::Error;

/// Top-level conversion failure.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid mode: {0} (must be 'raster' or 'direct')")]
    InvalidMode(String),

    #[error("Raster conversion failed: {0}")]
    Raster(#[from] RasterError),

    #[error("Direct conversion failed: {0}")]
    Direct(#[from] DirectError),
}

#[derive(Debug, Error)]
pub enum RasterError {
    #[error(
        "No PDF renderer available. Please install poppler-utils:\n  \
         macOS: brew install poppler\n  \
         Ubuntu: sudo apt install poppler-utils\n  \
         Windows: download from https://github.com/oschwartz10612/poppler-windows"
    )]
    RendererMissing,

    #[error("{tool} failed: {output}")]
    RendererFailed { tool: &'static str, output: String },

    #[error("No rendered images found")]
    NoPages,

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedPng(String),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("PDF assembly error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DirectError {
    #[error("Failed to parse PDF: {0}")]
    Load(String),

    #[error("Failed to write PDF: {0}")]
    Save(String),

    #[error("Unsupported stream filter: {0}")]
    UnsupportedFilter(String),

    #[error("Stream decode error: {0}")]
    Decode(String),

    #[error("Object {0} {1} is not a stream")]
    NotAStream(u32, u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid scheme '{name}' in config: {source}")]
    InvalidScheme { name: String, source: SchemeError },

    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

use std::path::Path;

use dark_recolor::Recolorer;

use super::{DirectEngine, RasterEngine};
use crate::error::ConvertError;
use crate::models::{ConversionMode, ConvertOptions, Report};

/// A dark-mode conversion strategy
pub trait Converter {
    fn convert(&self, input: &Path, output: &Path) -> Result<Report, ConvertError>;
}

/// Run the engine selected by `options.mode`.
pub fn convert(options: &ConvertOptions) -> Result<Report, ConvertError> {
    if !options.input.is_file() {
        return Err(ConvertError::InputNotFound(options.input.clone()));
    }

    let recolorer = Recolorer::new(options.scheme.clone()).threads(options.threads);
    let engine: Box<dyn Converter> = match options.mode {
        ConversionMode::Raster => Box::new(RasterEngine::new(recolorer, options.dpi)),
        ConversionMode::Direct => Box::new(DirectEngine::new(recolorer, options.preserve_images)),
    };

    tracing::info!(
        input = %options.input.display(),
        output = %options.output.display(),
        mode = %options.mode,
        scheme = options.scheme.name(),
        "Starting conversion"
    );
    engine.convert(&options.input, &options.output)
}

use std::path::Path;

use dark_recolor::{Recolorer, RgbaImage};

use super::converter::Converter;
use crate::error::{ConvertError, RasterError};
use crate::models::Report;
use crate::rendering::{write_image_pdf, PageRenderer};

/// Renders pages to images, recolors the pixels, and rebuilds the PDF.
///
/// The output has no text layer; every page becomes a single image.
#[derive(Debug, Clone)]
pub struct RasterEngine {
    recolorer: Recolorer,
    renderer: PageRenderer,
}

impl RasterEngine {
    pub fn new(recolorer: Recolorer, dpi: u32) -> Self {
        Self {
            recolorer,
            renderer: PageRenderer::new(dpi),
        }
    }

    /// Recolor already rendered pages and write them as a PDF.
    pub fn write_pages(&self, pages: &[RgbaImage], output: &Path) -> Result<Report, RasterError> {
        tracing::info!("Applying dark mode transform");
        let total = pages.len();
        let dark: Vec<RgbaImage> = pages
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let out = self.recolorer.transform_image(page);
                tracing::debug!(page = i + 1, total, "Transformed page");
                out
            })
            .collect();

        tracing::info!(path = %output.display(), "Creating output PDF");
        write_image_pdf(&dark, self.renderer.dpi(), output)?;

        Ok(Report {
            pages: dark.len(),
            ..Report::default()
        })
    }

    fn run(&self, input: &Path, output: &Path) -> Result<Report, RasterError> {
        let work_dir = tempfile::Builder::new()
            .prefix("pdfdarkmode-")
            .tempdir()?;

        tracing::info!(dpi = self.renderer.dpi(), "Rendering PDF pages to images");
        let pages = self.renderer.render_pages(input, work_dir.path())?;
        tracing::info!(pages = pages.len(), "Rendered pages");

        self.write_pages(&pages, output)
    }
}

impl Converter for RasterEngine {
    fn convert(&self, input: &Path, output: &Path) -> Result<Report, ConvertError> {
        Ok(self.run(input, output)?)
    }
}

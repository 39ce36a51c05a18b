use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use dark_recolor::RgbaImage;

use super::png_io::decode_png;
use crate::error::RasterError;

/// Poppler tools tried in order; both take `-png -r <dpi> <input> <prefix>`.
const RENDERERS: [&str; 2] = ["pdftoppm", "pdftocairo"];

const PAGE_PREFIX: &str = "page";

/// Renders PDF pages to PNG files with an external poppler tool
#[derive(Debug, Clone, Copy)]
pub struct PageRenderer {
    dpi: u32,
}

impl PageRenderer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Render every page of `pdf` and decode them in page order.
    ///
    /// Intermediate PNGs are written to `work_dir`, which the caller owns.
    pub fn render_pages(&self, pdf: &Path, work_dir: &Path) -> Result<Vec<RgbaImage>, RasterError> {
        self.render_to_dir(pdf, work_dir)?;
        let files = collect_page_files(work_dir)?;
        files
            .iter()
            .map(|path| {
                tracing::debug!(path = %path.display(), "Decoding rendered page");
                decode_png(&std::fs::read(path)?)
            })
            .collect()
    }

    /// Run the first available renderer, writing `page-N.png` files to `dir`.
    pub fn render_to_dir(&self, pdf: &Path, dir: &Path) -> Result<&'static str, RasterError> {
        let prefix = dir.join(PAGE_PREFIX);
        let dpi = self.dpi.to_string();
        let mut last_failure = None;

        for tool in RENDERERS {
            let output = match Command::new(tool)
                .args(["-png", "-r", &dpi])
                .arg(pdf)
                .arg(&prefix)
                .output()
            {
                Ok(output) => output,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(tool, "Renderer not found on PATH");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if output.status.success() {
                tracing::debug!(tool, dpi = self.dpi, "Rendered PDF pages");
                return Ok(tool);
            }

            let mut text = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if text.is_empty() {
                text = output.status.to_string();
            }
            tracing::warn!(tool, output = %text, "Renderer failed, trying next");
            last_failure = Some(RasterError::RendererFailed { tool, output: text });
        }

        Err(last_failure.unwrap_or(RasterError::RendererMissing))
    }
}

/// Rendered page files in `dir`, sorted by page number.
///
/// Prefers `page-*.png`; some renderer versions omit the dash.
pub fn collect_page_files(dir: &Path) -> Result<Vec<PathBuf>, RasterError> {
    let mut pngs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_page = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(PAGE_PREFIX) && n.ends_with(".png"));
        if is_page {
            pngs.push(path);
        }
    }

    let dashed: Vec<PathBuf> = pngs
        .iter()
        .filter(|p| file_name(p).starts_with("page-"))
        .cloned()
        .collect();
    let mut files = if dashed.is_empty() { pngs } else { dashed };

    if files.is_empty() {
        return Err(RasterError::NoPages);
    }
    files.sort_by_key(|p| page_number(file_name(p)));
    Ok(files)
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// `page-07.png` -> 7. Unparseable names sort first.
pub fn page_number(file_name: &str) -> u32 {
    let stem = file_name.strip_suffix(".png").unwrap_or(file_name);
    let digits = stem
        .strip_prefix("page-")
        .or_else(|| stem.strip_prefix(PAGE_PREFIX))
        .unwrap_or(stem);
    digits.parse().unwrap_or(0)
}

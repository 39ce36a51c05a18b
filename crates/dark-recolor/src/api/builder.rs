//! Recolorer builder -- the ergonomic entry point for the crate.
//!
//! [`Recolorer`] binds a [`Scheme`] and an optional worker bound so one value
//! can be handed to every page of a document.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use super::error::RecolorError;
use crate::content::{scan_and_rewrite, Rewrite};
use crate::pixel::{transform_image, transform_pixels, transform_rgb_pixels, RgbaImage};
use crate::scheme::Scheme;

/// Dark-mode recoloring for pixel buffers and content streams.
///
/// Configuration methods consume and return `self`; the transform methods
/// take `&self` so the recolorer is reusable across pages and threads.
///
/// # Example
///
/// ```
/// use dark_recolor::{Recolorer, RgbaImage};
///
/// let recolorer = Recolorer::from_preset("sepia").unwrap().threads(2);
///
/// let page = RgbaImage::new(2, 1, vec![255, 255, 255, 255, 0, 0, 0, 255]).unwrap();
/// let out = recolorer.transform_image(&page);
/// assert_eq!(out.pixel(0, 0), [0x1e, 0x19, 0x14, 255]);
/// assert_eq!(out.pixel(1, 0), [0xe6, 0xda, 0xc8, 255]);
/// ```
#[derive(Clone)]
pub struct Recolorer {
    scheme: Scheme,
    pool: Option<Arc<ThreadPool>>,
}

impl Recolorer {
    /// Create a recolorer for `scheme` using rayon's global pool.
    pub fn new(scheme: Scheme) -> Self {
        Self { scheme, pool: None }
    }

    /// Create a recolorer from a built-in scheme name.
    pub fn from_preset(name: &str) -> Result<Self, RecolorError> {
        Ok(Self::new(Scheme::preset(name)?))
    }

    /// Bound pixel work to `n` worker threads. `0` restores the global pool,
    /// which sizes itself to the available cores.
    ///
    /// If a dedicated pool cannot be started the global pool is used.
    #[inline]
    pub fn threads(mut self, n: usize) -> Self {
        self.pool = match n {
            0 => None,
            n => ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .ok()
                .map(Arc::new),
        };
        self
    }

    #[inline]
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Recolor an RGBA image into a new image of the same size.
    pub fn transform_image(&self, image: &RgbaImage) -> RgbaImage {
        self.run(|| transform_image(image, &self.scheme))
    }

    /// Recolor a packed RGBA buffer in place.
    pub fn transform_pixels(&self, data: &mut [u8]) {
        self.run(|| transform_pixels(data, &self.scheme))
    }

    /// Recolor a packed RGB buffer in place.
    pub fn transform_rgb_pixels(&self, data: &mut [u8]) {
        self.run(|| transform_rgb_pixels(data, &self.scheme))
    }

    /// Rewrite every color operator in one decompressed content stream.
    pub fn rewrite_content(&self, content: &str) -> Rewrite {
        scan_and_rewrite(content, &self.scheme)
    }

    fn run<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl std::fmt::Debug for Recolorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recolorer")
            .field("scheme", &self.scheme.name())
            .field(
                "threads",
                &self.pool.as_ref().map(|pool| pool.current_num_threads()),
            )
            .finish()
    }
}

//! pdfdarkmode - dark mode for PDF documents
//!
//! Two pipelines around the `dark-recolor` core: raster (render, recolor
//! pixels, rebuild) and direct (rewrite color operators in content streams).
//! This library exposes modules for integration testing.

pub mod error;
pub mod interactive;
pub mod models;
pub mod rendering;
pub mod services;

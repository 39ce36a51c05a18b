#![allow(clippy::module_inception)]

//! dark-recolor: dark-mode color remapping for document imagery
//!
//! This library decides whether a color belongs to the *document* (near-neutral
//! page background and text) or to *colorful content* (photographs, charts,
//! highlights), and computes a replacement under a two-color [`Scheme`].
//! The same engine drives two pipelines:
//!
//! - a pixel pipeline over 8-bit RGBA rasters ([`transform_image`]), and
//! - a content-stream pipeline that finds color-setting operators inside
//!   decompressed PDF content text and rewrites their operands
//!   ([`scan_and_rewrite`]).
//!
//! The crate performs no I/O. Callers hand in plain pixel buffers or content
//! text and receive transformed buffers back; PDF object structure stays with
//! the caller.
//!
//! # Quick Start
//!
//! ```
//! use dark_recolor::{Recolorer, RgbaImage, Scheme};
//!
//! let recolorer = Recolorer::new(Scheme::default());
//!
//! // A 1x1 white page becomes the scheme background.
//! let page = RgbaImage::new(1, 1, vec![255, 255, 255, 255]).unwrap();
//! let dark = recolorer.transform_image(&page);
//! assert_eq!(dark.data(), &[26, 26, 26, 255]);
//!
//! // White fill operators are rewritten the same way.
//! let rewritten = recolorer.rewrite_content("1 1 1 rg 0 0 612 792 re f");
//! assert_eq!(rewritten.content, "0.102 0.102 0.102 rg 0 0 612 792 re f");
//! assert_eq!(rewritten.changed, 1);
//! ```
//!
//! # Classification
//!
//! A color is a document color when its HSL saturation is below
//! [`DOCUMENT_SATURATION_THRESHOLD`]. Document colors are mapped by lightness
//! onto the scheme anchors:
//!
//! | lightness | result |
//! |---|---|
//! | `> 0.9` | scheme background |
//! | `0.7 ..= 0.9` | blend from text to background |
//! | `0.4 ..= 0.7` | plain gray inversion `1 - L` |
//! | `0.15 .. 0.4` | blend from text toward mid-gray |
//! | `< 0.15` | scheme text |
//!
//! Colorful content keeps its hue. Its lightness is lifted into a band that
//! reads well on a dark background and its saturation is boosted slightly.
//!
//! # Content Streams
//!
//! [`scan`] recognizes `rg`/`RG`, `g`/`G`, `k`/`K` and the `sc`/`scn` family
//! (with one, three or four operands) by pattern matching over untokenized
//! text. Operands that belong to a wider match are never reused as the start
//! of a one-operand match. [`rewrite`] formats mapped values with three
//! decimals; under a tinted scheme gray and CMYK operators are promoted to
//! `rg`/`RG` so the tint survives.

pub mod api;
pub mod classify;
pub mod color;
pub mod content;
pub mod pixel;
pub mod scheme;


pub use api::{RecolorError, Recolorer};
pub use classify::{classify, ColorClass, DOCUMENT_SATURATION_THRESHOLD};
pub use color::{cmyk_to_rgb, hsl_to_rgb, lightness, rgb_to_cmyk, rgb_to_hsl, saturation, Color};
pub use content::{
    rewrite, scan, scan_and_rewrite, ColorOperator, ColorSpaceKind, OperatorExtractor, Rewrite,
};
pub use pixel::{transform_image, transform_pixels, transform_rgb_pixels, ImageError, RgbaImage};
pub use scheme::{
    map_color, map_colorful_content, map_document_color, ParseColorError, Scheme, SchemeError,
};

//! Per-pixel recoloring
//!
//! Every pixel is classified and mapped on its own; there is no neighborhood
//! dependency, so the buffer is split into independent chunks and processed
//! with rayon. The result does not depend on how the work is scheduled.

use rayon::prelude::*;

use super::image::RgbaImage;
use crate::color::Color;
use crate::scheme::{map_color, Scheme};

/// Pixels handed to one rayon task by the slice-based entry points.
const PIXELS_PER_TASK: usize = 4096;

/// Map one RGB triple through the scheme.
#[inline]
pub fn transform_rgb(rgb: [u8; 3], scheme: &Scheme) -> [u8; 3] {
    let c = Color::from_bytes(rgb);
    map_color(c.r, c.g, c.b, scheme).to_bytes()
}

#[inline]
fn recolor_in_place(px: &mut [u8], scheme: &Scheme) {
    let [r, g, b] = transform_rgb([px[0], px[1], px[2]], scheme);
    px[0] = r;
    px[1] = g;
    px[2] = b;
}

/// Recolor an image, returning a new image of the same size.
///
/// Alpha is carried through unchanged. Rows are processed in parallel.
///
/// # Example
/// ```
/// use dark_recolor::{transform_image, RgbaImage, Scheme};
///
/// let white = RgbaImage::new(1, 1, vec![255, 255, 255, 128]).unwrap();
/// let out = transform_image(&white, &Scheme::default());
/// assert_eq!(out.pixel(0, 0), [26, 26, 26, 128]);
/// ```
pub fn transform_image(image: &RgbaImage, scheme: &Scheme) -> RgbaImage {
    let mut out = image.clone();
    let row_len = (image.width() * 4).max(4);
    out.data_mut().par_chunks_mut(row_len).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            recolor_in_place(px, scheme);
        }
    });
    out
}

/// Recolor a packed RGBA buffer in place.
///
/// Trailing bytes that do not form a whole pixel are left untouched.
pub fn transform_pixels(data: &mut [u8], scheme: &Scheme) {
    transform_packed(data, 4, scheme);
}

/// Recolor a packed RGB buffer (no alpha) in place.
pub fn transform_rgb_pixels(data: &mut [u8], scheme: &Scheme) {
    transform_packed(data, 3, scheme);
}

fn transform_packed(data: &mut [u8], channels: usize, scheme: &Scheme) {
    data.par_chunks_mut(PIXELS_PER_TASK * channels)
        .for_each(|chunk| {
            for px in chunk.chunks_exact_mut(channels) {
                recolor_in_place(px, scheme);
            }
        });
}

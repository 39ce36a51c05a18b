//! Raster pixel pipeline

mod image;
mod transform;

pub use image::{ImageError, RgbaImage};
pub use transform::{transform_image, transform_pixels, transform_rgb, transform_rgb_pixels};

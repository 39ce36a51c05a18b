//! Owned RGBA8 pixel buffer

use std::fmt;

/// Error type for pixel buffer construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Buffer length does not match `width * height * 4`
    BufferSize {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::BufferSize { expected, actual } => write!(
                f,
                "RGBA buffer has {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for ImageError {}

/// A row-major grid of 8-bit RGBA pixels.
///
/// # Example
///
/// ```
/// use dark_recolor::RgbaImage;
///
/// let image = RgbaImage::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
/// assert_eq!(image.width(), 2);
/// assert_eq!(image.pixel(1, 0), [255, 255, 255, 255]);
///
/// assert!(RgbaImage::new(2, 2, vec![0; 4]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Wrap an RGBA buffer, checking its length against the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = buffer_len(width, height, 4, data.len())?;
        if data.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an RGBA image from packed RGB bytes with full opacity.
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> Result<Self, ImageError> {
        let expected = buffer_len(width, height, 3, rgb.len())?;
        if rgb.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: rgb.len(),
            });
        }
        let mut data = Vec::with_capacity(expected / 3 * 4);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image, returning its RGBA bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y * self.width + x) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Packed RGB bytes with alpha dropped.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.width * self.height * 3);
        for px in self.data.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        rgb
    }
}

/// Byte length of a `width` x `height` buffer, or a size error on overflow.
fn buffer_len(
    width: usize,
    height: usize,
    channels: usize,
    actual: usize,
) -> Result<usize, ImageError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(ImageError::BufferSize {
            expected: usize::MAX,
            actual,
        })
}

use std::io::Cursor;

use dark_recolor::RgbaImage;

use crate::error::RasterError;

/// Decode a PNG into an 8-bit RGBA image.
///
/// Palette, low bit depth and 16-bit inputs are normalized by the decoder;
/// gray, gray+alpha and RGB layouts are widened here.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, RasterError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RasterError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RasterError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(RasterError::UnsupportedPng(format!(
            "bit depth {:?}",
            info.bit_depth
        )));
    }

    let width = info.width as usize;
    let height = info.height as usize;
    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => return Ok(RgbaImage::from_rgb(width, height, &buf)?),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(RasterError::UnsupportedPng("unexpanded palette".to_string()))
        }
    };
    Ok(RgbaImage::new(width, height, rgba)?)
}

/// Encode an RGBA image as PNG and re-compress it with oxipng.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RasterError> {
    let width = u32::try_from(image.width())
        .map_err(|_| RasterError::PngEncode("width out of range".to_string()))?;
    let height = u32::try_from(image.height())
        .map_err(|_| RasterError::PngEncode("height out of range".to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        // Fast settings: oxipng re-compresses below
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RasterError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.data())
            .map_err(|e| RasterError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

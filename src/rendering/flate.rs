use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Zlib-compress bytes for a `/FlateDecode` stream.
pub fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Inflate a `/FlateDecode` stream body.
pub fn inflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflate_reverses_deflate() {
        let text = b"q 1 1 1 rg 0 0 612 792 re f Q".repeat(20);
        let packed = deflate(&text).unwrap();
        assert!(packed.len() < text.len());
        assert_eq!(inflate(&packed).unwrap(), text);
    }

    #[test]
    fn test_inflate_rejects_garbage() {
        assert!(inflate(b"definitely not zlib").is_err());
    }
}

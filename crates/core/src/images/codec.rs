//! JPEG encoding and decoding for images crossing the storage boundary.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

use super::error::StorageError;

/// Encoder quality. Fixed; not configurable.
pub const JPEG_QUALITY: u8 = 75;

/// Largest width or height a baseline JPEG can describe.
const MAX_JPEG_DIMENSION: u32 = 65_535;

/// Encode an image as JPEG. Any alpha channel is dropped.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] for images with no pixels, images larger
/// than JPEG allows, or encoder failures.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, StorageError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(StorageError::encode(format!(
            "image has no pixels ({width}x{height})"
        )));
    }
    if width > MAX_JPEG_DIMENSION || height > MAX_JPEG_DIMENSION {
        return Err(StorageError::encode(format!(
            "image is too large for JPEG ({width}x{height})"
        )));
    }

    let rgb = image.to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| StorageError::encode(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Decode JPEG bytes read back from storage.
///
/// # Errors
///
/// Returns [`StorageError::Decode`] if the bytes are not a JPEG stream.
pub fn decode_jpeg(bytes: &[u8]) -> Result<DynamicImage, StorageError> {
    image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
        .map_err(|e| StorageError::decode(e.to_string()))
}

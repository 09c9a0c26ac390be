//! Still-frame encoding: RGBA raster → JPEG → inline data URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageBuffer, RgbaImage};
use thiserror::Error;

use screenpin_capture::Frame;

/// Fixed lossy quality, 0.9 on the 0–1 scale.
pub const JPEG_QUALITY: u8 = 90;

/// Prefix of every inline-encoded frame this module produces.
pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("frame buffer is {actual} bytes, expected {expected} for {width}x{height}")]
    BadFrameSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("jpeg encode failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Encode one captured frame as a self-describing inline image string.
///
/// The raster is rendered at the frame's native dimensions; alpha is
/// dropped since JPEG has no alpha channel.
pub fn frame_to_data_uri(frame: Frame) -> Result<String, EncodeError> {
    let expected = Frame::expected_len(frame.width, frame.height);
    if frame.data.len() != expected {
        return Err(EncodeError::BadFrameSize {
            width: frame.width,
            height: frame.height,
            expected,
            actual: frame.data.len(),
        });
    }

    let raster: RgbaImage = ImageBuffer::from_raw(frame.width, frame.height, frame.data)
        .unwrap_or_else(|| unreachable!("buffer length checked above"));
    let rgb = image::DynamicImage::ImageRgba8(raster).to_rgb8();

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder.encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;

    let mut out = String::with_capacity(DATA_URI_PREFIX.len() + jpeg.len().div_ceil(3) * 4);
    out.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(&jpeg, &mut out);
    Ok(out)
}

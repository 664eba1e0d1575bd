//! Image processor - decoding and format detection

use crate::error::ProcessingError;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;

/// Format assumed when the bytes do not identify one.
pub const FALLBACK_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// A decoded source image. Read-only once produced; variants are derived from
/// it without mutating its pixels.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Decode image bytes, detecting the format from the content.
///
/// When detection yields nothing the bytes are decoded as JPEG and the image
/// is treated as JPEG from then on.
pub fn decode_image(data: &[u8]) -> Result<DecodedImage, ProcessingError> {
    let mut reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(ProcessingError::Read)?;

    let format = match reader.format() {
        Some(format) => format,
        None => {
            tracing::debug!("Image format not detected, falling back to JPEG");
            reader.set_format(FALLBACK_FORMAT);
            FALLBACK_FORMAT
        }
    };

    let image = reader.decode().map_err(ProcessingError::Decode)?;

    Ok(DecodedImage { image, format })
}

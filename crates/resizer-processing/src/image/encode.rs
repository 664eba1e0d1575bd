use crate::error::ProcessingError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use resizer_core::constants::JPEG_QUALITY;
use std::io::Cursor;

/// Encode an image in the given format into a fresh buffer.
///
/// JPEG has no alpha channel, so images carrying one are flattened to RGB
/// before encoding.
pub fn encode_image(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ProcessingError> {
    let estimated_size = (img.width() as usize * img.height() as usize) / 4;
    let mut buffer = Vec::with_capacity(estimated_size);

    let result = match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            if img.color().has_alpha() {
                DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)
            } else {
                img.write_with_encoder(encoder)
            }
        }
        other => img.write_to(&mut Cursor::new(&mut buffer), other),
    };

    result.map_err(|source| ProcessingError::Encode { format, source })?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::decode_image;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn encodes_png_losslessly() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 10, Rgba([1, 2, 3, 128])));

        let data = encode_image(&img, ImageFormat::Png).unwrap();
        let decoded = decode_image(&data).unwrap();

        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!(decoded.image.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn encodes_jpeg() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([200, 100, 50])));

        let data = encode_image(&img, ImageFormat::Jpeg).unwrap();
        let decoded = decode_image(&data).unwrap();

        assert_eq!(decoded.format, ImageFormat::Jpeg);
        assert_eq!(decoded.dimensions(), (40, 30));
    }

    #[test]
    fn jpeg_drops_alpha_instead_of_failing() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0])));

        let data = encode_image(&img, ImageFormat::Jpeg).unwrap();
        let decoded = decode_image(&data).unwrap();
        assert_eq!(decoded.image.dimensions(), (8, 8));
    }

    #[test]
    fn each_call_produces_an_independent_buffer() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([9, 9, 9])));

        let first = encode_image(&img, ImageFormat::Png).unwrap();
        let second = encode_image(&img, ImageFormat::Png).unwrap();

        assert_eq!(first, second);
        assert_ne!(first.as_ptr(), second.as_ptr());
    }
}

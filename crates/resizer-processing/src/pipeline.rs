//! Decode once, then render every variant from independent copies.

use bytes::Bytes;
use image::ImageFormat;

use crate::error::ProcessingError;
use crate::image::{decode_image, encode_image, resize_to_width};
use crate::variants::Variant;

/// One encoded output ready for upload.
#[derive(Debug, Clone)]
pub struct RenderedVariant {
    pub variant: Variant,
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub source_width: u32,
    pub source_height: u32,
    /// Detected source format (or the fallback); every variant uses it.
    pub format: ImageFormat,
    pub variants: Vec<RenderedVariant>,
}

/// Decode `data` and produce each of `variants`, encoded in the source format.
///
/// CPU-bound; async callers should run it on a blocking thread.
pub fn render_variants(
    data: &[u8],
    variants: &[Variant],
) -> Result<RenderedImage, ProcessingError> {
    let decoded = decode_image(data)?;
    let (source_width, source_height) = decoded.dimensions();

    let rendered = variants
        .iter()
        .map(|variant| {
            let resized = resize_to_width(&decoded.image, variant.width)?;
            let encoded = encode_image(&resized, decoded.format)?;
            Ok(RenderedVariant {
                variant: *variant,
                width: resized.width(),
                height: resized.height(),
                data: Bytes::from(encoded),
            })
        })
        .collect::<Result<Vec<_>, ProcessingError>>()?;

    Ok(RenderedImage {
        source_width,
        source_height,
        format: decoded.format,
        variants: rendered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encoded(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    #[test]
    fn renders_both_variants_from_jpeg() {
        let data = encoded(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(1600, 1200, Rgb([120, 80, 40]))),
            ImageFormat::Jpeg,
        );

        let rendered = render_variants(&data, &Variant::ALL).unwrap();

        assert_eq!(rendered.format, ImageFormat::Jpeg);
        assert_eq!((rendered.source_width, rendered.source_height), (1600, 1200));
        assert_eq!(rendered.variants.len(), 2);

        let resized = &rendered.variants[0];
        assert_eq!(resized.variant, Variant::RESIZED);
        assert_eq!((resized.width, resized.height), (800, 600));

        let thumbnail = &rendered.variants[1];
        assert_eq!(thumbnail.variant, Variant::THUMBNAIL);
        assert_eq!((thumbnail.width, thumbnail.height), (200, 150));

        for variant in &rendered.variants {
            let decoded = image::load_from_memory(&variant.data).unwrap();
            assert_eq!(decoded.dimensions(), (variant.width, variant.height));
            assert_eq!(
                image::guess_format(&variant.data).unwrap(),
                ImageFormat::Jpeg
            );
        }
    }

    #[test]
    fn png_stays_png_and_keeps_alpha() {
        let data = encoded(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(400, 100, Rgba([0, 255, 0, 64]))),
            ImageFormat::Png,
        );

        let rendered = render_variants(&data, &Variant::ALL).unwrap();
        assert_eq!(rendered.format, ImageFormat::Png);

        let thumbnail = &rendered.variants[1];
        assert_eq!((thumbnail.width, thumbnail.height), (200, 50));
        let decoded = image::load_from_memory_with_format(&thumbnail.data, ImageFormat::Png)
            .unwrap();
        assert!(decoded.color().has_alpha());
    }

    #[test]
    fn variant_order_does_not_change_output() {
        let data = encoded(
            DynamicImage::ImageRgb8(RgbImage::from_fn(300, 200, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, 7])
            })),
            ImageFormat::Png,
        );

        let forward = render_variants(&data, &[Variant::RESIZED, Variant::THUMBNAIL]).unwrap();
        let reverse = render_variants(&data, &[Variant::THUMBNAIL, Variant::RESIZED]).unwrap();

        assert_eq!(forward.variants[0].data, reverse.variants[1].data);
        assert_eq!(forward.variants[1].data, reverse.variants[0].data);
    }

    #[test]
    fn extreme_aspect_ratio_fails_instead_of_allocating() {
        let data = encoded(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 20_000, Rgb([9, 9, 9]))),
            ImageFormat::Png,
        );

        let result = render_variants(&data, &Variant::ALL);
        assert!(matches!(
            result,
            Err(ProcessingError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn corrupt_bytes_fail_before_any_variant() {
        let result = render_variants(b"\x89PNG\r\n\x1a\nbroken", &Variant::ALL);
        assert!(matches!(result, Err(ProcessingError::Decode(_))));
    }
}

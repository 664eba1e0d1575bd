use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use resizer_core::constants::MAX_OUTPUT_PIXELS;

use crate::error::ProcessingError;

/// Dimensions for an image of `width`×`height` scaled to `target_width`,
/// keeping the aspect ratio. The height is rounded and never drops below 1.
pub fn target_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    if width == 0 {
        return (target_width, height.max(1));
    }

    let scaled = (height as f64 * (target_width as f64 / width as f64)).round();
    (target_width, (scaled as u32).max(1))
}

/// Resize to a fixed width with Lanczos3 resampling.
///
/// Returns a new image; the input is left untouched. Fails without allocating
/// when the output would exceed [`MAX_OUTPUT_PIXELS`].
pub fn resize_to_width(
    img: &DynamicImage,
    target_width: u32,
) -> Result<DynamicImage, ProcessingError> {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, target_width);

    if new_width as u64 * new_height as u64 > MAX_OUTPUT_PIXELS {
        return Err(ProcessingError::DimensionsTooLarge {
            width: new_width,
            height: new_height,
            max_pixels: MAX_OUTPUT_PIXELS,
        });
    }

    tracing::debug!(
        from_width = width,
        from_height = height,
        to_width = new_width,
        to_height = new_height,
        "Resizing image"
    );

    Ok(img.resize_exact(new_width, new_height, FilterType::Lanczos3))
}

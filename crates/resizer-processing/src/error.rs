use ::image::{ImageError, ImageFormat};

/// Failures while turning source bytes into encoded variants.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to read image data: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error("Output of {width}x{height} exceeds the {max_pixels} pixel limit")]
    DimensionsTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    #[error("Failed to encode {format:?} image: {source}")]
    Encode {
        format: ImageFormat,
        #[source]
        source: ImageError,
    },
}

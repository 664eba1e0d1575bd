//! Image processing module
//!
//! - Decoding with format detection (processor)
//! - Aspect-preserving resize (resize)
//! - Encoding back into the source format (encode)

pub mod encode;
pub mod processor;
pub mod resize;

pub use encode::encode_image;
pub use processor::{decode_image, DecodedImage};
pub use resize::{resize_to_width, target_dimensions};

//! Resizer Processing Library
//!
//! Eligibility and size validation plus the decode → resize → encode steps
//! that turn one source image into its output variants.

pub mod error;
pub mod image;
pub mod pipeline;
pub mod validator;
pub mod variants;

pub use error::ProcessingError;
pub use crate::image::{decode_image, encode_image, resize_to_width, target_dimensions, DecodedImage};
pub use pipeline::{render_variants, RenderedImage, RenderedVariant};
pub use validator::{MediaValidator, ValidationError};
pub use variants::Variant;

//! Output variants written for every processed image.

use resizer_core::constants::{RESIZED_PREFIX, RESIZED_WIDTH, THUMBNAIL_PREFIX, THUMBNAIL_WIDTH};
use resizer_core::keys::variant_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub name: &'static str,
    /// Key prefix under the destination bucket, including the trailing slash.
    pub prefix: &'static str,
    pub width: u32,
}

impl Variant {
    pub const RESIZED: Variant = Variant {
        name: "resized",
        prefix: RESIZED_PREFIX,
        width: RESIZED_WIDTH,
    };

    pub const THUMBNAIL: Variant = Variant {
        name: "thumbnail",
        prefix: THUMBNAIL_PREFIX,
        width: THUMBNAIL_WIDTH,
    };

    /// Every variant, in upload order.
    pub const ALL: [Variant; 2] = [Variant::RESIZED, Variant::THUMBNAIL];

    /// Destination key for a decoded source key.
    pub fn output_key(&self, source_key: &str) -> String {
        variant_key(self.prefix, source_key)
    }
}

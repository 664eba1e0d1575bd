//! Fixed processing policy.

/// Environment variable holding the destination bucket name.
pub const OUTPUT_BUCKET_ENV: &str = "OUTPUT_BUCKET";

/// Largest source object accepted for processing (5 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Lowercased key suffixes eligible for processing.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Content type used when the source object does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Quality used when encoding JPEG output.
pub const JPEG_QUALITY: u8 = 75;

pub const RESIZED_PREFIX: &str = "resized/";
pub const RESIZED_WIDTH: u32 = 800;

pub const THUMBNAIL_PREFIX: &str = "thumbnail/";
pub const THUMBNAIL_WIDTH: u32 = 200;

/// Largest output a variant may have, in pixels.
pub const MAX_OUTPUT_PIXELS: u64 = 25_000_000;

pub const DEFAULT_REGION: &str = "us-east-1";

use resizer_core::constants::{ALLOWED_EXTENSIONS, MAX_FILE_SIZE_BYTES};

/// Validation failures for a source object
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File size exceeds limit: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },
}

/// Source object validator
///
/// Holds the extension allow-list used to decide whether an object is
/// processed at all, and the size bound checked before any decoding.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl Default for MediaValidator {
    fn default() -> Self {
        Self::new(
            MAX_FILE_SIZE_BYTES,
            ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        )
    }
}

impl MediaValidator {
    /// `allowed_extensions` are key suffixes including the dot, e.g. `.png`.
    pub fn new(max_file_size: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    /// Default allow-list with a custom size bound.
    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self {
            max_file_size,
            ..Self::default()
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Whether the (decoded) key ends with an allowed extension, ignoring case.
    pub fn is_eligible(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|extension| key.ends_with(extension.as_str()))
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }
}

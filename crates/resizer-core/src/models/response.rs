//! Result returned to the invoking platform.

use serde::{Deserialize, Serialize};

pub const PROCESSED_MESSAGE: &str = "Image processed successfully";
pub const SKIPPED_MESSAGE: &str = "Skipped non-image file";
/// [`PROCESSED_MESSAGE`] encoded as a JSON string.
pub const PROCESSED_BODY: &str = "\"Image processed successfully\"";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    /// Both variants were written. The body is a JSON-encoded string.
    pub fn processed() -> Self {
        Self {
            status_code: 200,
            body: PROCESSED_BODY.to_string(),
        }
    }

    /// The object was not an eligible image; nothing was read or written.
    pub fn skipped() -> Self {
        Self {
            status_code: 200,
            body: SKIPPED_MESSAGE.to_string(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.body == SKIPPED_MESSAGE
    }
}

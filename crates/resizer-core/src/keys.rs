//! Object key handling.
//!
//! Keys arrive in notifications form-encoded (`+` for space, `%XX` escapes).
//! They are decoded once when a record is read; fetches and output paths only
//! ever see the decoded form.

use percent_encoding::percent_decode_str;

/// Decode a form-encoded object key.
///
/// `+` becomes a space before percent sequences are resolved, so an encoded
/// plus (`%2B`) survives as a literal `+`. Invalid UTF-8 is replaced rather
/// than rejected.
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Destination key for a variant: the prefix joined with the decoded source key.
pub fn variant_key(prefix: &str, key: &str) -> String {
    format!("{}{}", prefix, key)
}

/// Lowercased extension of the key including the leading dot, if any.
pub fn key_extension(key: &str) -> Option<String> {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_lowercase())
}

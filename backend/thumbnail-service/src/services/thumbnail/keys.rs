//! Destination key derivation for generated thumbnails

/// Suffix marking an object as a generated thumbnail
pub const THUMBNAIL_SUFFIX: &str = "_thumbnail.png";

/// Whether `key` names a generated thumbnail
pub fn is_thumbnail_key(key: &str) -> bool {
    key.ends_with(THUMBNAIL_SUFFIX)
}

/// Derive the thumbnail key for a source object key
///
/// Only the last `.`-delimited segment is stripped, so `a.b.jpg` becomes
/// `a.b_thumbnail.png`. Keys without a `.` are used whole.
pub fn derive_thumbnail_key(key: &str) -> String {
    let base = match key.rsplit_once('.') {
        Some((base, _extension)) => base,
        None => key,
    };
    format!("{base}{THUMBNAIL_SUFFIX}")
}

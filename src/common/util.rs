// ===============================================================================================
// Environment
// ===============================================================================================
pub(crate) fn read_env(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

// ===============================================================================================
// URLs
// ===============================================================================================
/// Splits a path into its `/`-separated segments. A single leading slash is ignored, so
/// `"/"` yields one empty segment.
pub(crate) fn path_segments(path: &str) -> Vec<&str> {
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

/// Percent-decodes a single path segment. Segments that do not decode to valid UTF-8 are
/// returned as-is.
pub(crate) fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

/// Percent-decodes every segment of `path`, keeping the `/` separators in place.
pub(crate) fn decode_path(path: &str) -> String {
    path.split('/')
        .map(decode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the media type of a content type header value in lowercase, without parameters.
pub(crate) fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

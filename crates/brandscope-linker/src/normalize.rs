//! URL normalization for cross-source entity matching.
//!
//! External analytics providers report the same property as
//! `HTTPS://Example.com/`, `http://example.com` or `example.com/` depending
//! on how the operator registered it. Comparison happens on a normalized
//! form: scheme stripped, host lower-cased, trailing slashes removed. Path
//! and query case is preserved (paths are case-sensitive on most origins).

/// Normalize a URL for comparison.
///
/// Strips a leading `http://`/`https://` (case-insensitively), lower-cases
/// the host, keeps the path/query as-is, and trims trailing slashes.
/// Returns an empty string for input with no host.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let stripped = strip_scheme(raw.trim());
    let (host, path) = split_authority(stripped);
    if host.is_empty() {
        return String::new();
    }

    let mut normalized = host.to_lowercase();
    normalized.push_str(path);
    normalized.trim_end_matches('/').to_string()
}

/// Split a normalized URL into `(host, path_and_query)`.
///
/// The host is lower-cased; the path keeps its case and loses trailing
/// slashes. An input with no path component yields an empty path.
#[must_use]
pub fn split_host_path(raw: &str) -> (String, String) {
    let stripped = strip_scheme(raw.trim());
    let (host, path) = split_authority(stripped);
    (
        host.to_lowercase(),
        path.trim_end_matches('/').to_string(),
    )
}

/// Strip one leading `www.` label from a host, if present.
#[must_use]
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn strip_scheme(raw: &str) -> &str {
    for scheme in ["https://", "http://"] {
        if raw.len() >= scheme.len()
            && raw.as_bytes()[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
        {
            // The matched prefix is pure ASCII, so the slice is on a char boundary.
            return &raw[scheme.len()..];
        }
    }
    raw
}

fn split_authority(stripped: &str) -> (&str, &str) {
    match stripped.find(['/', '?', '#']) {
        Some(idx) => (&stripped[..idx], &stripped[idx..]),
        None => (stripped, ""),
    }
}

//! Label values derived from client-supplied strings.
//!
//! Events arrive unauthenticated, so every value that becomes a label is
//! reduced to a small, bounded vocabulary before it reaches the store.

/// Longest label value kept, in characters.
pub const MAX_LABEL_CHARS: usize = 64;

const HTTP_METHODS: [&str; 9] = [
    "GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "CONNECT", "TRACE",
];

/// Standard HTTP method in upper case, or `OTHER`.
pub fn method_label(method: &str) -> &'static str {
    HTTP_METHODS
        .iter()
        .find(|m| m.eq_ignore_ascii_case(method))
        .copied()
        .unwrap_or("OTHER")
}

/// Host plus first path segment for absolute URLs, first segment for paths.
///
/// `https://proj.supabase.co/rest/v1/x?q=1` becomes `proj.supabase.co/rest`,
/// `/assets/app.js` becomes `/assets`.
pub fn route_label(url: &str) -> String {
    let url = url.split(['?', '#']).next().unwrap_or_default();
    let (host, path) = match url.split_once("://") {
        Some((_, rest)) => match rest.split_once('/') {
            Some((host, path)) => (host, path),
            None => (rest, ""),
        },
        None => ("", url.trim_start_matches('/')),
    };
    let segment = path.split('/').next().unwrap_or_default();
    truncate(&format!("{host}/{segment}"))
}

/// Trimmed and cut to [`MAX_LABEL_CHARS`].
pub fn bounded(value: &str) -> String {
    truncate(value.trim())
}

fn truncate(value: &str) -> String {
    value.chars().take(MAX_LABEL_CHARS).collect()
}


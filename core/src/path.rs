//! URL composition for provider resource paths.
//!
//! A resource path such as `/form/123/questions` becomes
//! `https://api.jotform.com/v1/form/123/questions.json`: the version segment is
//! appended to the origin, the path gets a `.json` suffix, and the two are
//! joined with exactly one slash.
//!
//! The suffix is appended, never substituted, so a final segment that already
//! contains a dot keeps it (`/folder/a.b` → `/folder/a.b.json`). A path that
//! already ends in `.json` is left alone.

const SUFFIX: &str = ".json";

/// Join `base_url` and `version` into the versioned API root, without a
/// trailing slash.
pub fn versioned_base(base_url: &str, version: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let version = version.trim_matches('/');
    if version.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{version}")
    }
}

/// Add `.json` to the last segment of `path` unless it is already there.
pub fn with_json_suffix(path: &str) -> String {
    let path = path.trim_end_matches('/');
    if path.ends_with(SUFFIX) {
        path.to_string()
    } else {
        format!("{path}{SUFFIX}")
    }
}

/// Resolve `path` (suffixed) against the versioned root.
pub fn resolve(versioned: &str, path: &str) -> String {
    let endpoint = with_json_suffix(path);
    format!(
        "{}/{}",
        versioned.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

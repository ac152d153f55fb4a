// src/utils/url.rs

//! URL helpers for source labels.

use std::path::Path;

use url::Url;

/// Render a local path as a `file://` URI.
///
/// Relative paths are resolved against the current directory. Falls back to
/// a plain `file://` prefix when the path cannot be expressed as a URL.
pub fn file_uri(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    Url::from_file_path(&absolute)
        .map(String::from)
        .unwrap_or_else(|_| format!("file://{}", absolute.display()))
}

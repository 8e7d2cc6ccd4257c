//! Small helpers.

use std::path::{Path, PathBuf};

/// Delimiter line that opens a block, without the trailing newline.
pub fn delimiter(entry: &str) -> String {
    format!("=== {} ===", entry)
}

/// Resolve a manifest entry against the collection root.
///
/// Entries are kept as written for the delimiter; only the lookup on disk
/// goes through the root. `"."` is left out so relative paths stay relative.
pub fn resolve(root: &Path, entry: &str) -> PathBuf {
    if root.as_os_str().is_empty() || root == Path::new(".") {
        PathBuf::from(entry)
    } else {
        root.join(entry)
    }
}

//! Route path composition.
//!
//! # Responsibilities
//! - Join a parent's full path with a child's relative path
//! - Collapse repeated `/` and trim the trailing `/`
//!
//! # Design Decisions
//! - Pure string functions, independent of tree traversal
//! - `"/"` is the only full path allowed to end in `/`

/// Concatenate a base path and a relative route path with `/`.
pub fn join_paths(base: &str, path: &str) -> String {
    format!("{base}/{path}")
}

/// Collapse runs of `/` into one and strip a trailing `/` unless the result is `"/"`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_slash = false;

    for ch in path.chars() {
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        normalized.push(ch);
    }

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// The normalized full path of a route nested under `base`.
pub fn full_path(base: &str, path: &str) -> String {
    normalize_path(&join_paths(base, path))
}

//! Path splitting.
//!
//! A path is a `/`-joined byte string. Every leading run of its components,
//! the full path included, is a prefix that gets its own wrapping key.
//!
//! ```text
//! "/foo/bar/test.jpg"
//!   [0] ""                   (root)
//!   [1] "/foo"
//!   [2] "/foo/bar"
//!   [3] "/foo/bar/test.jpg"  (full path)
//! ```
//!
//! A lone `"/"` is the root-only sentinel and yields just `""`. Without that
//! rule it would split into two empty components.

/// Separator between path components.
pub const PATH_SEPARATOR: u8 = b'/';

/// Root-only sentinel path.
pub const ROOT_PATH: &[u8] = b"/";

/// All prefixes of `path`, shallowest first.
///
/// Prefixes borrow from `path`. Index 0 is the root prefix and the last
/// element is always `path` itself, except for the [`ROOT_PATH`] sentinel
/// which maps to a single empty prefix.
///
/// # Invariants
///
/// - Result length equals [`component_count`]
/// - Result is never empty
/// - Each element is a prefix of the next
pub fn prefixes_of(path: &[u8]) -> Vec<&[u8]> {
    if path == ROOT_PATH {
        return vec![&path[..0]];
    }

    let mut prefixes = Vec::with_capacity(component_count(path));
    for (index, &byte) in path.iter().enumerate() {
        if byte == PATH_SEPARATOR {
            prefixes.push(&path[..index]);
        }
    }
    prefixes.push(path);
    prefixes
}

/// Number of `/`-separated components in `path`.
///
/// The [`ROOT_PATH`] sentinel counts as one component.
pub fn component_count(path: &[u8]) -> usize {
    if path == ROOT_PATH {
        return 1;
    }
    path.iter().filter(|&&byte| byte == PATH_SEPARATOR).count() + 1
}

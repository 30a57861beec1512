//! Project root discovery.

use std::path::{Path, PathBuf};

/// Maximum number of parent directories to walk when searching for a marker.
pub const MAX_WALK_LEVELS: usize = 10;

/// Walks up the directory tree from `start` looking for a directory containing `marker`.
///
/// Returns the directory containing the marker file/directory, or None if not found
/// within [`MAX_WALK_LEVELS`] iterations.
///
/// # Example
///
/// ```no_run
/// use buildcheck_core::util::paths::find_dir_with_marker;
///
/// if let Some(root) = find_dir_with_marker(".", "package.json") {
///     println!("Project root: {:?}", root);
/// }
/// ```
pub fn find_dir_with_marker<P: AsRef<Path>>(start: P, marker: &str) -> Option<PathBuf> {
    let mut current = start.as_ref().to_path_buf();

    for _ in 0..MAX_WALK_LEVELS {
        if current.join(marker).exists() {
            return Some(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    None
}

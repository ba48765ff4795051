//! Component source discovery.
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// File extension of single-file components.
pub const COMPONENT_EXTENSION: &str = "vue";

/// All component files below `dir`, sorted by path.
///
/// A missing directory yields no components and unreadable entries (such as
/// dangling links) are skipped with a warning. Ignore files are not honoured so installed packages under
/// `node_modules` are visited.
pub fn component_paths(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "component directory not found");
        return Vec::new();
    }
    let mut paths = Vec::new();
    for entry in WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(true)
        .build()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let is_file = entry.file_type().is_some_and(|kind| kind.is_file());
        if is_file && entry.path().extension() == Some(OsStr::new(COMPONENT_EXTENSION)) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    paths
}

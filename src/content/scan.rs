//! Directory scanning

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::LoadError;

/// Candidate post files directly inside `dir`, ordered by file name.
///
/// Subdirectories and files without a Markdown extension are skipped.
/// Symlinks are followed and judged by their target.
pub fn scan_posts(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source: e.into_io_error().unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::Other, "filesystem loop")
            }),
        })?;

        if entry.file_type().is_file() && is_markdown_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::error::{AnalysisError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    /// Path relative to the scanned root, always `/`-separated.
    pub relative_path: String,
    pub extension: String,
}

impl FileInfo {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate every file under `root_path` whose extension is in
    /// `suffixes`, matched case-sensitively. Symlinked files are listed under
    /// their link path; linked directories are not entered.
    pub fn scan_directory(
        &self,
        root_path: &Path,
        suffixes: &BTreeSet<String>,
    ) -> Result<Vec<FileInfo>> {
        validate_root(root_path)?;

        let entries: Vec<_> = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!(error = %err, "skipping unreadable directory entry");
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
            })
            .collect();

        let mut files: Vec<FileInfo> = entries
            .par_iter()
            .filter_map(|entry| {
                let path = entry.path();
                let extension = path.extension()?.to_str()?.to_string();
                if !suffixes.contains(&extension) {
                    return None;
                }
                Some(FileInfo {
                    path: path.to_path_buf(),
                    relative_path: relative_path(root_path, path)?,
                    extension,
                })
            })
            .collect();

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_root(root_path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(root_path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => AnalysisError::RootNotFound(root_path.to_path_buf()),
        _ => AnalysisError::Io(err),
    })?;
    if !metadata.is_dir() {
        return Err(AnalysisError::RootNotDirectory(root_path.to_path_buf()));
    }
    Ok(())
}

/// `/`-joined path of `path` below `root`, or `None` when it is not below it.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

//! File system access for Folio
//!
//! Record creation, editing, search and site configuration go through the
//! [`FileSystem`] trait so tests can substitute an in-memory implementation
//! and so every record rewrite is a single whole-file replacement.

use crate::error::{ErrorContext, FolioError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Trait for file system operations
pub trait FileSystem: Send + Sync {
    /// Read a file to string with enhanced error context
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Read a file's raw bytes
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replace a file's content in one step
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directories recursively
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Immediate children of a directory
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Every file below `root`, recursively. Hidden files and directories
    /// under `root` are skipped.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Production file system implementation using std::fs
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file '{}'", path.display()))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).with_context(|| format!("Failed to read file '{}'", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }

        // Write to a sibling temp file, then rename over the target
        let temp_path = path.with_extension(format!(
            "{}.tmp",
            path.extension().and_then(|s| s.to_str()).unwrap_or("")
        ));

        std::fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file '{}'", temp_path.display()))?;

        std::fs::rename(&temp_path, path).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!(
                "Failed to rename temp file '{}' to '{}'",
                temp_path.display(),
                path.display()
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)
            .with_context(|| format!("Failed to read directory '{}'", path.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("Failed to read directory entry in '{}'", path.display())
            })?;
            paths.push(entry.path());
        }

        Ok(paths)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let files = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable path while scanning: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
            .collect();
        Ok(files)
    }
}

/// File system utility with dependency injection support
#[derive(Clone)]
pub struct FileSystemUtils {
    fs: Arc<dyn FileSystem>,
}

impl FileSystemUtils {
    /// Create new file system utils with the default std implementation
    pub fn new() -> Self {
        Self {
            fs: Arc::new(StdFileSystem),
        }
    }

    /// Create new file system utils with a custom implementation (for testing)
    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a JSON file
    pub fn read_json<T>(&self, path: &Path) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let content = self.fs.read_to_string(path)?;
        serde_json::from_str(&content).map_err(FolioError::Json)
    }

    /// Write data as pretty JSON with a trailing newline
    pub fn write_json<T>(&self, path: &Path, data: &T) -> Result<()>
    where
        T: serde::Serialize,
    {
        let content = serde_json::to_string_pretty(data)?;
        self.fs.write(path, &format!("{content}\n"))
    }

    /// Get a reference to the underlying file system
    pub fn fs(&self) -> &dyn FileSystem {
        &*self.fs
    }
}

impl Default for FileSystemUtils {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FileSystemUtils {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSystemUtils").finish_non_exhaustive()
    }
}

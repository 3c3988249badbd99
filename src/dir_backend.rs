//! Directory store: an unpacked container tree scanned with `walkdir`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use walkdir::{DirEntry, WalkDir};

use crate::backend::ContainerBackend;
use crate::error::{MsczError, Result};

pub struct DirBackend {
    /// Path of the primary file inside the unpacked tree; its parent
    /// directory is the scan root.
    file_path: PathBuf,
}

impl DirBackend {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let file_path = std::path::absolute(&file_path).unwrap_or(file_path);
        Self { file_path }
    }
}

impl ContainerBackend for DirBackend {
    fn open(&mut self) -> Result<()> {
        let root = self.root_path();
        if root.is_dir() {
            Ok(())
        } else {
            Err(MsczError::SourceUnavailable(format!(
                "directory does not exist: {}",
                root.display()
            )))
        }
    }

    fn close(&mut self) {
        // noop: nothing is held open between reads
    }

    fn is_opened(&self) -> bool {
        self.root_path().is_dir()
    }

    fn root_path(&self) -> PathBuf {
        match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("/"),
        }
    }

    fn list_entries(&mut self) -> Result<Vec<String>> {
        let root = self.root_path();
        let mut files = Vec::new();
        let walker = WalkDir::new(&root).follow_links(false).sort_by_file_name();
        for entry in walker.into_iter().filter_entry(|e| !is_hidden(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable directory entry: {err}");
                    continue;
                }
            };
            // Symlinks are not followed, so their file_type is never a file.
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&root) {
                files.push(relative_name(rel));
            }
        }
        Ok(files)
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let path = self.root_path().join(name);
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(MsczError::EntryNotFound(name.to_string()))
            }
            Err(err) => Err(MsczError::Io(err)),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Root-relative entry name: forward slashes, no leading slash.
fn relative_name(rel: &Path) -> String {
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    parts.join("/")
}

//! High-level [`MsczReader`] API — the primary embedding surface.
//!
//! One reader serves both physical layouts of a score container: a ZIP
//! archive or an unpacked directory tree mirroring it. The active layout is
//! selected at construction and every read is resolved independently
//! against it; there is no phase distinction beyond open/closed.
//!
//! ```no_run
//! use mscz::{Mode, MsczReader};
//!
//! let mut reader = MsczReader::new("piece.mscz", Mode::Zip);
//! if reader.open() {
//!     let score = reader.read_score_file();
//!     let images = reader.image_file_names();
//!     println!("score: {} bytes, {} image(s)", score.len(), images.len());
//! }
//! reader.close();
//! ```
//!
//! Every read operation is total: failures are reported through the log
//! sink and yield an empty buffer, never a panic or an error value. The
//! reader stays usable after any failed read.
//!
//! The reader is single-threaded. Lazy adapter construction and
//! the cached classification mutate internal state, so methods take
//! `&mut self`; callers sharing a reader across threads must serialize
//! access themselves.

use std::path::{Path, PathBuf};

use log::{error, warn};

use crate::backend::{ContainerBackend, ContainerStream};
use crate::dir_backend::DirBackend;
use crate::meta::{
    ContainerMeta, AUDIO_ENTRY, AUDIO_SETTINGS_ENTRY, PICTURES_PREFIX, THUMBNAIL_ENTRY,
};
use crate::zip_backend::ZipBackend;

/// Physical layout of the container source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compressed ZIP archive.
    Zip,
    /// Unpacked directory tree mirroring the archive layout.
    Dir,
}

pub struct MsczReader {
    file_path: PathBuf,
    mode: Mode,
    backend: Box<dyn ContainerBackend>,
    meta: ContainerMeta,
}

impl MsczReader {
    /// Reader bound to a container path.
    ///
    /// `Mode::Zip` treats `path` as the archive file. `Mode::Dir` treats it
    /// as the primary file inside an unpacked tree; the parent directory is
    /// what gets scanned.
    pub fn new(path: impl Into<PathBuf>, mode: Mode) -> Self {
        let file_path = path.into();
        let backend = build_backend(&file_path, mode);
        Self {
            file_path,
            mode,
            backend,
            meta: ContainerMeta::default(),
        }
    }

    /// Reader over an already-open archive stream. Always `Mode::Zip`.
    pub fn from_stream(stream: Box<dyn ContainerStream>) -> Self {
        Self {
            file_path: PathBuf::new(),
            mode: Mode::Zip,
            backend: Box::new(ZipBackend::from_stream(stream)),
            meta: ContainerMeta::default(),
        }
    }

    /// Reader over an injected backend; classification and reads run
    /// unchanged against it. Intended for tests and embedders with custom
    /// stores.
    pub fn from_backend(backend: Box<dyn ContainerBackend>, mode: Mode) -> Self {
        Self {
            file_path: PathBuf::new(),
            mode,
            backend,
            meta: ContainerMeta::default(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Rebind to a new container path, keeping the current mode. The live
    /// adapter and any cached classification are discarded so the next
    /// `meta()` call re-scans the new source.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = path.into();
        self.backend = build_backend(&self.file_path, self.mode);
        self.meta = ContainerMeta::default();
    }

    /// Rebind the bound path under a different mode. Discards the adapter
    /// and cached classification like [`set_file_path`](Self::set_file_path).
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.backend = build_backend(&self.file_path, mode);
        self.meta = ContainerMeta::default();
    }

    /// Attach a new archive stream, replacing the current source. A reader
    /// previously in directory mode is forced to `Mode::Zip`.
    pub fn set_stream(&mut self, stream: Box<dyn ContainerStream>) {
        if self.mode == Mode::Dir {
            warn!("container source changed to a stream, mode forced to zip");
            self.mode = Mode::Zip;
        }
        self.backend = Box::new(ZipBackend::from_stream(stream));
        self.meta = ContainerMeta::default();
    }

    /// Bring the source into a readable state: open the self-owned stream
    /// in zip mode, check root existence in dir mode. Failures are logged
    /// and reported as `false`.
    pub fn open(&mut self) -> bool {
        match self.backend.open() {
            Ok(()) => true,
            Err(err) => {
                error!("failed to open container: {err}");
                false
            }
        }
    }

    /// Release the archive adapter and the underlying stream. Idempotent;
    /// a no-op in dir mode.
    pub fn close(&mut self) {
        self.backend.close();
    }

    /// Live state: the stream-open flag in zip mode, root existence in dir
    /// mode. Re-checked on every call, not cached.
    pub fn is_opened(&self) -> bool {
        self.backend.is_opened()
    }

    /// `/` in zip mode (archive entry paths are already container-relative);
    /// the parent directory of the bound path in dir mode.
    pub fn root_path(&self) -> PathBuf {
        self.backend.root_path()
    }

    /// Classification of the container listing, computed once and cached.
    ///
    /// A listing failure is logged and whatever partial classification came
    /// out of the (possibly empty) listing is cached anyway; the cache is
    /// only dropped when the source is reattached.
    pub fn meta(&mut self) -> &ContainerMeta {
        if !self.meta.valid {
            let listing = match self.backend.list_entries() {
                Ok(files) => files,
                Err(err) => {
                    error!("failed to list container entries: {err}");
                    Vec::new()
                }
            };
            self.meta = ContainerMeta::classify(&listing);
        }
        &self.meta
    }

    /// Full contents of one named entry. Total: any failure is logged and
    /// yields an empty buffer.
    pub fn file_data(&mut self, name: &str) -> Vec<u8> {
        match self.backend.read_entry(name) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to read entry \"{name}\": {err}");
                Vec::new()
            }
        }
    }

    /// Contents of the score descriptor entry; empty if the listing holds
    /// no `*.mscx` entry.
    pub fn read_score_file(&mut self) -> Vec<u8> {
        match self.meta().score_path.clone() {
            Some(path) => self.file_data(&path),
            None => {
                error!("container holds no score entry");
                Vec::new()
            }
        }
    }

    pub fn read_thumbnail_file(&mut self) -> Vec<u8> {
        self.file_data(THUMBNAIL_ENTRY)
    }

    pub fn read_image_file(&mut self, name: &str) -> Vec<u8> {
        self.file_data(&format!("{PICTURES_PREFIX}{name}"))
    }

    /// Base names of the embedded images, in listing order. Two images in
    /// different subdirectories can share a base name.
    pub fn image_file_names(&mut self) -> Vec<String> {
        self.meta()
            .image_paths
            .iter()
            .map(|path| match path.rsplit('/').next() {
                Some(name) => name.to_string(),
                None => path.clone(),
            })
            .collect()
    }

    pub fn read_audio_file(&mut self) -> Vec<u8> {
        self.file_data(AUDIO_ENTRY)
    }

    pub fn read_audio_settings_json_file(&mut self) -> Vec<u8> {
        self.file_data(AUDIO_SETTINGS_ENTRY)
    }
}

fn build_backend(path: &Path, mode: Mode) -> Box<dyn ContainerBackend> {
    match mode {
        Mode::Zip => Box::new(ZipBackend::from_path(path)),
        Mode::Dir => Box::new(DirBackend::new(path)),
    }
}

//! Backend capability interface over the two physical container stores.
//!
//! A reader composes with exactly one live backend at a time: a ZIP archive
//! ([`ZipBackend`]) or an unpacked directory tree ([`DirBackend`]). The
//! trait keeps the reader's classification and read logic independent of
//! the store, and lets tests inject a fake one.
//!
//! [`ZipBackend`]: crate::zip_backend::ZipBackend
//! [`DirBackend`]: crate::dir_backend::DirBackend

use std::io::{Read, Seek};
use std::path::PathBuf;

use crate::error::Result;

/// Byte stream a ZIP container can be served from.
///
/// Blanket-implemented for anything readable and seekable. A boxed stream
/// handed to the reader is moved into it and dropped on teardown.
pub trait ContainerStream: Read + Seek {}

impl<T: Read + Seek> ContainerStream for T {}

/// Capability interface over one physical container store.
///
/// Implementations report failures as [`Result`]s; turning failures into
/// logged empty results is the reader's job, so every method here stays an
/// honest fallible operation.
pub trait ContainerBackend {
    /// Bring the store into a readable state. Idempotent.
    fn open(&mut self) -> Result<()>;

    /// Release the adapter and any self-owned handle. Idempotent.
    fn close(&mut self);

    /// Live state query; re-checks the underlying store on every call
    /// rather than reporting a cached flag.
    fn is_opened(&self) -> bool;

    /// Container root: `/` for archives (entry paths are already
    /// container-relative), the parent of the bound path for directories.
    fn root_path(&self) -> PathBuf;

    /// Root-relative paths of all file entries, in store order.
    fn list_entries(&mut self) -> Result<Vec<String>>;

    /// Full contents of one named entry.
    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>>;
}

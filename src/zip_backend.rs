//! ZIP store: a lazily constructed [`ZipArchive`] over either a self-owned
//! file or a caller-supplied stream.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use log::warn;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::backend::{ContainerBackend, ContainerStream};
use crate::error::{MsczError, Result};

/// Where the archive bytes come from.
///
/// The path variant owns its file handle and can reopen it after `close()`;
/// a supplied stream is consumed by the adapter and gone once released.
enum StreamSource {
    Path {
        path: PathBuf,
        handle: Option<File>,
    },
    Stream(Option<Box<dyn ContainerStream>>),
}

pub struct ZipBackend {
    source: StreamSource,
    archive: Option<ZipArchive<Box<dyn ContainerStream>>>,
}

impl ZipBackend {
    /// Archive bound to a file path; the handle is opened by
    /// [`ContainerBackend::open`].
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: StreamSource::Path {
                path: path.into(),
                handle: None,
            },
            archive: None,
        }
    }

    /// Archive over an already-open stream supplied by the caller.
    pub fn from_stream(stream: Box<dyn ContainerStream>) -> Self {
        Self {
            source: StreamSource::Stream(Some(stream)),
            archive: None,
        }
    }

    /// Construct the archive adapter on first use, consuming the stream.
    /// Reads before `open()` land here and degrade to `SourceUnavailable`.
    fn archive(&mut self) -> Result<&mut ZipArchive<Box<dyn ContainerStream>>> {
        if self.archive.is_none() {
            let stream: Box<dyn ContainerStream> = match &mut self.source {
                StreamSource::Path { path, handle } => match handle.take() {
                    Some(file) => Box::new(file),
                    None => {
                        return Err(MsczError::SourceUnavailable(format!(
                            "stream not open: {}",
                            path.display()
                        )))
                    }
                },
                StreamSource::Stream(stream) => match stream.take() {
                    Some(stream) => stream,
                    None => {
                        return Err(MsczError::SourceUnavailable(
                            "stream already released".into(),
                        ))
                    }
                },
            };
            self.archive = Some(ZipArchive::new(stream)?);
        }
        match &mut self.archive {
            Some(archive) => Ok(archive),
            None => Err(MsczError::SourceUnavailable("no archive adapter".into())),
        }
    }
}

impl ContainerBackend for ZipBackend {
    fn open(&mut self) -> Result<()> {
        match &mut self.source {
            StreamSource::Path { path, handle } => {
                if handle.is_none() && self.archive.is_none() {
                    *handle = Some(File::open(path.as_path())?);
                }
            }
            StreamSource::Stream(stream) => {
                // A supplied stream is open by construction; it is only
                // missing after close() released it.
                if stream.is_none() && self.archive.is_none() {
                    return Err(MsczError::SourceUnavailable(
                        "stream already released".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        self.archive = None;
        match &mut self.source {
            StreamSource::Path { handle, .. } => *handle = None,
            StreamSource::Stream(stream) => *stream = None,
        }
    }

    fn is_opened(&self) -> bool {
        if self.archive.is_some() {
            return true;
        }
        match &self.source {
            StreamSource::Path { handle, .. } => handle.is_some(),
            StreamSource::Stream(stream) => stream.is_some(),
        }
    }

    fn root_path(&self) -> PathBuf {
        PathBuf::from("/")
    }

    fn list_entries(&mut self) -> Result<Vec<String>> {
        let archive = self.archive()?;
        let mut files = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = match archive.by_index(i) {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable archive entry {i}: {err}");
                    continue;
                }
            };
            if entry.is_file() {
                files.push(entry.name().to_string());
            }
        }
        Ok(files)
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let archive = self.archive()?;
        let mut entry = archive.by_name(name).map_err(|err| match err {
            ZipError::FileNotFound => MsczError::EntryNotFound(name.to_string()),
            other => MsczError::Zip(other),
        })?;
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        Ok(data)
    }
}

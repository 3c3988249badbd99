use thiserror::Error;

#[derive(Error, Debug)]
pub enum MsczError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The backing store cannot serve reads: the archive stream is not
    /// open (or was released), or the directory root does not exist.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("entry not found: {0}")]
    EntryNotFound(String),
}

/// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, MsczError>;

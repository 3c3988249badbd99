//! Entry classification for the container layout.
//!
//! The container carries no manifest; entries are resolved purely by path
//! convention. The first `*.mscx` entry in listing order is the score
//! descriptor, everything under `Pictures/` is an embedded image, and the
//! remaining well-known resources live at fixed names.

use log::warn;

/// Extension of the main score descriptor entry.
pub const SCORE_EXTENSION: &str = ".mscx";
/// Reserved prefix for embedded image resources.
pub const PICTURES_PREFIX: &str = "Pictures/";
/// Fixed-name preview image entry.
pub const THUMBNAIL_ENTRY: &str = "Thumbnails/thumbnail.png";
/// Fixed-name rendered audio entry.
pub const AUDIO_ENTRY: &str = "audio.ogg";
/// Fixed-name audio render settings entry.
pub const AUDIO_SETTINGS_ENTRY: &str = "audiosettings.json";

/// Cached classification of a container listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerMeta {
    /// Root-relative path of the score descriptor, if one was listed.
    pub score_path: Option<String>,
    /// Root-relative paths of embedded images, in listing order.
    pub image_paths: Vec<String>,
    /// False until the first listing pass has run. An empty listing still
    /// produces a valid result; only a source reattach resets this.
    pub valid: bool,
}

impl ContainerMeta {
    /// Classify a listing. `files` holds root-relative paths of file
    /// entries only, in backend listing order.
    ///
    /// The container format does not define a tie-break for multiple
    /// `*.mscx` entries: the first one wins and each later one is reported
    /// through the log sink.
    pub fn classify(files: &[String]) -> Self {
        let mut meta = ContainerMeta {
            valid: true,
            ..ContainerMeta::default()
        };
        for path in files {
            if path.ends_with(SCORE_EXTENSION) {
                if meta.score_path.is_some() {
                    warn!("ignoring extra score entry: {path}");
                } else {
                    meta.score_path = Some(path.clone());
                }
            } else if path.starts_with(PICTURES_PREFIX) {
                meta.image_paths.push(path.clone());
            }
        }
        meta
    }
}

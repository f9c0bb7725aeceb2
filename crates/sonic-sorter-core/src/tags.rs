//! Genre tag extraction
//!
//! Reads the genre field from embedded audio metadata using lofty.
//! Extraction never fails past this boundary: problems are reported as
//! [`TagLookup::Missing`] or [`TagLookup::Unavailable`].

use std::fmt;
use std::path::Path;

use lofty::error::LoftyError;
use lofty::file::{TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;

/// Display value for files whose metadata could not be read
pub const NO_METADATA: &str = "no_metadata";

/// Result of looking up the genre tag of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLookup {
    /// Genre field present (trimmed, may still be empty)
    Found(String),
    /// File readable but carries no genre field
    Missing,
    /// File unreadable, corrupt or in an unsupported container
    Unavailable(String),
}

impl TagLookup {
    /// Genre string used for classification and logging
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Found(genre) => genre,
            Self::Missing => "",
            Self::Unavailable(_) => NO_METADATA,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable(_))
    }
}

impl fmt::Display for TagLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Source of genre tags for audio files
pub trait TagExtractor {
    fn extract(&self, path: &Path) -> TagLookup;
}

/// Tag extractor backed by lofty
///
/// Reads the primary tag of the file, falling back to the first tag found.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagExtractor;

impl LoftyTagExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TagExtractor for LoftyTagExtractor {
    fn extract(&self, path: &Path) -> TagLookup {
        let tagged_file = match read_tagged_file(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(file = %path.display(), error = %e, "failed to read tags");
                return TagLookup::Unavailable(e.to_string());
            }
        };

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());

        match tag.and_then(|t| t.genre()) {
            Some(genre) => TagLookup::Found(genre.trim().to_string()),
            None => TagLookup::Missing,
        }
    }
}

/// Probe by content first, falling back to the extension
fn read_tagged_file(path: &Path) -> Result<TaggedFile, LoftyError> {
    let probe = Probe::open(path)?.guess_file_type()?;
    probe.read()
}

impl<T: TagExtractor + ?Sized> TagExtractor for &T {
    fn extract(&self, path: &Path) -> TagLookup {
        (**self).extract(path)
    }
}

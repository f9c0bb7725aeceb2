use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DEFAULT_EXTENSIONS;
use crate::error::{Result, SonicSorterError};

/// Finds audio files under a library directory
#[derive(Debug, Clone)]
pub struct Scanner {
    extensions: Vec<String>,
    excluded: Vec<PathBuf>,
}

impl Scanner {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            extensions,
            excluded: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }

    /// Skip everything below these directories (e.g. output folders nested in the source)
    pub fn exclude<I>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.excluded.extend(dirs);
        self
    }

    /// Whether the file name carries one of the scanned extensions
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.extensions.iter().any(|x| *x == e)
            })
            .unwrap_or(false)
    }

    /// Collect matching files below `source` (sorted)
    ///
    /// Unreadable entries are skipped.
    pub fn scan(&self, source: &Path) -> Result<Vec<PathBuf>> {
        if !source.is_dir() {
            return Err(SonicSorterError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }

        let excluded: Vec<PathBuf> = self
            .excluded
            .iter()
            .filter_map(|p| p.canonicalize().ok())
            .collect();

        let mut files: Vec<PathBuf> = Vec::new();

        let walker = WalkDir::new(source).into_iter().filter_entry(|entry| {
            if !entry.file_type().is_dir() || excluded.is_empty() {
                return true;
            }
            match entry.path().canonicalize() {
                Ok(dir) => !excluded.contains(&dir),
                Err(_) => true,
            }
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && self.accepts(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        tracing::debug!(source = %source.display(), count = files.len(), "scan complete");
        Ok(files)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::with_defaults()
    }
}

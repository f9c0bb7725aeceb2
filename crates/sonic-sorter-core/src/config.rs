use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SonicSorterError};
use crate::genre::{builtin_cold, builtin_warm};
use crate::sorter::SortPaths;

const CONFIG_FILE: &str = "config.toml";

/// Audio file extensions scanned by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "m4a"];

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sonic-sorter configuration file
# Location: ~/.sonic-sorter/config.toml

[paths]
# Library to scan (searched recursively)
source = "."

# Output directories, one per bucket. Created on demand.
warm = "sorted/warm"
cold = "sorted/cold"
undefined = "sorted/undefined"

[scan]
# File extensions to pick up (case-insensitive)
extensions = ["mp3", "flac", "wav", "m4a"]

[genres]
# Genre phrases per bucket. Omit a list to use the builtin vocabulary.
# Spaces, hyphens and ampersands are interchangeable: "hip hop" also
# matches "Hip-Hop" and "hip & hop". Cold is checked before warm.
# Example: warm = ["jazz", "dream pop", "lo-fi"]
# Example: cold = ["techno", "drum and bass", "industrial"]
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub genres: GenresConfig,
}

/// Source and destination directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_source")]
    pub source: PathBuf,

    #[serde(default = "default_warm_dir")]
    pub warm: PathBuf,

    #[serde(default = "default_cold_dir")]
    pub cold: PathBuf,

    #[serde(default = "default_undefined_dir")]
    pub undefined: PathBuf,
}

fn default_source() -> PathBuf {
    PathBuf::from(".")
}

fn default_warm_dir() -> PathBuf {
    PathBuf::from("sorted/warm")
}

fn default_cold_dir() -> PathBuf {
    PathBuf::from("sorted/cold")
}

fn default_undefined_dir() -> PathBuf {
    PathBuf::from("sorted/undefined")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            warm: default_warm_dir(),
            cold: default_cold_dir(),
            undefined: default_undefined_dir(),
        }
    }
}

/// Scan-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions to include (without dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

/// Genre vocabulary. `None` means builtin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenresConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warm: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cold: Option<Vec<String>>,
}

impl GenresConfig {
    /// Effective warm list (configured or builtin)
    pub fn warm_list(&self) -> Vec<String> {
        self.warm.clone().unwrap_or_else(builtin_warm)
    }

    /// Effective cold list (configured or builtin)
    pub fn cold_list(&self) -> Vec<String> {
        self.cold.clone().unwrap_or_else(builtin_cold)
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| SonicSorterError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        self.list()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "paths.source" => self.paths.source = PathBuf::from(value.trim()),
            "paths.warm" => self.paths.warm = PathBuf::from(value.trim()),
            "paths.cold" => self.paths.cold = PathBuf::from(value.trim()),
            "paths.undefined" => self.paths.undefined = PathBuf::from(value.trim()),
            "scan.extensions" => {
                self.scan.extensions = parse_string_list(value)?
                    .into_iter()
                    .map(|e| e.trim_start_matches('.').to_lowercase())
                    .collect();
            }
            "genres.warm" => self.genres.warm = Some(parse_string_list(value)?),
            "genres.cold" => self.genres.cold = Some(parse_string_list(value)?),
            _ => {
                return Err(SonicSorterError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "paths.source".to_string(),
                self.paths.source.display().to_string(),
            ),
            (
                "paths.warm".to_string(),
                self.paths.warm.display().to_string(),
            ),
            (
                "paths.cold".to_string(),
                self.paths.cold.display().to_string(),
            ),
            (
                "paths.undefined".to_string(),
                self.paths.undefined.display().to_string(),
            ),
            (
                "scan.extensions".to_string(),
                format!("{:?}", self.scan.extensions),
            ),
            (
                "genres.warm".to_string(),
                describe_genres(self.genres.warm.as_deref()),
            ),
            (
                "genres.cold".to_string(),
                describe_genres(self.genres.cold.as_deref()),
            ),
        ]
    }

    /// Convert to SortPaths for use in sort
    pub fn to_sort_paths(&self) -> SortPaths {
        SortPaths {
            source: self.paths.source.clone(),
            warm: self.paths.warm.clone(),
            cold: self.paths.cold.clone(),
            undefined: self.paths.undefined.clone(),
        }
    }
}

fn describe_genres(list: Option<&[String]>) -> String {
    match list {
        Some(list) => format!("{:?}", list),
        None => "(builtin)".to_string(),
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Result<Vec<String>> {
    let trimmed = value.trim();

    // Try JSON array format first: ["a", "b"]
    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    // Comma-separated format: a,b,c or "a","b"
    let items: Vec<String> = inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(items)
}

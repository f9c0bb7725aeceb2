pub mod config;
pub mod error;
pub mod genre;
pub mod scanner;
pub mod sorter;
pub mod tags;

pub use config::{Config, GenresConfig, PathsConfig, ScanConfig, DEFAULT_EXTENSIONS};
pub use error::{Result, SonicSorterError};
pub use scanner::Scanner;
pub use sorter::{SortCallback, SortEvent, SortOptions, SortPaths, SortReport, Sorter};
pub use tags::{LoftyTagExtractor, TagExtractor, TagLookup, NO_METADATA};

// Genre classification
pub use genre::{Bucket, GenreClassifier, GenreMatcher, COLD_GENRES, WARM_GENRES};

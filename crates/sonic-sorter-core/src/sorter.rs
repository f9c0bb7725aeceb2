use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, SonicSorterError};
use crate::genre::{Bucket, GenreClassifier};
use crate::scanner::Scanner;
use crate::tags::{TagExtractor, TagLookup};

/// Width of the file name column in log lines
const NAME_WIDTH: usize = 30;

/// Callback type for per-file progress reporting
pub type SortCallback<'a> = Option<&'a dyn Fn(&SortEvent<'_>)>;

/// Library location and one output directory per bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortPaths {
    pub source: PathBuf,
    pub warm: PathBuf,
    pub cold: PathBuf,
    pub undefined: PathBuf,
}

impl SortPaths {
    pub fn destination(&self, bucket: Bucket) -> &Path {
        match bucket {
            Bucket::Cold => &self.cold,
            Bucket::Warm => &self.warm,
            Bucket::Undefined => &self.undefined,
        }
    }

    pub fn destinations(&self) -> Vec<&Path> {
        Bucket::ALL.iter().map(|b| self.destination(*b)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SortOptions {
    /// Classify and report only; create and copy nothing
    pub dry_run: bool,
}

/// What happened to one file
#[derive(Debug)]
pub struct SortEvent<'a> {
    pub path: &'a Path,
    pub file_name: &'a str,
    pub bucket: Bucket,
    pub tag: &'a TagLookup,
    /// Copy failure, if any
    pub error: Option<&'a str>,
}

impl SortEvent<'_> {
    /// File name cut and padded to the log column width
    pub fn display_name(&self) -> String {
        fit_name(self.file_name, NAME_WIDTH)
    }

    /// `[icon LABEL] name                           | Genre: tag`
    pub fn log_line(&self) -> String {
        self.log_line_with(self.bucket.status())
    }

    /// Same layout as [`log_line`](Self::log_line) with a caller-rendered status (e.g. colored)
    pub fn log_line_with<S: fmt::Display>(&self, status: S) -> String {
        format!("{} {} | Genre: {}", status, self.display_name(), self.tag)
    }
}

#[derive(Debug, Default)]
pub struct SortReport {
    pub scanned: usize,
    pub cold: usize,
    pub warm: usize,
    pub undefined: usize,
    /// Files whose tags could not be read
    pub unreadable: usize,
    /// (source file, error message)
    pub failed: Vec<(PathBuf, String)>,
}

impl SortReport {
    pub fn count(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Cold => self.cold,
            Bucket::Warm => self.warm,
            Bucket::Undefined => self.undefined,
        }
    }

    fn record(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Cold => self.cold += 1,
            Bucket::Warm => self.warm += 1,
            Bucket::Undefined => self.undefined += 1,
        }
    }
}

/// Classifies audio files by genre tag and copies them into bucket directories
pub struct Sorter<E> {
    classifier: GenreClassifier,
    extractor: E,
    scanner: Scanner,
}

impl<E: TagExtractor> Sorter<E> {
    pub fn new(classifier: GenreClassifier, extractor: E, scanner: Scanner) -> Self {
        Self {
            classifier,
            extractor,
            scanner,
        }
    }

    pub fn classifier(&self) -> &GenreClassifier {
        &self.classifier
    }

    /// Validate the source and create the bucket directories
    pub fn prepare(&self, paths: &SortPaths, options: SortOptions) -> Result<()> {
        if !paths.source.is_dir() {
            return Err(SonicSorterError::SourceNotFound {
                path: paths.source.clone(),
            });
        }

        for dir in paths.destinations() {
            if dir.exists() && !dir.is_dir() {
                return Err(SonicSorterError::InvalidDestination {
                    path: dir.to_path_buf(),
                });
            }
            if !options.dry_run {
                fs::create_dir_all(dir)?;
            }
        }

        Ok(())
    }

    /// List candidate files, leaving out anything already inside a bucket directory
    pub fn collect(&self, paths: &SortPaths) -> Result<Vec<PathBuf>> {
        self.scanner
            .clone()
            .exclude(paths.destinations().into_iter().map(Path::to_path_buf))
            .scan(&paths.source)
    }

    /// Classify and copy each file. Per-file failures are recorded, not returned.
    pub fn sort_files(
        &self,
        files: &[PathBuf],
        paths: &SortPaths,
        options: SortOptions,
        on_file: SortCallback<'_>,
    ) -> SortReport {
        let mut report = SortReport {
            scanned: files.len(),
            ..SortReport::default()
        };

        for path in files {
            let file_name = match path.file_name() {
                Some(name) => name.to_string_lossy().to_string(),
                None => continue,
            };

            let tag = self.extractor.extract(path);
            if !tag.is_available() {
                report.unreadable += 1;
            }
            let bucket = self.classifier.classify_lookup(&tag);
            report.record(bucket);

            let error = if options.dry_run {
                None
            } else {
                let dst = paths.destination(bucket).join(&file_name);
                copy_file(path, &dst).err().map(|e| e.to_string())
            };

            tracing::debug!(
                file = %path.display(),
                genre = %tag,
                bucket = %bucket,
                "classified"
            );

            if let Some(e) = &error {
                tracing::debug!(file = %path.display(), error = %e, "copy failed");
            }

            if let Some(f) = on_file {
                f(&SortEvent {
                    path,
                    file_name: &file_name,
                    bucket,
                    tag: &tag,
                    error: error.as_deref(),
                });
            }

            if let Some(e) = error {
                report.failed.push((path.clone(), e));
            }
        }

        report
    }

    /// prepare + collect + sort_files
    pub fn sort(
        &self,
        paths: &SortPaths,
        options: SortOptions,
        on_file: SortCallback<'_>,
    ) -> Result<SortReport> {
        self.prepare(paths, options)?;
        let files = self.collect(paths)?;
        Ok(self.sort_files(&files, paths, options, on_file))
    }
}

/// Copy a file, carrying over its modification time
fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst)?;

    // Timestamps are best-effort
    let preserve = || -> io::Result<()> {
        let modified = fs::metadata(src)?.modified()?;
        fs::File::options().write(true).open(dst)?.set_modified(modified)
    };
    if let Err(e) = preserve() {
        tracing::debug!(file = %dst.display(), error = %e, "could not preserve mtime");
    }

    Ok(())
}

/// Truncate to `width` characters and pad to the same width
fn fit_name(name: &str, width: usize) -> String {
    let truncated: String = name.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    /// Tag extractor answering from a file name -> lookup table
    struct FakeExtractor(HashMap<String, TagLookup>);

    impl FakeExtractor {
        fn new(entries: &[(&str, TagLookup)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            )
        }
    }

    impl TagExtractor for FakeExtractor {
        fn extract(&self, path: &Path) -> TagLookup {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.0.get(&name).cloned().unwrap_or(TagLookup::Missing)
        }
    }

    fn found(genre: &str) -> TagLookup {
        TagLookup::Found(genre.to_string())
    }

    fn setup(dir: &Path) -> SortPaths {
        let source = dir.join("library");
        fs::create_dir_all(source.join("album")).unwrap();
        for name in ["techno.mp3", "jazz.flac", "album/unknown.wav", "album/broken.m4a"] {
            fs::write(source.join(name), name.as_bytes()).unwrap();
        }
        fs::write(source.join("cover.jpg"), b"img").unwrap();

        SortPaths {
            source,
            warm: dir.join("out/warm"),
            cold: dir.join("out/cold"),
            undefined: dir.join("out/undefined"),
        }
    }

    fn sorter() -> Sorter<FakeExtractor> {
        let extractor = FakeExtractor::new(&[
            ("techno.mp3", found("Minimal Techno")),
            ("jazz.flac", found("Acid Jazz")),
            ("broken.m4a", TagLookup::Unavailable("corrupt".to_string())),
        ]);
        Sorter::new(GenreClassifier::builtin(), extractor, Scanner::with_defaults())
    }

    #[test]
    fn test_sort_routes_into_buckets() {
        let dir = TempDir::new().unwrap();
        let paths = setup(dir.path());

        let report = sorter()
            .sort(&paths, SortOptions::default(), None)
            .unwrap();

        assert_eq!(report.scanned, 4);
        assert_eq!(report.cold, 1);
        assert_eq!(report.warm, 1);
        assert_eq!(report.undefined, 2);
        assert_eq!(report.unreadable, 1);
        assert!(report.failed.is_empty());

        assert!(paths.cold.join("techno.mp3").exists());
        assert!(paths.warm.join("jazz.flac").exists());
        assert!(paths.undefined.join("unknown.wav").exists());
        assert!(paths.undefined.join("broken.m4a").exists());
        assert!(!paths.undefined.join("cover.jpg").exists());

        // Sources are copied, not moved
        assert!(paths.source.join("techno.mp3").exists());
        assert_eq!(
            fs::read(paths.warm.join("jazz.flac")).unwrap(),
            b"jazz.flac"
        );
    }

    #[test]
    fn test_sort_reports_each_file() {
        let dir = TempDir::new().unwrap();
        let paths = setup(dir.path());
        let seen = RefCell::new(Vec::new());

        let on_file = |event: &SortEvent<'_>| {
            seen.borrow_mut().push((
                event.file_name.to_string(),
                event.bucket,
                event.tag.to_string(),
            ));
        };

        sorter()
            .sort(&paths, SortOptions::default(), Some(&on_file))
            .unwrap();

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 4);
        let find = |name: &str| seen.iter().find(|(n, _, _)| n == name).cloned().unwrap();
        assert_eq!(find("techno.mp3").1, Bucket::Cold);
        assert_eq!(find("techno.mp3").2, "Minimal Techno");
        assert_eq!(find("broken.m4a").1, Bucket::Undefined);
        assert_eq!(find("broken.m4a").2, "no_metadata");
        assert_eq!(find("unknown.wav").2, "");
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = setup(dir.path());

        let report = sorter()
            .sort(&paths, SortOptions { dry_run: true }, None)
            .unwrap();

        assert_eq!(report.scanned, 4);
        assert_eq!(report.cold, 1);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_copy_failure_does_not_stop_the_run() {
        let dir = TempDir::new().unwrap();
        let paths = setup(dir.path());
        let sorter = sorter();
        sorter.prepare(&paths, SortOptions::default()).unwrap();

        // A directory squatting on the destination name makes that copy fail
        fs::create_dir_all(paths.cold.join("techno.mp3")).unwrap();

        let files = sorter.collect(&paths).unwrap();
        let report = sorter.sort_files(&files, &paths, SortOptions::default(), None);

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, paths.source.join("techno.mp3"));
        assert!(paths.warm.join("jazz.flac").exists());
        assert!(paths.undefined.join("unknown.wav").exists());
    }

    /// Shared buffer the test subscriber writes into
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_copy_failure_is_not_logged_at_warn() {
        let dir = TempDir::new().unwrap();
        let paths = setup(dir.path());
        let sorter = sorter();
        sorter.prepare(&paths, SortOptions::default()).unwrap();
        fs::create_dir_all(paths.cold.join("techno.mp3")).unwrap();

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let report = tracing::subscriber::with_default(subscriber, || {
            let files = sorter.collect(&paths).unwrap();
            sorter.sort_files(&files, &paths, SortOptions::default(), None)
        });

        assert_eq!(report.failed.len(), 1);
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.is_empty(), "unexpected log output: {}", output);
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut paths = setup(dir.path());
        paths.source = dir.path().join("missing");

        let err = sorter()
            .sort(&paths, SortOptions::default(), None)
            .unwrap_err();
        assert!(matches!(err, SonicSorterError::SourceNotFound { .. }));
        assert!(!paths.warm.exists());
    }

    #[test]
    fn test_destination_must_be_a_directory() {
        let dir = TempDir::new().unwrap();
        let paths = setup(dir.path());
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(&paths.undefined, b"file").unwrap();

        let err = sorter()
            .prepare(&paths, SortOptions::default())
            .unwrap_err();
        assert!(matches!(err, SonicSorterError::InvalidDestination { .. }));
    }

    #[test]
    fn test_outputs_inside_source_are_not_rescanned() {
        let dir = TempDir::new().unwrap();
        let mut paths = setup(dir.path());
        paths.warm = paths.source.join("sorted/warm");
        paths.cold = paths.source.join("sorted/cold");
        paths.undefined = paths.source.join("sorted/undefined");

        let sorter = sorter();
        sorter.sort(&paths, SortOptions::default(), None).unwrap();
        let second = sorter.sort(&paths, SortOptions::default(), None).unwrap();

        assert_eq!(second.scanned, 4);
    }

    #[test]
    fn test_copy_overwrites_and_keeps_mtime() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.mp3");
        let dst = dir.path().join("b.mp3");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();

        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        fs::File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"new");
        assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), mtime);
    }

    #[test]
    fn test_log_line_truncates_name() {
        let tag = found("Dream Pop");
        let event = SortEvent {
            path: Path::new("x"),
            file_name: "a very long file name that keeps going.mp3",
            bucket: Bucket::Warm,
            tag: &tag,
            error: None,
        };
        assert_eq!(
            event.log_line(),
            "[🔥 WARM] a very long file name that kee | Genre: Dream Pop"
        );
    }

    #[test]
    fn test_log_line_with_custom_status() {
        let tag = TagLookup::Missing;
        let event = SortEvent {
            path: Path::new("x"),
            file_name: "b.wav",
            bucket: Bucket::Undefined,
            tag: &tag,
            error: None,
        };
        let expected = format!("<?> {:<30} | Genre: ", "b.wav");
        assert_eq!(event.log_line_with("<?>"), expected);
        assert_eq!(
            event.log_line(),
            event.log_line_with(Bucket::Undefined.status())
        );
    }

    #[test]
    fn test_fit_name_pads_short_names() {
        assert_eq!(fit_name("a.mp3", 8), "a.mp3   ");
        assert_eq!(fit_name("ひらがな.mp3", 4), "ひらがな");
    }
}

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing_subscriber::EnvFilter;

use sonic_sorter_core::config::Config;
use sonic_sorter_core::genre::{Bucket, GenreClassifier, GenreMatcher};
use sonic_sorter_core::scanner::Scanner;
use sonic_sorter_core::sorter::{SortEvent, SortOptions, Sorter};
use sonic_sorter_core::tags::LoftyTagExtractor;
use sonic_sorter_core::{Result, SonicSorterError};

mod args;
use args::{Cli, Commands, ConfigAction, GenreList, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);
    tracing::debug!(base_dir = %base_dir.display(), "resolved base directory");

    let result = match cli.command {
        Some(Commands::Sort {
            source,
            warm,
            cold,
            undefined,
            dry_run,
        }) => handle_sort(
            &base_dir,
            PathOverrides {
                source,
                warm,
                cold,
                undefined,
            },
            SortOptions { dry_run },
            cli.quiet,
        ),
        Some(Commands::Classify { tags }) => handle_classify(&base_dir, &tags),
        Some(Commands::Genres { bucket }) => handle_genres(&base_dir, bucket),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// RUST_LOG wins; otherwise --verbose / --quiet pick the level
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "sonic-sorter", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("SONIC_SORTER_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".sonic-sorter"))
        .unwrap_or_else(|| PathBuf::from(".sonic-sorter"))
}

/// CLI path options; each one replaces the configured value
struct PathOverrides {
    source: Option<PathBuf>,
    warm: Option<PathBuf>,
    cold: Option<PathBuf>,
    undefined: Option<PathBuf>,
}

fn status_label(bucket: Bucket) -> ColoredString {
    let label = bucket.status();
    match bucket {
        Bucket::Cold => label.cyan().bold(),
        Bucket::Warm => label.yellow().bold(),
        Bucket::Undefined => label.normal(),
    }
}

fn create_progress_bar(len: usize, quiet: bool) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    } else if let Ok(style) = ProgressStyle::with_template(
        "{msg} [{elapsed_precise}] [{bar:40.green/white}] {pos}/{len} ({per_sec}, ETA: {eta})",
    ) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message("Processing");
    pb
}

/// Print a line without tearing the bar. Unlike `ProgressBar::println`,
/// this still prints when the bar is hidden (stderr not a terminal).
fn write_above_bar(pb: &ProgressBar, out: &mut dyn Write, line: &str) {
    pb.suspend(|| {
        if let Err(e) = writeln!(out, "{}", line) {
            tracing::debug!(error = %e, "failed to write log line");
        }
    });
}

fn handle_sort(
    base_dir: &Path,
    overrides: PathOverrides,
    options: SortOptions,
    quiet: bool,
) -> Result<()> {
    let config = Config::load(base_dir)?;

    let mut paths = config.to_sort_paths();
    if let Some(source) = overrides.source {
        paths.source = source;
    }
    if let Some(warm) = overrides.warm {
        paths.warm = warm;
    }
    if let Some(cold) = overrides.cold {
        paths.cold = cold;
    }
    if let Some(undefined) = overrides.undefined {
        paths.undefined = undefined;
    }

    let classifier = GenreClassifier::from_config(&config.genres);
    let scanner = Scanner::new(&config.scan.extensions);
    let sorter = Sorter::new(classifier, LoftyTagExtractor::new(), scanner);

    if !quiet {
        println!();
        println!("Source: {}", paths.source.display());
        println!("  {} {}", status_label(Bucket::Warm), paths.warm.display());
        println!("  {} {}", status_label(Bucket::Cold), paths.cold.display());
        println!(
            "  {} {}",
            status_label(Bucket::Undefined),
            paths.undefined.display()
        );
        if options.dry_run {
            println!("{}", "(dry run)".yellow());
        }
        println!();
        println!("Scanning for audio files...");
    }

    sorter.prepare(&paths, options)?;
    let files = sorter.collect(&paths)?;

    if !quiet {
        println!("Found {} tracks. Beginning sort...", files.len());
    }

    let pb = create_progress_bar(files.len(), quiet);

    let on_file = |event: &SortEvent<'_>| {
        if !quiet {
            let line = event.log_line_with(status_label(event.bucket));
            write_above_bar(&pb, &mut io::stdout(), &line);
        }
        if let Some(e) = event.error {
            pb.suspend(|| {
                eprintln!(
                    "{} Error copying {}: {}",
                    "[ERROR]".red().bold(),
                    event.file_name,
                    e
                );
            });
        }
        pb.inc(1);
    };

    let report = sorter.sort_files(&files, &paths, options, Some(&on_file));
    pb.finish_and_clear();

    if quiet {
        return Ok(());
    }

    println!();
    println!("Summary:");
    println!("  Scanned: {}", report.scanned);
    for bucket in Bucket::ALL {
        println!("  {}: {}", bucket.label(), report.count(bucket));
    }
    if report.unreadable > 0 {
        println!("  Unreadable tags: {}", report.unreadable);
    }
    if !report.failed.is_empty() {
        println!("  {}: {}", "Failed".red(), report.failed.len());
    }

    println!();
    println!("{}", "Sorting complete.".green());

    Ok(())
}

fn handle_classify(base_dir: &Path, tags: &[String]) -> Result<()> {
    let config = Config::load(base_dir)?;
    let classifier = GenreClassifier::from_config(&config.genres);

    for tag in tags {
        let bucket = classifier.classify(tag);
        println!("{} {}", status_label(bucket), tag);
    }

    Ok(())
}

fn handle_genres(base_dir: &Path, only: Option<GenreList>) -> Result<()> {
    let config = Config::load(base_dir)?;

    let genres = &config.genres;
    let lists = [
        (GenreList::Cold, Bucket::Cold, genres.cold.is_some(), genres.cold_list()),
        (GenreList::Warm, Bucket::Warm, genres.warm.is_some(), genres.warm_list()),
    ];

    for (list, bucket, configured, phrases) in lists {
        if only.is_some_and(|only| only != list) {
            continue;
        }

        let usable = GenreMatcher::compile(&phrases).len();
        let origin = if configured { "config" } else { "builtin" };

        println!();
        println!(
            "{} {} phrases ({})",
            status_label(bucket),
            usable,
            origin.dimmed()
        );
        for phrase in &phrases {
            println!("  {}", phrase);
        }
    }
    println!();

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(SonicSorterError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sonic-sorter")]
#[command(about = "Sort a music library into warm and cold folders by genre tag")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.sonic-sorter)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GenreList {
    Warm,
    Cold,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy every audio file into the warm, cold or undefined folder
    Sort {
        /// Library to scan (overrides paths.source)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Output folder for warm tracks (overrides paths.warm)
        #[arg(long)]
        warm: Option<PathBuf>,

        /// Output folder for cold tracks (overrides paths.cold)
        #[arg(long)]
        cold: Option<PathBuf>,

        /// Output folder for unclassified tracks (overrides paths.undefined)
        #[arg(long)]
        undefined: Option<PathBuf>,

        /// Show what would happen without copying
        #[arg(long)]
        dry_run: bool,
    },

    /// Classify genre strings without touching any files
    Classify {
        /// Genre tags to classify (e.g., "Hip-Hop", "minimal techno")
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Show the effective genre vocabulary
    Genres {
        /// Only show one list
        #[arg(long, value_enum)]
        bucket: Option<GenreList>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., paths.source)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., genres.warm)
        key: String,

        /// Value to set (e.g., "jazz,dream pop" or "[jazz, dream pop]")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}

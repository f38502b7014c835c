use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Collect photo and video files from many folders into one collections folder"
)]
pub struct Cli {
    /// Root folders to search
    pub paths: Vec<PathBuf>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Extensions to collect (e.g., 'jpg' '.png')
    #[arg(long = "ext", num_args = 1..)]
    pub exts: Option<Vec<String>>,

    /// Extensions to leave behind
    #[arg(long = "not-ext", num_args = 1..)]
    pub not_exts: Option<Vec<String>>,

    /// Glob patterns matched against file names (default '*')
    #[arg(long = "pattern", num_args = 1..)]
    pub patterns: Option<Vec<String>>,

    /// Search subfolders too
    #[arg(short, long)]
    pub recursive: bool,

    /// Include hidden files and folders
    #[arg(long)]
    pub hidden: bool,

    /// Descend into symlinked folders when searching subfolders
    #[arg(long)]
    pub follow_links: bool,

    /// With both --ext and --not-ext, keep a file only if it passes both
    #[arg(long)]
    pub intersect: bool,

    /// Folder the collected files are copied into
    #[arg(short = 'o', long)]
    pub collections: Option<PathBuf>,

    /// Empty the collections folder before copying
    #[arg(long)]
    pub clean: bool,

    /// List what would be collected without copying
    #[arg(long)]
    pub dry_run: bool,

    /// Show the content hash of each listed file
    #[arg(long, requires = "dry_run")]
    pub hash: bool,
}

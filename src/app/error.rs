use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Caller-configuration defects. Any of these ends the run before a single
/// directory is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("root path is empty")]
    EmptyRootPath,

    #[error("glob pattern is empty")]
    EmptyPattern,

    #[error("glob pattern '{0}' contains a path separator")]
    PatternSeparator(String),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("extension is empty")]
    EmptyExtension,

    #[error("no preset named '{0}'")]
    UnknownPreset(String),

    #[error("no collections folder given (use --collections or --dry-run)")]
    MissingCollections,

    #[error(
        "collections folder {} overlaps root {}",
        .collections.display(),
        .root.display()
    )]
    CollectionsOverlap { collections: PathBuf, root: PathBuf },

    #[error("failed to read presets from {}: {source}", .path.display())]
    PresetsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse presets in {}: {source}", .path.display())]
    PresetsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

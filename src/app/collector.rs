use crate::app::error::ConfigError;
use crate::app::filter::filter;
use crate::app::models::{CollectorConfig, FileRef};
use crate::app::scanner::{walk_with, WalkOptions};

/// Runs one collection over a validated [`CollectorConfig`].
///
/// Collecting consumes the collector; a new run needs a new one.
#[derive(Debug)]
pub struct Collector {
    config: CollectorConfig,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Walks every root in order, filters each root's files and appends them.
    pub fn collect(self) -> Result<Collection, ConfigError> {
        let config = self.config;
        let options = WalkOptions {
            recursive: config.recursive(),
            include_hidden: config.include_hidden(),
            follow_links: config.follow_links(),
        };

        let mut files = Vec::new();
        for root in config.paths() {
            let candidates = walk_with(root, config.patterns(), options)?;
            let found = candidates.len();
            let kept = filter(
                candidates,
                config.include_exts(),
                config.exclude_exts(),
                config.policy(),
            );
            log::info!(
                "{}: {} files found, {} kept",
                root.display(),
                found,
                kept.len()
            );
            files.extend(kept);
        }

        Ok(Collection { files })
    }
}

/// Shorthand for `Collector::new(config).collect()`.
pub fn collect(config: CollectorConfig) -> Result<Collection, ConfigError> {
    Collector::new(config).collect()
}

/// Files gathered by one run, in root order then pattern order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    files: Vec<FileRef>,
}

impl Collection {
    pub fn files(&self) -> &[FileRef] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRef> {
        self.files.iter()
    }

    pub fn into_files(self) -> Vec<FileRef> {
        self.files
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a FileRef;
    type IntoIter = std::slice::Iter<'a, FileRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

//! Copies a collection into the collections folder.

use crate::app::collector::Collection;
use crate::app::models::FileRef;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Creates `path` and its parents. With `clean`, an existing directory is
/// removed with all of its contents first.
pub fn ensure_directory(path: &Path, clean: bool) -> io::Result<()> {
    if clean && path.is_dir() {
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)
}

/// Outcome of [`store`]. Failed copies do not stop the run.
#[derive(Debug, Default)]
pub struct StoreReport {
    pub copied: Vec<PathBuf>,
    /// Source paths listed more than once in the collection; copied only the first time.
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, io::Error)>,
}

impl StoreReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Copies every file of `collection` into `target` by base name.
///
/// A name already taken in `target` gets a ` (n)` suffix before its extension.
pub fn store(collection: &Collection, target: &Path) -> Result<StoreReport> {
    ensure_directory(target, false)
        .with_context(|| format!("Failed to create collections folder {}", target.display()))?;

    let mut report = StoreReport::default();
    let mut sources = HashSet::new();

    for file in collection {
        if !sources.insert(file.path().to_path_buf()) {
            log::debug!("{} already stored in this run", file.path().display());
            report.skipped.push(file.path().to_path_buf());
            continue;
        }

        let dest = free_destination(target, file);
        match fs::copy(file.path(), &dest) {
            Ok(_) => {
                log::debug!("Copied {} to {}", file.path().display(), dest.display());
                report.copied.push(dest);
            }
            Err(err) => {
                log::error!("Copy {} to {} -- {}", file.name(), target.display(), err);
                report.failed.push((file.path().to_path_buf(), err));
            }
        }
    }

    Ok(report)
}

fn free_destination(target: &Path, file: &FileRef) -> PathBuf {
    let mut dest = target.join(file.name());
    let mut n = 1;
    while dest.exists() {
        dest = target.join(format!("{} ({}){}", file.stem(), n, file.extension()));
        n += 1;
    }
    dest
}

use crate::app::error::ConfigError;
use crate::app::models::FileRef;
use globset::{GlobBuilder, GlobMatcher};
use ignore::{DirEntry, WalkBuilder};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Match at every depth below the root instead of direct children only.
    pub recursive: bool,
    /// Consider names starting with `.` for every pattern, and descend into such directories.
    pub include_hidden: bool,
    /// Descend into symlinked directories when walking recursively.
    pub follow_links: bool,
}

/// Expands `patterns` under `root` and returns the regular files found.
///
/// Results are concatenated pattern by pattern, so a file matched by two
/// patterns is returned twice. A root that does not exist yields nothing.
pub fn walk(root: &Path, patterns: &[String], recursive: bool) -> Result<Vec<FileRef>, ConfigError> {
    walk_with(
        root,
        patterns,
        WalkOptions {
            recursive,
            ..WalkOptions::default()
        },
    )
}

pub fn walk_with(
    root: &Path,
    patterns: &[String],
    options: WalkOptions,
) -> Result<Vec<FileRef>, ConfigError> {
    if root.as_os_str().is_empty() {
        return Err(ConfigError::EmptyRootPath);
    }
    let matchers = patterns
        .iter()
        .map(|p| compile_pattern(p))
        .collect::<Result<Vec<_>, _>>()?;

    if !root.exists() {
        log::debug!("Root {} does not exist, nothing to match", root.display());
        return Ok(Vec::new());
    }

    let scanner = Scanner { root, options };
    let candidates = scanner.scan();
    let mut files = Vec::new();
    for matcher in &matchers {
        let found: Vec<FileRef> = candidates
            .iter()
            .filter_map(|candidate| scanner.process_entry(candidate, matcher))
            .collect();
        log::debug!(
            "Pattern '{}' matched {} files under {}",
            matcher.glob(),
            found.len(),
            root.display()
        );
        files.extend(found);
    }
    Ok(files)
}

/// Compiles one pattern, matched against a single file name.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher, ConfigError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map_or(false, |n| n.starts_with('.'))
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().map_or(false, |t| t.is_dir())
}

/// An entry below the root, found once and matched against every pattern.
struct Candidate {
    path: PathBuf,
    hidden: bool,
}

struct Scanner<'a> {
    root: &'a Path,
    options: WalkOptions,
}

impl Scanner<'_> {
    /// Lists every entry below the root, one directory at a time: a folder's
    /// own entries come before those of its subfolders.
    fn scan(&self) -> Vec<Candidate> {
        let include_hidden = self.options.include_hidden;

        // No ignore files: every entry under the root is a candidate.
        let walker = WalkBuilder::new(self.root)
            .standard_filters(false)
            .follow_links(self.options.follow_links)
            .max_depth(if self.options.recursive { None } else { Some(1) })
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                include_hidden || entry.depth() == 0 || !is_dir(entry) || !is_hidden(entry.file_name())
            })
            .build();

        // Directories in the order the walk reached them; the root is 0.
        let mut dir_order: HashMap<PathBuf, usize> = HashMap::new();
        let mut entries = Vec::new();

        for result in walker {
            match result {
                Ok(entry) => {
                    let next = dir_order.len();
                    if entry.depth() == 0 || is_dir(&entry) {
                        dir_order.entry(entry.path().to_path_buf()).or_insert(next);
                    }
                    if entry.depth() == 0 {
                        continue;
                    }
                    let parent = entry
                        .path()
                        .parent()
                        .and_then(|p| dir_order.get(p))
                        .copied()
                        .unwrap_or(usize::MAX);
                    entries.push((
                        parent,
                        Candidate {
                            path: entry.path().to_path_buf(),
                            hidden: is_hidden(entry.file_name()),
                        },
                    ));
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        // Stable, so names stay sorted within each directory.
        entries.sort_by_key(|(parent, _)| *parent);
        entries.into_iter().map(|(_, candidate)| candidate).collect()
    }

    fn process_entry(&self, candidate: &Candidate, matcher: &GlobMatcher) -> Option<FileRef> {
        // Like shell globbing, only a pattern that itself starts with `.` sees hidden names.
        if candidate.hidden && !self.options.include_hidden && !matcher.glob().glob().starts_with('.') {
            return None;
        }

        let name = candidate.path.file_name()?;
        if !matcher.is_match(Path::new(name)) {
            return None;
        }

        let file = FileRef::new(&candidate.path);
        if !file.is_file() {
            log::trace!("Skipping {} ({:?})", candidate.path.display(), file.kind());
            return None;
        }
        Some(file)
    }
}

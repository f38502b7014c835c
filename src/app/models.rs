use crate::app::error::ConfigError;
use crate::app::filter::FilterPolicy;
use std::cell::OnceCell;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Pattern used when no patterns are configured.
pub const MATCH_ALL: &str = "*";

/// A set of normalized extensions, each stored with its leading dot.
///
/// Case is kept exactly as supplied, so `.JPG` and `.jpg` are distinct members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtSet(HashSet<String>);

impl ExtSet {
    pub fn new<I, S>(exts: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        exts.into_iter()
            .map(|ext| normalize_ext(ext.as_ref()))
            .collect::<Result<HashSet<_>, _>>()
            .map(Self)
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.0.contains(ext)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `jpg` becomes `.jpg`; `.jpg` is left alone.
pub fn normalize_ext(ext: &str) -> Result<String, ConfigError> {
    match ext {
        "" | "." => Err(ConfigError::EmptyExtension),
        e if e.starts_with('.') => Ok(e.to_string()),
        e => Ok(format!(".{}", e)),
    }
}

/// Validated settings for one collection run.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    paths: Vec<PathBuf>,
    patterns: Vec<String>,
    include_exts: Option<ExtSet>,
    exclude_exts: Option<ExtSet>,
    recursive: bool,
    include_hidden: bool,
    follow_links: bool,
    policy: FilterPolicy,
}

impl CollectorConfig {
    pub fn builder() -> CollectorConfigBuilder {
        CollectorConfigBuilder::default()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn include_exts(&self) -> Option<&ExtSet> {
        self.include_exts.as_ref()
    }

    pub fn exclude_exts(&self) -> Option<&ExtSet> {
        self.exclude_exts.as_ref()
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    pub fn follow_links(&self) -> bool {
        self.follow_links
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }
}

#[derive(Debug, Default)]
pub struct CollectorConfigBuilder {
    paths: Vec<PathBuf>,
    patterns: Vec<String>,
    include_exts: Option<Vec<String>>,
    exclude_exts: Option<Vec<String>>,
    recursive: bool,
    include_hidden: bool,
    follow_links: bool,
    policy: FilterPolicy,
}

impl CollectorConfigBuilder {
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn include_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_exts = Some(exts.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_exts = Some(exts.into_iter().map(Into::into).collect());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn policy(mut self, policy: FilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<CollectorConfig, ConfigError> {
        if self.paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::EmptyRootPath);
        }

        let patterns = if self.patterns.is_empty() {
            vec![MATCH_ALL.to_string()]
        } else {
            self.patterns
        };
        for pattern in &patterns {
            validate_pattern(pattern)?;
        }

        Ok(CollectorConfig {
            paths: self.paths,
            patterns,
            include_exts: self.include_exts.map(ExtSet::new).transpose()?,
            exclude_exts: self.exclude_exts.map(ExtSet::new).transpose()?,
            recursive: self.recursive,
            include_hidden: self.include_hidden,
            follow_links: self.follow_links,
            policy: self.policy,
        })
    }
}

/// Patterns select entries inside a single directory level, so separators are rejected.
pub fn validate_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::EmptyPattern);
    }
    if pattern.contains(['/', MAIN_SEPARATOR]) {
        return Err(ConfigError::PatternSeparator(pattern.to_string()));
    }
    crate::app::scanner::compile_pattern(pattern).map(|_| ())
}

/// What a path pointed at when its [`FileRef`] was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Other,
    Nonexistent,
}

/// A single filesystem entry with its kind captured at construction time.
///
/// The kind is a snapshot: it never changes for the lifetime of the value,
/// even if the file is removed afterwards.
#[derive(Debug, Clone)]
pub struct FileRef {
    path: PathBuf,
    name: String,
    extension: String,
    kind: FileKind,
    hash: OnceCell<String>,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = Path::new(&name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let kind = resolve_kind(&path);

        Self {
            path,
            name,
            extension,
            kind,
            hash: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base name without the extension.
    pub fn stem(&self) -> &str {
        &self.name[..self.name.len() - self.extension.len()]
    }

    /// Extension with its leading dot, or an empty string.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn exists(&self) -> bool {
        self.kind != FileKind::Nonexistent
    }

    /// BLAKE3 hex digest of the file content, computed on first use.
    pub fn content_hash(&self) -> io::Result<&str> {
        if let Some(hash) = self.hash.get() {
            return Ok(hash.as_str());
        }
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut hasher = blake3::Hasher::new();
        io::copy(&mut reader, &mut hasher)?;
        let hash = hasher.finalize().to_hex().to_string();
        Ok(self.hash.get_or_init(|| hash).as_str())
    }
}

// Follows symlinks; anything we cannot stat counts as missing.
fn resolve_kind(path: &Path) -> FileKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => FileKind::File,
        Ok(meta) if meta.is_dir() => FileKind::Directory,
        Ok(_) => FileKind::Other,
        Err(_) => FileKind::Nonexistent,
    }
}

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub collector: CollectorConfig,
    pub output: OutputMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// List what would be collected without copying anything.
    DryRun { show_hash: bool },
    /// Copy the collection into `collections`, optionally wiping it first.
    Store { collections: PathBuf, clean: bool },
}

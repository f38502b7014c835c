use crate::app::cli::Cli;
use crate::app::error::ConfigError;
use crate::app::filter::FilterPolicy;
use crate::app::models::{CollectorConfig, OutputMode, RuntimeConfig};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};

/// A preset value written either as a single item or as a list.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PresetConfig {
    pub paths: Option<OneOrMany<PathBuf>>,
    pub exts: Option<OneOrMany<String>>,
    pub not_exts: Option<OneOrMany<String>>,
    pub patterns: Option<OneOrMany<String>>,
    pub recursive: Option<bool>,
    pub hidden: Option<bool>,
    pub follow_links: Option<bool>,
    pub intersect: Option<bool>,
    pub collections: Option<PathBuf>,
}

/// `~/.config/photo_collector/presets.toml`, if a home directory is known.
pub fn presets_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("photo_collector")
            .join("presets.toml")
    })
}

/// Loads presets from `path`. A missing file means no presets.
pub fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>, ConfigError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::PresetsRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_presets(&content).map_err(|source| ConfigError::PresetsParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>, toml::de::Error> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

fn merge_vecs<T>(preset_vec: Option<OneOrMany<T>>, cli_vec: Option<Vec<T>>) -> Option<Vec<T>>
where
    T: Eq + Hash + Clone,
{
    if preset_vec.is_none() && cli_vec.is_none() {
        return None;
    }
    let mut combined: Vec<T> = preset_vec.map(Into::into).unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    Some(combined)
}

/// Merges the command line over the chosen preset and validates the result.
///
/// The preset is picked by `--preset`, falling back to `project_name` (the
/// current folder name). Only an explicitly named preset must exist.
pub fn resolve_config(
    cli: Cli,
    presets: &HashMap<String, PresetConfig>,
    project_name: Option<&str>,
) -> Result<RuntimeConfig, ConfigError> {
    let preset = match cli.preset.as_deref() {
        Some(name) => presets
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?,
        None => project_name
            .and_then(|k| presets.get(k))
            .cloned()
            .unwrap_or_default(),
    };

    let cli_paths = (!cli.paths.is_empty()).then_some(cli.paths);
    let paths = merge_vecs(preset.paths, cli_paths).unwrap_or_default();

    let policy = if cli.intersect || preset.intersect.unwrap_or(false) {
        FilterPolicy::Intersection
    } else {
        FilterPolicy::Union
    };

    let mut builder = CollectorConfig::builder()
        .paths(paths)
        .patterns(merge_vecs(preset.patterns, cli.patterns).unwrap_or_default())
        .recursive(cli.recursive || preset.recursive.unwrap_or(false))
        .include_hidden(cli.hidden || preset.hidden.unwrap_or(false))
        .follow_links(cli.follow_links || preset.follow_links.unwrap_or(false))
        .policy(policy);
    if let Some(exts) = merge_vecs(preset.exts, cli.exts) {
        builder = builder.include_exts(exts);
    }
    if let Some(not_exts) = merge_vecs(preset.not_exts, cli.not_exts) {
        builder = builder.exclude_exts(not_exts);
    }
    let collector = builder.build()?;

    let output = if cli.dry_run {
        OutputMode::DryRun {
            show_hash: cli.hash,
        }
    } else {
        let collections = cli
            .collections
            .or(preset.collections)
            .ok_or(ConfigError::MissingCollections)?;
        check_overlap(&collections, collector.paths())?;
        OutputMode::Store {
            collections,
            clean: cli.clean,
        }
    };

    Ok(RuntimeConfig { collector, output })
}

/// The collections folder may not be a root, hold a root, or sit inside one.
fn check_overlap(collections: &Path, roots: &[PathBuf]) -> Result<(), ConfigError> {
    let target = comparable(collections);
    for root in roots {
        let root_path = comparable(root);
        if target.starts_with(&root_path) || root_path.starts_with(&target) {
            return Err(ConfigError::CollectionsOverlap {
                collections: collections.to_path_buf(),
                root: root.clone(),
            });
        }
    }
    Ok(())
}

// Canonicalizes the longest existing prefix, so a folder that does not exist
// yet still compares equal through symlinked parents.
fn comparable(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = fs::canonicalize(existing) {
            return rest.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name);
                existing = parent;
            }
            _ => return absolute.clone(),
        }
    }
}

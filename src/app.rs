// Declare modules
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod models;
pub mod scanner;
pub mod store;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::env;

use self::cli::Cli;
use self::collector::Collector;
use self::config::{load_presets_file, presets_path, resolve_config};
use self::formatter::OutputGenerator;
use self::models::OutputMode;
use self::store::{ensure_directory, store};

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify the working folder; its name doubles as the default preset
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());

    // 3. Resolve Configuration
    let presets = match presets_path() {
        Some(path) => load_presets_file(&path)?,
        None => HashMap::new(),
    };
    let config = resolve_config(args, &presets, project_name)?;

    if config.collector.paths().is_empty() {
        log::warn!("💡 Tip: No root paths provided (via CLI or presets).");
    }

    // 4. Empty the collections folder before anything is read from the roots
    if let OutputMode::Store {
        collections,
        clean: true,
    } = &config.output
    {
        ensure_directory(collections, true).with_context(|| {
            format!("Failed to clean collections folder {}", collections.display())
        })?;
    }

    // 5. Collect
    let collection = Collector::new(config.collector).collect()?;

    if collection.is_empty() {
        log::warn!("⚠️ No files found for the specified criteria.");
        return Ok(());
    }

    // 6. List or store
    match config.output {
        OutputMode::DryRun { show_hash } => {
            println!(
                "{}",
                OutputGenerator::generate_listing(&collection, &current_dir, show_hash)
            );
            println!("{}", OutputGenerator::generate_summary(&collection));
        }
        OutputMode::Store { collections, .. } => {
            let report = store(&collection, &collections)?;
            println!("{}", OutputGenerator::generate_summary(&collection));
            println!("{}", OutputGenerator::format_store_report(&report, &collections));
        }
    }

    Ok(())
}

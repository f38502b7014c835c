//! Collects photo and video files scattered across many folders into a single
//! "collections" folder.
//!
//! The interesting part lives in [`app::collector`]: roots are walked with glob
//! patterns, narrowed to regular files and filtered by extension.

pub mod app;

pub use app::collector::{collect, Collection, Collector};
pub use app::error::ConfigError;
pub use app::filter::{filter, FilterPolicy};
pub use app::models::{CollectorConfig, CollectorConfigBuilder, ExtSet, FileKind, FileRef};
pub use app::scanner::{walk, walk_with, WalkOptions};
pub use app::store::{ensure_directory, store, StoreReport};

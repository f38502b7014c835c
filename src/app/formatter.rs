use crate::app::collector::Collection;
use crate::app::store::StoreReport;
use pathdiff::diff_paths;
use std::collections::BTreeMap;
use std::path::Path;

pub struct OutputGenerator;

impl OutputGenerator {
    /// One line per collected file, relative to `base` where possible.
    pub fn generate_listing(collection: &Collection, base: &Path, show_hash: bool) -> String {
        let mut output = String::new();

        for file in collection {
            let shown = diff_paths(file.path(), base).unwrap_or_else(|| file.path().to_path_buf());
            if show_hash {
                let hash = match file.content_hash() {
                    Ok(hash) => hash.to_string(),
                    Err(e) => {
                        log::warn!("Cannot hash {}: {}", file.path().display(), e);
                        "?".repeat(64)
                    }
                };
                output.push_str(&format!("{}  {}\n", hash, shown.display()));
            } else {
                output.push_str(&format!("{}\n", shown.display()));
            }
        }

        output.trim_end().to_string()
    }

    /// e.g. `Collected 5 files (.jpg: 3, .png: 2)`
    pub fn generate_summary(collection: &Collection) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for file in collection {
            let ext = match file.extension() {
                "" => "(none)",
                ext => ext,
            };
            *counts.entry(ext).or_default() += 1;
        }

        let noun = if collection.len() == 1 { "file" } else { "files" };
        if counts.is_empty() {
            return format!("Collected 0 {}", noun);
        }
        let breakdown: Vec<String> = counts
            .iter()
            .map(|(ext, n)| format!("{}: {}", ext, n))
            .collect();
        format!(
            "Collected {} {} ({})",
            collection.len(),
            noun,
            breakdown.join(", ")
        )
    }

    pub fn format_store_report(report: &StoreReport, target: &Path) -> String {
        let mut out = format!("Stored {} files in {}", report.copied.len(), target.display());
        if !report.skipped.is_empty() {
            out.push_str(&format!(", {} repeated entries skipped", report.skipped.len()));
        }
        if !report.failed.is_empty() {
            out.push_str(&format!("\n{} files could not be copied:", report.failed.len()));
            for (path, err) in &report.failed {
                out.push_str(&format!("\n    {}: {}", path.display(), err));
            }
        }
        out
    }
}

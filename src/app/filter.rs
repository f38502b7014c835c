//! Extension filtering of walked files.

use crate::app::models::{ExtSet, FileRef};

/// How an include set and an exclude set combine when both are given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Two independent passes over the candidates: first everything whose
    /// extension is included, then everything whose extension is not excluded.
    /// A file passing both tests is emitted twice.
    #[default]
    Union,
    /// Keep a file once iff it is included and not excluded.
    Intersection,
}

/// Narrows `files` by extension.
///
/// `None` means "no filter"; an empty set is a real filter. An empty include
/// set keeps nothing and an empty exclude set keeps everything.
pub fn filter(
    files: Vec<FileRef>,
    include: Option<&ExtSet>,
    exclude: Option<&ExtSet>,
    policy: FilterPolicy,
) -> Vec<FileRef> {
    match (include, exclude) {
        (None, None) => files,
        (Some(inc), None) => files
            .into_iter()
            .filter(|f| inc.contains(f.extension()))
            .collect(),
        (None, Some(exc)) => files
            .into_iter()
            .filter(|f| !exc.contains(f.extension()))
            .collect(),
        (Some(inc), Some(exc)) => match policy {
            FilterPolicy::Union => {
                let mut kept: Vec<FileRef> = files
                    .iter()
                    .filter(|f| inc.contains(f.extension()))
                    .cloned()
                    .collect();
                kept.extend(files.into_iter().filter(|f| !exc.contains(f.extension())));
                kept
            }
            FilterPolicy::Intersection => files
                .into_iter()
                .filter(|f| inc.contains(f.extension()) && !exc.contains(f.extension()))
                .collect(),
        },
    }
}

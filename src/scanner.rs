use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Directory names pruned from every walk, at any depth.
pub const DEFAULT_EXCLUDES: [&str; 5] = [".git", ".vscode", ".rulescan", "node_modules", "target"];

/// Every regular file under `root`, skipping directories whose basename is in
/// `excludes` (exact, case-sensitive). An enumeration failure aborts the walk.
/// Ordering follows directory order and is not specified.
pub fn walk_files(root: &Path, excludes: &HashSet<String>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || entry
                .file_name()
                .to_str()
                .map_or(true, |name| !excludes.contains(name))
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// How a walked file is routed to detectors, by lowercased basename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Manifest,
    Dockerfile,
    Other,
}

pub fn classify(path: &Path) -> FileKind {
    let basename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_ascii_lowercase())
        .unwrap_or_default();

    match basename.as_str() {
        "package.json" => FileKind::Manifest,
        "dockerfile" => FileKind::Dockerfile,
        _ => FileKind::Other,
    }
}

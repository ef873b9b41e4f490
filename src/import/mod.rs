use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use log::{info, warn};
use walkdir::{DirEntry, WalkDir};

/// Expand the given inputs into the list of CSV files to load.
/// Directories are scanned recursively, identical files are loaded once,
/// and `exclude` (typically the output of the current run) is never loaded.
pub(crate) fn collect_input_files(inputs: &[PathBuf], exclude: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
    let mut candidates = vec![];
    for input in inputs {
        if input.is_dir() {
            candidates.extend(scan_files(input)?);
        } else if input.is_file() {
            candidates.push(input.clone());
        } else {
            bail!("{} does not exist", input.display());
        }
    }

    let excluded = exclude.and_then(|p| p.canonicalize().ok());
    let mut seen_paths = HashSet::new();
    let mut seen_digests = HashSet::new();
    let mut files = vec![];
    for path in candidates {
        let canonical = path.canonicalize().with_context(|| format!("Unable to resolve {}", path.display()))?;
        if excluded.as_ref() == Some(&canonical) {
            info!("Skipping {}, it is the output file", path.display());
            continue;
        }
        if !seen_paths.insert(canonical) {
            continue;
        }

        let content = fs::read(&path).with_context(|| format!("Unable to read {}", path.display()))?;
        let digest = md5::compute(content);
        if !seen_digests.insert(digest.0) {
            warn!("Skipping {}, same content as a file already loaded", path.display());
            continue;
        }
        files.push(path);
    }

    if files.is_empty() {
        bail!("No timesheet files found");
    }
    Ok(files)
}

/// Scan a dir recursively and list all timesheet CSV files
pub(crate) fn scan_files(root_path: &Path) -> anyhow::Result<BTreeSet<PathBuf>> {
    info!("Scanning files in {}", root_path.display());

    let mut files = BTreeSet::new();
    let walker = WalkDir::new(root_path).into_iter();
    for entry in walker.filter_entry(|e| !is_hidden(e)) {
        let dir_entry = entry.with_context(|| format!("Unable to scan {}", root_path.display()))?;
        // Ignore symlinks
        if dir_entry.path_is_symlink() {
            continue;
        }
        if !dir_entry.file_type().is_file() {
            continue;
        }

        let path = dir_entry.path();
        let is_csv = path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            files.insert(path.to_path_buf());
        }
    }

    Ok(files)
}

/// The scan root itself is never treated as hidden, so `.` can be scanned
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

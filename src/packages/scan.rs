//! Package-loading statement extraction from R Markdown documents

use crate::config::PackagesConfig;
use crate::structs::{CcError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Statement prefixes that load a package
const LOADERS: [&str; 2] = ["library", "require"];

/// Package names found in one scan
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub documents: Vec<PathBuf>,
    /// Names in encounter order, duplicates included
    pub packages: Vec<String>,
}

/// Extract the package name from one line, if it is a loading statement
///
/// Only lines that start with a loader in column 0 count; indented calls
/// inside functions are ignored.
///
/// # Errors
/// Returns `Parse` if the line starts with a loader but has no `(`
pub fn package_from_line(line: &str, source: &str, line_no: usize) -> Result<Option<String>> {
    if !LOADERS.iter().any(|loader| line.starts_with(loader)) {
        return Ok(None);
    }

    let argument = line.trim().split('(').nth(1).ok_or_else(|| {
        CcError::Parse(format!(
            "{source}:{line_no}: loading statement without '(': {:?}",
            line.trim()
        ))
    })?;

    Ok(Some(argument.replace(')', "")))
}

/// Scan all matching documents in `dir`, in file-name order
///
/// # Errors
/// Returns error if the directory or a document cannot be read, or a
/// loading statement is malformed
pub fn scan_documents(dir: &Path, extension: &str) -> Result<ScanResult> {
    if !dir.is_dir() {
        return Err(CcError::Empty(format!(
            "document directory not found: {}",
            dir.display()
        )));
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden || !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            documents.push(path);
        }
    }
    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut packages = Vec::new();
    for path in &documents {
        let content = fs::read_to_string(path)?;
        let source = path.display().to_string();
        let before = packages.len();

        for (i, line) in content.lines().enumerate() {
            if let Some(name) = package_from_line(line, &source, i + 1)? {
                packages.push(name);
            }
        }
        tracing::debug!("{source}: {} loading statements", packages.len() - before);
    }

    tracing::info!(
        "found {} loading statements in {} documents",
        packages.len(),
        documents.len()
    );
    Ok(ScanResult {
        documents,
        packages,
    })
}

/// Combine scanned names with the configured seed, append and exclude lists
///
/// The result is de-duplicated and sorted.
#[must_use]
pub fn assemble_packages(found: &[String], config: &PackagesConfig) -> Vec<String> {
    let mut set: BTreeSet<String> = config.seed.iter().cloned().collect();
    set.extend(found.iter().cloned());
    set.extend(config.append.iter().cloned());

    for excluded in &config.exclude {
        set.remove(excluded);
    }

    set.into_iter().collect()
}

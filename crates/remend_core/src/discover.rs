//! Candidate source file discovery.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{EngineConfig, EngineError};

/// Walks a repository tree and yields readable source files.
pub struct FileDiscoverer {
    extensions: HashSet<String>,
    ignore_dirs: HashSet<String>,
    include_globs: Option<GlobSet>,
    exclude_globs: Option<GlobSet>,
}

impl FileDiscoverer {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            extensions: config.extensions.iter().cloned().collect(),
            ignore_dirs: config.ignore_dirs.iter().cloned().collect(),
            include_globs: Self::build_globset(&config.include)?,
            exclude_globs: Self::build_globset(&config.exclude)?,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, EngineError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| EngineError::config(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| EngineError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Checks if a path should be skipped based on include/exclude patterns.
    fn should_ignore(&self, path: &Path) -> bool {
        if self
            .exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
        {
            return true;
        }

        if self
            .include_globs
            .as_ref()
            .is_some_and(|includes| !includes.is_match(path))
        {
            return true;
        }

        false
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(ext))
    }

    /// Probe that the file is openable and a byte can be read. Decoding
    /// errors are tolerated later by lossy reads, not by exclusion here.
    fn is_readable(path: &Path) -> bool {
        let mut buf = [0u8; 1];
        match std::fs::File::open(path) {
            Ok(mut file) => matches!(file.read(&mut buf), Ok(_)),
            Err(_) => false,
        }
    }

    /// Recursively discovers candidate files under `root`, pruning ignored
    /// directories. An unlistable root yields an empty sequence.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let pruned = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.ignore_dirs.contains(name));
                if pruned {
                    debug!("Pruning directory {}", entry.path().display());
                }
                !pruned
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.has_source_extension(path))
            .filter(|path| {
                let relative = path.strip_prefix(root).unwrap_or(path);
                !self.should_ignore(relative)
            })
            .filter(|path| Self::is_readable(path))
            .collect();

        files.sort();
        info!("Discovered {} candidate files", files.len());
        files
    }
}

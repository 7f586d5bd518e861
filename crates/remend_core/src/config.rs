//! Engine configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Configuration for the fix engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of detect/fix/verify iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Timeout for external verification commands, in seconds.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// File extensions considered source code.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names pruned during discovery.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,

    /// Glob patterns to include.
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_max_iterations() -> usize {
    5
}

fn default_command_timeout_secs() -> u64 {
    120
}

fn default_extensions() -> Vec<String> {
    ["py", "js", "ts", "jsx", "tsx", "java", "go", "rs", "c", "cpp", "h"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_ignore_dirs() -> Vec<String> {
    [
        "node_modules",
        ".git",
        "__pycache__",
        "venv",
        ".venv",
        "dist",
        "build",
        ".idea",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            command_timeout_secs: default_command_timeout_secs(),
            extensions: default_extensions(),
            ignore_dirs: default_ignore_dirs(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| EngineError::file(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| EngineError::config(format!("Invalid config {}: {}", path.display(), e)))
    }
}

//! Fix application.
//!
//! Rewrites exactly one line of one file. The write goes through a sibling
//! temp file and a rename, so the file on disk is always either the full
//! original content or the full new content, never a truncated mix.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::fix::{FixAction, GeneratedFix};
use crate::report::Finding;
use crate::EngineError;

/// Applies a generated fix to the file named by the finding, resolved
/// against `root`. All other lines are preserved verbatim, including their
/// line endings.
pub fn apply_fix(root: &Path, finding: &Finding, fix: &GeneratedFix) -> Result<(), EngineError> {
    let replacement = match &fix.action {
        FixAction::Delete => String::new(),
        FixAction::Replace(text) => text.clone(),
        FixAction::Keep => return Ok(()),
    };

    let path = root.join(&finding.file);
    let bytes = fs::read(&path)
        .map_err(|e| EngineError::file(format!("Failed to read {}: {}", path.display(), e)))?;
    let content = String::from_utf8_lossy(&bytes);

    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let index = finding.line.checked_sub(1).ok_or_else(|| {
        EngineError::file(format!("Invalid line number 0 in {}", finding.file.display()))
    })?;
    if index >= lines.len() {
        return Err(EngineError::file(format!(
            "Line {} out of range for {} ({} lines)",
            finding.line,
            finding.file.display(),
            lines.len()
        )));
    }

    let mut rewritten = String::with_capacity(content.len() + replacement.len() + 1);
    for (i, line) in lines.iter().enumerate() {
        if i == index {
            // A deleted line stays in the sequence as a blank line.
            rewritten.push_str(&replacement);
            rewritten.push('\n');
        } else {
            rewritten.push_str(line);
        }
    }

    let permissions = fs::metadata(&path)
        .map_err(|e| EngineError::file(format!("Failed to stat {}: {}", path.display(), e)))?
        .permissions();

    let parent = path.parent().unwrap_or(root);
    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| EngineError::file(format!("Failed to stage rewrite: {}", e)))?;
    temp.write_all(rewritten.as_bytes())
        .map_err(|e| EngineError::file(format!("Failed to stage rewrite: {}", e)))?;
    // The temp file is created with restrictive permissions; the rewritten
    // file must keep the original's (e.g. an executable script's exec bit).
    temp.as_file()
        .set_permissions(permissions)
        .map_err(|e| EngineError::file(format!("Failed to stage rewrite: {}", e)))?;
    temp.persist(&path)
        .map_err(|e| EngineError::file(format!("Failed to write {}: {}", path.display(), e)))?;

    debug!(
        "Rewrote {} line {} ({})",
        finding.file.display(),
        finding.line,
        fix.detail
    );
    Ok(())
}

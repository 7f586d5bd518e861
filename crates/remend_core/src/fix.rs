//! Fix generation.
//!
//! A fix is pure data: what to do to the offending line, plus a human
//! description of the remediation. The same finding always yields the same
//! fix.

use crate::report::{Category, Finding};

/// What to do to the offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixAction {
    /// Blank the line (the physical line remains, empty).
    Delete,
    /// Replace the line with the given text.
    Replace(String),
    /// Leave the line untouched; a human needs to look at it.
    Keep,
}

/// A generated remediation for one finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFix {
    pub action: FixAction,
    pub detail: String,
}

/// Maps a finding to its deterministic textual remediation.
pub fn generate_fix(finding: &Finding) -> GeneratedFix {
    match finding.category {
        Category::Linting => GeneratedFix {
            action: FixAction::Delete,
            detail: format!("remove the {}", finding.description.to_lowercase()),
        },
        Category::Syntax => GeneratedFix {
            action: FixAction::Replace(format!("{}:", finding.content)),
            detail: "add the colon at the correct position".to_string(),
        },
        Category::Indentation => GeneratedFix {
            action: FixAction::Replace(finding.content.replace('\t', "    ")),
            detail: "replace tabs with 4 spaces".to_string(),
        },
        Category::Import => GeneratedFix {
            action: FixAction::Delete,
            detail: "remove incomplete import".to_string(),
        },
        Category::TypeError => GeneratedFix {
            action: FixAction::Keep,
            detail: "manual review required".to_string(),
        },
    }
}

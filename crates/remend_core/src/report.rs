//! Report types produced by the fix engine.
//!
//! `Finding` is transient (one scan pass); `FixRecord` and `VerificationRun`
//! accumulate across iterations; `ExecutionResult` is the final immutable
//! summary handed back to the caller for serialization.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Category of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "SYNTAX")]
    Syntax,
    #[serde(rename = "LINTING")]
    Linting,
    #[serde(rename = "TYPE_ERROR")]
    TypeError,
    #[serde(rename = "INDENTATION")]
    Indentation,
    #[serde(rename = "IMPORT")]
    Import,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Syntax => "SYNTAX",
            Category::Linting => "LINTING",
            Category::TypeError => "TYPE_ERROR",
            Category::Indentation => "INDENTATION",
            Category::Import => "IMPORT",
        };
        f.write_str(s)
    }
}

/// A single detected issue at a specific file/line/category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Path relative to the repository root.
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// Trimmed source text at that line.
    pub content: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub description: String,
    /// Identifier of the matching rule.
    pub pattern: String,
}

/// De-duplication key: no two findings in one scan pass share this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FindingKey {
    pub file: PathBuf,
    pub line: usize,
    pub category: Category,
}

impl Finding {
    pub fn key(&self) -> FindingKey {
        FindingKey {
            file: self.file.clone(),
            line: self.line,
            category: self.category,
        }
    }
}

/// Outcome of one fix application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixStatus {
    Fixed,
    Failed,
}

/// One generated-and-applied (or attempted) remediation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixRecord {
    pub file: PathBuf,
    #[serde(rename = "bug_type")]
    pub category: Category,
    #[serde(rename = "line_number")]
    pub line: usize,
    /// Original trimmed line content.
    pub content: String,
    pub commit_message: String,
    pub status: FixStatus,
    #[serde(rename = "fix_detail")]
    pub detail: String,
}

impl FixRecord {
    /// Builds the record for a finding, with the commit-style message
    /// derived from the file basename and line number.
    pub fn new(finding: &Finding, detail: impl Into<String>, applied: bool) -> Self {
        let basename = finding
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| finding.file.display().to_string());
        Self {
            file: finding.file.clone(),
            category: finding.category,
            line: finding.line,
            content: finding.content.clone(),
            commit_message: format!(
                "[AI-AGENT] Fix {} in {} line {}",
                finding.category, basename, finding.line
            ),
            status: if applied {
                FixStatus::Fixed
            } else {
                FixStatus::Failed
            },
            detail: detail.into(),
        }
    }
}

/// Status of one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "PASSED")]
    Passed,
    #[serde(rename = "FAILED")]
    Failed,
}

/// One invocation of the repository's test/compile check and its outcome.
///
/// Created with status `Running` at the start of an iteration and mutated in
/// place as the iteration progresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRun {
    /// 1-based iteration counter.
    pub iteration: usize,
    pub status: RunStatus,
    pub timestamp: String,
    pub tests_passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub errors: Vec<String>,
}

impl VerificationRun {
    /// Starts a run record for the given iteration, stamped now.
    pub fn started(iteration: usize) -> Self {
        Self {
            iteration,
            status: RunStatus::Running,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            tests_passed: false,
            output: None,
            errors: Vec::new(),
        }
    }

    pub fn mark_passed(&mut self, output: impl Into<String>) {
        self.status = RunStatus::Passed;
        self.tests_passed = true;
        self.output = Some(output.into());
    }

    pub fn mark_failed(&mut self, output: impl Into<String>) {
        self.status = RunStatus::Failed;
        self.tests_passed = false;
        self.errors.push(output.into());
    }
}

/// Final summary of one `execute` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub total_iterations: usize,
    pub fixes: Vec<FixRecord>,
    #[serde(rename = "cicd_runs")]
    pub verification_runs: Vec<VerificationRun>,
    #[serde(rename = "unique_bugs")]
    pub unique_finding_count: usize,
}

//! The bounded detect→fix→verify loop.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::applier::apply_fix;
use crate::discover::FileDiscoverer;
use crate::fix::generate_fix;
use crate::report::{ExecutionResult, Finding, FindingKey, FixRecord, VerificationRun};
use crate::rules::RuleSet;
use crate::scanner::LineScanner;
use crate::verify::VerificationRunner;
use crate::{EngineConfig, EngineError};

/// Drives the fix pipeline over one repository directory.
///
/// Each `execute` call owns its accumulators; nothing is shared across
/// invocations.
pub struct FixEngine {
    root: PathBuf,
    config: EngineConfig,
    rules: RuleSet,
    discoverer: FileDiscoverer,
    verifier: VerificationRunner,
}

impl FixEngine {
    /// Creates an engine for the repository at `root`.
    ///
    /// Fails fast when the directory is missing or empty — a caller bug
    /// (acquisition runs before the engine), not a recoverable state.
    pub fn new(root: impl Into<PathBuf>, config: EngineConfig) -> Result<Self, EngineError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(EngineError::config(format!(
                "Repository directory {} does not exist",
                root.display()
            )));
        }
        let mut entries = std::fs::read_dir(&root)
            .map_err(|e| EngineError::file(format!("Cannot list {}: {}", root.display(), e)))?;
        if entries.next().is_none() {
            return Err(EngineError::config(format!(
                "Repository directory {} is empty",
                root.display()
            )));
        }

        let rules = RuleSet::builtin()?;
        let discoverer = FileDiscoverer::new(&config)?;
        let verifier = VerificationRunner::new(Duration::from_secs(config.command_timeout_secs));

        Ok(Self {
            root,
            config,
            rules,
            discoverer,
            verifier,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// One detect pass over the repository: discover, scan, de-duplicate.
    /// Touches nothing on disk.
    pub fn scan(&self) -> Vec<Finding> {
        let scanner = LineScanner::new(&self.rules, &self.root);
        let mut findings = Vec::new();
        let mut seen: HashSet<FindingKey> = HashSet::new();

        for file in self.discoverer.discover(&self.root) {
            for finding in scanner.scan_file(&file) {
                if seen.insert(finding.key()) {
                    findings.push(finding);
                }
            }
        }
        findings
    }

    /// Runs the bounded detect→fix→verify loop and returns the aggregated
    /// result. Terminates early on a no-findings-and-passed iteration, or
    /// when the iteration cap is reached (a normal exhaustion outcome).
    pub fn execute(&self) -> ExecutionResult {
        let mut fixes: Vec<FixRecord> = Vec::new();
        let mut runs: Vec<VerificationRun> = Vec::new();
        let mut all_keys: HashSet<FindingKey> = HashSet::new();
        let mut iteration = 0;

        while iteration < self.config.max_iterations {
            iteration += 1;
            let mut run = VerificationRun::started(iteration);
            info!("Iteration {} of {}", iteration, self.config.max_iterations);

            let findings = self.scan();
            for finding in &findings {
                all_keys.insert(finding.key());
            }

            if findings.is_empty() {
                let verdict = self.verifier.verify(&self.root);
                if verdict.passed {
                    info!("No findings and verification passed, stopping");
                    run.mark_passed(verdict.output);
                    runs.push(run);
                    break;
                }
                // Nothing left to fix, so this failure will repeat until
                // the iteration cap is reached.
                warn!(
                    "Verification failed with no findings to fix (iteration {})",
                    iteration
                );
                run.mark_failed(verdict.output);
                runs.push(run);
                continue;
            }

            info!("Found {} findings to fix", findings.len());
            for finding in &findings {
                let fix = generate_fix(finding);
                let applied = match apply_fix(&self.root, finding, &fix) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(
                            "Failed to fix {} line {}: {}",
                            finding.file.display(),
                            finding.line,
                            e
                        );
                        false
                    }
                };
                fixes.push(FixRecord::new(finding, &fix.detail, applied));
            }

            let verdict = self.verifier.verify(&self.root);
            if verdict.passed {
                run.mark_passed(verdict.output);
            } else {
                run.mark_failed(verdict.output);
            }
            runs.push(run);
        }

        ExecutionResult {
            total_iterations: iteration,
            fixes,
            verification_runs: runs,
            unique_finding_count: all_keys.len(),
        }
    }
}

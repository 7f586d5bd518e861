//! Run command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use remend_core::{FixEngine, RunStatus};

use crate::commands::load_config;
use crate::output::output_execution;
use crate::{Cli, OutputFormat};

pub fn run_execute(
    cli: &Cli,
    path: &Path,
    max_iterations: Option<usize>,
    timeout_secs: Option<u64>,
    format: OutputFormat,
) -> Result<bool> {
    let mut config = load_config(cli)?;
    if let Some(cap) = max_iterations {
        config.max_iterations = cap;
    }
    if let Some(secs) = timeout_secs {
        config.command_timeout_secs = secs;
    }

    let engine = FixEngine::new(path, config).into_diagnostic()?;
    let result = engine.execute();

    output_execution(&result, format)?;

    let clean = result
        .verification_runs
        .last()
        .is_some_and(|run| run.status == RunStatus::Passed);
    Ok(clean)
}

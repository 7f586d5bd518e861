//! Scan command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use remend_core::FixEngine;

use crate::commands::load_config;
use crate::output::output_findings;
use crate::{Cli, OutputFormat};

pub fn run_scan(cli: &Cli, path: &Path, format: OutputFormat) -> Result<bool> {
    let config = load_config(cli)?;
    let engine = FixEngine::new(path, config).into_diagnostic()?;

    let findings = engine.scan();
    output_findings(&findings, format)?;

    Ok(findings.is_empty())
}

//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use remend_core::{ExecutionResult, Finding};

pub fn output_execution_json(result: &ExecutionResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result).into_diagnostic()?);
    Ok(())
}

pub fn output_findings_json(findings: &[Finding]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(findings).into_diagnostic()?
    );
    Ok(())
}

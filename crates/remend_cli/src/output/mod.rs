//! Output formatting module

mod json;
mod text;

use miette::Result;
use remend_core::{ExecutionResult, Finding};

use crate::OutputFormat;

pub fn output_execution(result: &ExecutionResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_execution_json(result),
        OutputFormat::Text => {
            text::output_execution_text(result);
            Ok(())
        }
    }
}

pub fn output_findings(findings: &[Finding], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_findings_json(findings),
        OutputFormat::Text => {
            text::output_findings_text(findings);
            Ok(())
        }
    }
}

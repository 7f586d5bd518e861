//! Text output formatter

use remend_core::{ExecutionResult, Finding, FixStatus, RunStatus};

pub fn output_execution_text(result: &ExecutionResult) {
    for run in &result.verification_runs {
        let status = match run.status {
            RunStatus::Passed => "PASSED",
            RunStatus::Failed => "FAILED",
            RunStatus::Running => "RUNNING",
        };
        println!("iteration {} [{}] {}", run.iteration, run.timestamp, status);
        for error in &run.errors {
            for line in error.lines().take(10) {
                println!("    {}", line);
            }
        }
    }

    if !result.fixes.is_empty() {
        println!();
        for fix in &result.fixes {
            let status = match fix.status {
                FixStatus::Fixed => "fixed",
                FixStatus::Failed => "failed",
            };
            println!(
                "  {}:{} {} [{}]: {}",
                fix.file.display(),
                fix.line,
                status,
                fix.category,
                fix.detail
            );
        }
    }

    println!();
    println!(
        "{} iterations, {} fixes, {} unique findings",
        result.total_iterations,
        result.fixes.len(),
        result.unique_finding_count
    );
}

pub fn output_findings_text(findings: &[Finding]) {
    for finding in findings {
        println!(
            "  {}:{} [{}]: {}",
            finding.file.display(),
            finding.line,
            finding.category,
            finding.description
        );
    }

    println!();
    println!("Found {} issues", findings.len());
}

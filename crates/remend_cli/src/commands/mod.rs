//! Subcommand implementations.

mod run;
mod scan;

pub use run::run_execute;
pub use scan::run_scan;

use miette::{IntoDiagnostic, Result};
use remend_core::EngineConfig;

use crate::Cli;

/// Loads the engine configuration, from `--config` when given,
/// defaults otherwise.
pub(crate) fn load_config(cli: &Cli) -> Result<EngineConfig> {
    match &cli.config {
        Some(path) => EngineConfig::from_file(path).into_diagnostic(),
        None => Ok(EngineConfig::default()),
    }
}

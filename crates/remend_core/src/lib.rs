//! # remend_core
//!
//! Core engine for remend: a bounded detect→fix→verify pipeline over a
//! checked-out repository.
//!
//! This crate provides:
//! - The main `FixEngine` orchestrator
//! - Configuration loading
//! - File discovery and line scanning
//! - Deterministic fix generation and in-place application
//! - External verification with an enforced timeout
//!
//! ## Example
//!
//! ```rust,ignore
//! use remend_core::{EngineConfig, FixEngine};
//!
//! let engine = FixEngine::new("/path/to/repo", EngineConfig::default())?;
//! let result = engine.execute();
//! println!("{} fixes over {} iterations", result.fixes.len(), result.total_iterations);
//! ```
//!
//! Detection is line-oriented pattern matching, not parsing: a keyword
//! inside a string literal will be flagged and multi-line defects will be
//! missed. That trade-off is part of the contract.

mod applier;
pub mod command;
mod config;
mod discover;
mod engine;
mod error;
mod fix;
mod report;
mod rules;
mod scanner;
mod verify;

pub use applier::apply_fix;
pub use config::EngineConfig;
pub use discover::FileDiscoverer;
pub use engine::FixEngine;
pub use error::EngineError;
pub use fix::{generate_fix, FixAction, GeneratedFix};
pub use report::{
    Category, ExecutionResult, Finding, FindingKey, FixRecord, FixStatus, RunStatus,
    VerificationRun,
};
pub use rules::{PatternRule, RuleSet, COLON_KEYWORDS};
pub use scanner::LineScanner;
pub use verify::{Language, VerificationRunner, Verdict};

//! Built-in detection rule tables.
//!
//! Detection is deliberately line-oriented and pattern-based: a statement
//! keyword inside a string literal will be flagged, and real defects that
//! span lines will be missed. The tables are immutable once built and are
//! passed by reference into the scanner.

use regex::Regex;

use crate::report::Category;
use crate::EngineError;

/// Keywords that open a statement and require a trailing colon.
pub const COLON_KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "for", "while", "try", "except", "finally", "with", "async def",
    "else",
];

/// A single compiled pattern rule.
#[derive(Debug)]
pub struct PatternRule {
    pub pattern: Regex,
    pub description: &'static str,
}

/// The fixed, ordered rule tables driving the scanner.
#[derive(Debug)]
pub struct RuleSet {
    tables: Vec<(Category, Vec<PatternRule>)>,
}

impl RuleSet {
    /// Builds the built-in rule set. Pattern tables are ordered; the first
    /// matching pattern in a category wins for a given line.
    pub fn builtin() -> Result<Self, EngineError> {
        let linting: &[(&str, &str)] = &[
            (r#"^import ['"]os['"]"#, "Unused standard library import"),
            (r"^from os import", "Unused standard library import"),
            (r#"^import ['"]sys['"]"#, "Unused standard library import"),
            (r#"^import ['"]numpy['"]"#, "Unused standard library import"),
            (r#"^import ['"]pandas['"]"#, "Unused standard library import"),
            (r"print\(.+\)", "Debug print statement found"),
            (r#"^import ['"]math['"]"#, "Unused standard library import"),
            (r#"^import ['"]random['"]"#, "Unused standard library import"),
        ];
        let type_error: &[(&str, &str)] =
            &[(r"for\s+\w+\s+in\s+\w+\s+for\s+", "Confused list comprehension")];
        let import: &[(&str, &str)] = &[
            (r"^import\s*$", "Incomplete import statement"),
            (r"^from\s+.*import\s*$", "Incomplete from import"),
        ];

        Ok(Self {
            tables: vec![
                (Category::Linting, Self::compile(linting)?),
                (Category::TypeError, Self::compile(type_error)?),
                (Category::Import, Self::compile(import)?),
            ],
        })
    }

    fn compile(table: &[(&str, &'static str)]) -> Result<Vec<PatternRule>, EngineError> {
        table
            .iter()
            .map(|(pattern, description)| {
                let pattern = Regex::new(pattern)
                    .map_err(|e| EngineError::rule(format!("Invalid pattern '{pattern}': {e}")))?;
                Ok(PatternRule {
                    pattern,
                    description,
                })
            })
            .collect()
    }

    /// Iterates the generic tables in their fixed order. The colon and tab
    /// checks are structural and handled separately by the scanner.
    pub fn generic_tables(&self) -> impl Iterator<Item = (Category, &[PatternRule])> {
        self.tables
            .iter()
            .map(|(category, rules)| (*category, rules.as_slice()))
    }
}

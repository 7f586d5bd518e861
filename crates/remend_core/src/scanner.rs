//! Single file line scanning.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::report::{Category, Finding};
use crate::rules::{RuleSet, COLON_KEYWORDS};

/// Scans one file at a time against the rule tables, de-duplicating
/// findings by (line, category).
pub struct LineScanner<'a> {
    rules: &'a RuleSet,
    root: &'a Path,
}

impl<'a> LineScanner<'a> {
    pub fn new(rules: &'a RuleSet, root: &'a Path) -> Self {
        Self { rules, root }
    }

    /// Returns the de-duplicated findings for `path`. An unreadable file
    /// yields an empty sequence; undecodable bytes are replaced, not fatal.
    pub fn scan_file(&self, path: &Path) -> Vec<Finding> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping unreadable file {}: {}", path.display(), e);
                return Vec::new();
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        let relative: PathBuf = path.strip_prefix(self.root).unwrap_or(path).to_path_buf();

        let mut findings = Vec::new();
        let mut seen: HashSet<(usize, Category)> = HashSet::new();

        for (index, line) in content.lines().enumerate() {
            let line_num = index + 1;
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with('#') {
                continue;
            }

            if let Some(keyword) = opening_keyword(line)
                && !stripped.ends_with(':')
                && !line.contains('#')
                && seen.insert((line_num, Category::Syntax))
            {
                findings.push(Finding {
                    file: relative.clone(),
                    line: line_num,
                    content: stripped.to_string(),
                    category: Category::Syntax,
                    description: format!("Missing colon after {} statement", keyword),
                    pattern: format!("missing_colon_{}", keyword),
                });
            }

            if line.starts_with('\t') && seen.insert((line_num, Category::Indentation)) {
                findings.push(Finding {
                    file: relative.clone(),
                    line: line_num,
                    content: stripped.to_string(),
                    category: Category::Indentation,
                    description: "Tab indentation found (use spaces)".to_string(),
                    pattern: "tab_indent".to_string(),
                });
            }

            for (category, table) in self.rules.generic_tables() {
                for rule in table {
                    if rule.pattern.is_match(line) {
                        if seen.insert((line_num, category)) {
                            findings.push(Finding {
                                file: relative.clone(),
                                line: line_num,
                                content: stripped.to_string(),
                                category,
                                description: rule.description.to_string(),
                                pattern: rule.pattern.as_str().to_string(),
                            });
                        }
                        break;
                    }
                }
            }
        }

        debug!("{}: {} findings", path.display(), findings.len());
        findings
    }
}

/// Returns the statement-opening keyword the trimmed line starts with, if
/// any. The keyword must be followed by a non-identifier character (or end
/// of line) so that e.g. `iffy = 1` does not match `if`.
fn opening_keyword(line: &str) -> Option<&'static str> {
    let head = line.trim_start();
    COLON_KEYWORDS.iter().copied().find(|keyword| {
        head.starts_with(keyword)
            && head[keyword.len()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric() && c != '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    fn scan(content: &str) -> Vec<Finding> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.py");
        fs::write(&path, content).unwrap();
        let rules = RuleSet::builtin().unwrap();
        let scanner = LineScanner::new(&rules, dir.path());
        scanner.scan_file(&path)
    }

    #[rstest]
    #[case("def foo()", "def")]
    #[case("class Thing", "class")]
    #[case("if x > 0", "if")]
    #[case("    elif y < 2", "elif")]
    #[case("for item in items", "for")]
    #[case("while running", "while")]
    #[case("async def handler()", "async def")]
    fn missing_colon_is_flagged(#[case] line: &str, #[case] keyword: &str) {
        let findings = scan(&format!("{}\n", line));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Syntax);
        assert_eq!(findings[0].pattern, format!("missing_colon_{}", keyword));
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn line_ending_with_colon_is_clean() {
        assert!(scan("def foo():\n").is_empty());
        assert!(scan("else:\n").is_empty());
    }

    #[test]
    fn inline_comment_suppresses_colon_check() {
        assert!(scan("if x > 0  # checked elsewhere\n").is_empty());
    }

    #[test]
    fn keyword_prefix_of_identifier_is_not_flagged() {
        assert!(scan("iffy = 1\n").is_empty());
        assert!(scan("classic = 2\n").is_empty());
    }

    #[test]
    fn comment_and_blank_lines_are_skipped() {
        assert!(scan("# def foo()\n\n   \n").is_empty());
    }

    #[test]
    fn tab_indentation_is_flagged_independently() {
        let findings = scan("\tif x > 0\n");
        let categories: Vec<Category> = findings.iter().map(|f| f.category).collect();
        assert!(categories.contains(&Category::Indentation));
        assert!(categories.contains(&Category::Syntax));
    }

    #[test]
    fn debug_print_is_flagged_as_linting() {
        let findings = scan("print(value)\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Linting);
        assert_eq!(findings[0].description, "Debug print statement found");
    }

    #[test]
    fn two_linting_patterns_on_one_line_yield_one_finding() {
        // Matches both the unused-import and debug-print patterns.
        let findings = scan("import 'os' print(x)\n");
        let linting: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.category == Category::Linting)
            .collect();
        assert_eq!(linting.len(), 1);
        assert_eq!(linting[0].description, "Unused standard library import");
    }

    #[test]
    fn incomplete_import_is_flagged() {
        let findings = scan("import\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Import);
    }

    #[test]
    fn confused_comprehension_is_flagged() {
        let findings = scan("result = [x for x in xs for y]\n");
        assert!(findings.iter().any(|f| f.category == Category::TypeError));
    }

    #[test]
    fn clean_file_scans_empty_twice() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.py");
        fs::write(&path, "x = 1\ny = x + 1\n").unwrap();
        let rules = RuleSet::builtin().unwrap();
        let scanner = LineScanner::new(&rules, dir.path());

        assert!(scanner.scan_file(&path).is_empty());
        assert!(scanner.scan_file(&path).is_empty());
    }

    #[test]
    fn missing_file_yields_empty_findings() {
        let dir = tempdir().unwrap();
        let rules = RuleSet::builtin().unwrap();
        let scanner = LineScanner::new(&rules, dir.path());
        assert!(scanner.scan_file(&dir.path().join("absent.py")).is_empty());
    }

    #[test]
    fn finding_paths_are_relative_to_root() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("src");
        fs::create_dir(&sub).unwrap();
        let path = sub.join("app.py");
        fs::write(&path, "def broken()\n").unwrap();
        let rules = RuleSet::builtin().unwrap();
        let scanner = LineScanner::new(&rules, dir.path());

        let findings = scanner.scan_file(&path);
        assert_eq!(findings[0].file, PathBuf::from("src/app.py"));
    }
}

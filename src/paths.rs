//! Detect file paths mentioned in a prompt.
//!
//! Pure text heuristics; nothing here touches the filesystem.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Tokens ending in a known source/config extension
    static ref RE_EXTENSION: Regex = Regex::new(
        r#"(?i)(?:^|\s|["'`])([\w\-./]+\.(?:[tj]sx?|json|gql|ya?ml|md|sh))\b"#
    )
    .unwrap();

    // Any quoted relative path with at least one separator
    static ref RE_QUOTED: Regex = Regex::new(r#"["'`]([\w\-./]+/[\w\-./]+)["'`]"#).unwrap();
}

/// Extracts candidate file paths from prompt text
#[derive(Debug, Clone)]
pub struct PathExtractor {
    /// Tokens rooted at one of the configured top-level directories
    directory_pattern: Option<Regex>,
}

impl PathExtractor {
    /// Build an extractor recognising paths under `directories`
    pub fn new<S: AsRef<str>>(directories: &[S]) -> Self {
        let alternatives: Vec<String> = directories
            .iter()
            .map(|d| d.as_ref().trim_matches('/'))
            .filter(|d| !d.is_empty())
            .map(regex::escape)
            .collect();

        let directory_pattern = if alternatives.is_empty() {
            None
        } else {
            Regex::new(&format!(
                r#"(?i)(?:^|\s|["'`])((?:{})/[\w\-./]+)"#,
                alternatives.join("|")
            ))
            .ok()
        };

        Self { directory_pattern }
    }

    /// All distinct paths in `prompt`, in order of first detection
    /// (extension hits, then directory hits, then quoted hits).
    pub fn extract(&self, prompt: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();

        let detectors = [
            Some(&*RE_EXTENSION),
            self.directory_pattern.as_ref(),
            Some(&*RE_QUOTED),
        ];

        for re in detectors.into_iter().flatten() {
            for caps in re.captures_iter(prompt) {
                if let Some(m) = caps.get(1) {
                    let path = m.as_str();
                    if seen.insert(path) {
                        paths.push(path.to_string());
                    }
                }
            }
        }

        paths
    }
}

//! Regex and glob patterns used by the scoring engine.
//!
//! Patterns are compiled once, when the rules document is deserialized. A
//! pattern that fails to compile is kept (so it can be linted) but matches
//! nothing.

use fancy_regex::Regex as FancyRegex;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer};

/// Compile a rule regex. All rule regexes are case-insensitive; `(?-i)`
/// inside the pattern turns that off.
///
/// Rule documents are written for JavaScript `RegExp`, so lookaround and
/// backreferences must work. `fancy_regex` delegates everything else to
/// `regex`.
pub fn compile_regex(pattern: &str) -> Option<FancyRegex> {
    FancyRegex::new(&format!("(?i){}", pattern)).ok()
}

/// A regex trigger (`keywordPatterns`, `intentPatterns`, `contentPatterns`,
/// `excludePatterns`)
#[derive(Debug, Clone)]
pub struct RulePattern {
    source: String,
    regex: Option<FancyRegex>,
}

impl RulePattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let regex = compile_regex(&source);
        Self { source, regex }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Malformed patterns, and matches that exceed the backtrack limit, are
    /// no match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex
            .as_ref()
            .is_some_and(|re| re.is_match(text).unwrap_or(false))
    }
}

impl From<&str> for RulePattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl<'de> Deserialize<'de> for RulePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Translate a glob into an anchored regex source.
///
/// - `**/` matches zero or more leading path segments
/// - `**` matches anything, separators included
/// - `*` matches within a single segment
/// - `?` matches one character
/// - `.` is literal
///
/// Every other character is passed through unchanged, so `[ab]` still acts as
/// a character class.
// Not globset: `?` here may match `/` and other characters are raw regex.
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push('.'),
            '.' => out.push_str("\\."),
            other => out.push(other),
        }
    }

    out.push('$');
    out
}

/// Compile a glob into a case-insensitive anchored regex.
pub fn compile_glob(glob: &str) -> Option<Regex> {
    RegexBuilder::new(&glob_to_regex(glob))
        .case_insensitive(true)
        .build()
        .ok()
}

/// A `pathPatterns` glob
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Option<Regex>,
}

impl GlobPattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let regex = compile_glob(&source);
        Self { source, regex }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Malformed globs never match.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(path))
    }
}

impl From<&str> for GlobPattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl<'de> Deserialize<'de> for GlobPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

//! The rule store: skills, their triggers, scoring weights and global settings.
//!
//! Rules live in a JSON document (`skill-rules.json`) that is loaded once per
//! invocation and never mutated afterwards.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{EvalError, Result};
use crate::pattern::{GlobPattern, RulePattern};

/// File name of the rules document
pub const RULES_FILE: &str = "skill-rules.json";

/// Directory (relative to a project root or home) holding the hook and its rules
const HOOKS_DIR: &str = ".claude/hooks";

/// Top-level directories recognised by the directory-prefix path detector
const DEFAULT_PATH_DIRECTORIES: &[&str] = &[
    "src",
    "app",
    "components",
    "screens",
    "hooks",
    "utils",
    "services",
    "navigation",
    "graphql",
    "localization",
    ".claude",
    ".github",
    ".maestro",
];

// ============================================================================
// Ordered map
// ============================================================================

/// A string-keyed map that keeps document order.
///
/// Skill order decides how ties are broken and mapping order decides which
/// directory prefix wins, so a hash map is not an option here.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

// ============================================================================
// Rule document types
// ============================================================================

/// The complete rule configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStore {
    /// Global thresholds and display options
    #[serde(default)]
    pub config: Config,

    /// Weight of each signal kind
    #[serde(default)]
    pub scoring: Scoring,

    /// Directory prefix -> skill name
    #[serde(default)]
    pub directory_mappings: OrderedMap<String>,

    /// Skill name -> definition
    #[serde(default)]
    pub skills: OrderedMap<SkillDefinition>,

    /// Top-level directories the path extractor treats as path roots
    #[serde(default = "default_path_directories")]
    pub path_directories: Vec<String>,
}

fn default_path_directories() -> Vec<String> {
    DEFAULT_PATH_DIRECTORIES.iter().map(|d| d.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Matches scoring below this are dropped
    pub min_confidence_score: u32,
    /// Cap on the number of ranked skills shown
    pub max_skills_to_show: usize,
    /// Print the "Matched:" line under each skill
    pub show_match_reasons: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_confidence_score: 3,
            max_skills_to_show: 5,
            show_match_reasons: true,
        }
    }
}

/// Weight added per signal kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scoring {
    pub keyword: u32,
    pub keyword_pattern: u32,
    pub intent_pattern: u32,
    pub context_pattern: u32,
    pub path_pattern: u32,
    pub directory_match: u32,
    pub content_pattern: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            keyword: 2,
            keyword_pattern: 3,
            intent_pattern: 4,
            context_pattern: 2,
            path_pattern: 4,
            directory_match: 5,
            content_pattern: 3,
        }
    }
}

impl Scoring {
    fn weights(&self) -> [(&'static str, u32); 7] {
        [
            ("keyword", self.keyword),
            ("keywordPattern", self.keyword_pattern),
            ("intentPattern", self.intent_pattern),
            ("contextPattern", self.context_pattern),
            ("pathPattern", self.path_pattern),
            ("directoryMatch", self.directory_match),
            ("contentPattern", self.content_pattern),
        ]
    }
}

/// A single skill's activation rules
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
    /// Optional human-readable summary (not scored)
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub triggers: Triggers,

    /// Any match against the lowercased prompt vetoes the skill
    #[serde(default)]
    pub exclude_patterns: Vec<RulePattern>,

    /// Tie-breaker only; higher ranks first
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Suggested alongside a match, never scored themselves
    #[serde(default)]
    pub related_skills: Vec<String>,
}

fn default_priority() -> i32 {
    5
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Triggers {
    /// Literal, case-insensitive substrings
    pub keywords: Vec<String>,
    /// Regexes against the lowercased prompt, each one scores
    pub keyword_patterns: Vec<RulePattern>,
    /// Regexes against the lowercased prompt, scores at most once
    pub intent_patterns: Vec<RulePattern>,
    /// Literal, case-insensitive substrings
    pub context_patterns: Vec<String>,
    /// Globs over extracted file paths
    pub path_patterns: Vec<GlobPattern>,
    /// Regexes against the original-case prompt, scores at most once
    pub content_patterns: Vec<RulePattern>,
}

// ============================================================================
// Loading
// ============================================================================

impl RuleStore {
    /// Parse and validate a rules document
    pub fn from_json(content: &str) -> Result<Self> {
        let rules: RuleStore = serde_json::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Read, parse and validate the rules document at `path`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EvalError::RulesNotFound(vec![path.to_path_buf()]));
        }

        let content = fs::read_to_string(path).map_err(|e| EvalError::RulesRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.config.max_skills_to_show == 0 {
            return Err(EvalError::RulesInvalid(
                "config.maxSkillsToShow must be at least 1".to_string(),
            ));
        }
        for (kind, weight) in self.scoring.weights() {
            if weight == 0 {
                return Err(EvalError::RulesInvalid(format!(
                    "scoring.{} must be a positive weight",
                    kind
                )));
            }
        }
        Ok(())
    }
}

/// Locations searched for the rules document when none is given explicitly
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join(RULES_FILE));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(HOOKS_DIR).join(RULES_FILE));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(HOOKS_DIR).join(RULES_FILE));
    }

    candidates
}

/// Pick the rules document: the explicit path if given, else the first
/// existing candidate.
pub fn resolve_rules_path(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    for candidate in candidates {
        debug!("Looking for rules at {:?}", candidate);
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }

    Err(EvalError::RulesNotFound(candidates.to_vec()))
}

// ============================================================================
// Linting
// ============================================================================

/// A rule that can never fire as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    /// Skill name, or `directoryMappings["<prefix>"]`
    pub scope: String,
    pub message: String,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.scope, self.message)
    }
}

/// Report regexes and globs that fail to compile and references to unknown skills
pub fn lint(rules: &RuleStore) -> Vec<LintFinding> {
    let mut findings = Vec::new();

    for (name, skill) in rules.skills.iter() {
        let mut report = |message: String| {
            findings.push(LintFinding {
                scope: name.to_string(),
                message,
            })
        };

        let triggers = &skill.triggers;
        let regex_lists = [
            ("keywordPatterns", &triggers.keyword_patterns),
            ("intentPatterns", &triggers.intent_patterns),
            ("contentPatterns", &triggers.content_patterns),
            ("excludePatterns", &skill.exclude_patterns),
        ];
        for (field, patterns) in regex_lists {
            for pattern in patterns {
                if !pattern.is_valid() {
                    report(format!(
                        "{} entry /{}/ is not a valid regex",
                        field,
                        pattern.as_str()
                    ));
                }
            }
        }

        for glob in &triggers.path_patterns {
            if !glob.is_valid() {
                report(format!(
                    "pathPatterns entry \"{}\" is not a valid glob",
                    glob.as_str()
                ));
            }
        }

        for related in &skill.related_skills {
            if !rules.skills.contains_key(related) {
                report(format!("relatedSkills names unknown skill \"{}\"", related));
            }
        }
    }

    for (prefix, target) in rules.directory_mappings.iter() {
        if !rules.skills.contains_key(target) {
            findings.push(LintFinding {
                scope: format!("directoryMappings[\"{}\"]", prefix),
                message: format!("maps to unknown skill \"{}\"", target),
            });
        }
    }

    findings
}

//! Score one skill against a prompt.
//!
//! Each signal kind adds its configured weight. Keywords, keyword patterns,
//! context strings and path globs can fire many times; intent patterns,
//! directory mappings and content patterns fire at most once per skill.

use std::collections::HashSet;

use crate::rules::{OrderedMap, RuleStore, SkillDefinition};

/// A skill that scored above zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    pub name: String,
    pub score: u32,
    /// What triggered the match, deduplicated, in first-seen order
    pub reasons: Vec<String>,
    pub priority: i32,
}

/// Prompt text in both forms the signals need, plus the paths found in it
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub original: &'a str,
    pub lower: &'a str,
    pub paths: &'a [String],
}

/// Find which skill a path belongs to by directory prefix.
///
/// A prefix matches the path itself or anything below it. The first matching
/// entry in document order wins.
pub fn match_directory_mapping<'a>(path: &str, mappings: &'a OrderedMap<String>) -> Option<&'a str> {
    mappings
        .iter()
        .find(|(dir, _)| {
            path == *dir
                || path
                    .strip_prefix(*dir)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .map(|(_, skill)| skill.as_str())
}

struct Tally {
    score: u32,
    reasons: Vec<String>,
}

impl Tally {
    fn add(&mut self, weight: u32, reason: String) {
        self.score = self.score.saturating_add(weight);
        self.reasons.push(reason);
    }
}

/// Evaluate a single skill. Returns `None` when the skill is excluded or
/// nothing fired.
pub fn evaluate_skill(
    name: &str,
    skill: &SkillDefinition,
    prompt: &PromptContext<'_>,
    rules: &RuleStore,
) -> Option<SkillMatch> {
    // Exclusions veto everything else
    if skill
        .exclude_patterns
        .iter()
        .any(|p| p.is_match(prompt.lower))
    {
        return None;
    }

    let scoring = &rules.scoring;
    let triggers = &skill.triggers;
    let mut tally = Tally {
        score: 0,
        reasons: Vec::new(),
    };

    for keyword in &triggers.keywords {
        if prompt.lower.contains(&keyword.to_lowercase()) {
            tally.add(scoring.keyword, format!("keyword \"{}\"", keyword));
        }
    }

    for pattern in &triggers.keyword_patterns {
        if pattern.is_match(prompt.lower) {
            tally.add(scoring.keyword_pattern, format!("pattern /{}/", pattern.as_str()));
        }
    }

    if triggers
        .intent_patterns
        .iter()
        .any(|p| p.is_match(prompt.lower))
    {
        tally.add(scoring.intent_pattern, "intent detected".to_string());
    }

    for context in &triggers.context_patterns {
        if prompt.lower.contains(&context.to_lowercase()) {
            tally.add(scoring.context_pattern, format!("context \"{}\"", context));
        }
    }

    // One hit per path, however many globs it satisfies
    if !triggers.path_patterns.is_empty() {
        for path in prompt.paths {
            if triggers.path_patterns.iter().any(|g| g.is_match(path)) {
                tally.add(scoring.path_pattern, format!("path \"{}\"", path));
            }
        }
    }

    if prompt
        .paths
        .iter()
        .any(|path| match_directory_mapping(path, &rules.directory_mappings) == Some(name))
    {
        tally.add(scoring.directory_match, "directory mapping".to_string());
    }

    // Code snippets: run against the original casing
    if triggers
        .content_patterns
        .iter()
        .any(|p| p.is_match(prompt.original))
    {
        tally.add(scoring.content_pattern, "code pattern detected".to_string());
    }

    if tally.score == 0 {
        return None;
    }

    let mut seen = HashSet::new();
    let reasons = tally
        .reasons
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect();

    Some(SkillMatch {
        name: name.to_string(),
        score: tally.score,
        reasons,
        priority: skill.priority,
    })
}

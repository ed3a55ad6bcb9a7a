//! Skill Eval - rule-based skill activation for Claude Code
//!
//! Scores every skill in a rules document against the user's prompt and any
//! file paths mentioned in it, then renders an advisory listing the skills
//! worth activating.
//!
//! Signals per skill: keywords, keyword patterns, intent patterns, context
//! strings, path globs, directory mappings and content patterns, each with a
//! configurable weight. Exclude patterns veto a skill outright.
//!
//! The whole evaluation is a pure function of `(prompt, rules)`.
//!
//! ```
//! use skill_eval::{evaluate, RuleStore};
//!
//! let rules = RuleStore::from_json(r#"{
//!     "config": { "minConfidenceScore": 1 },
//!     "skills": { "testing": { "triggers": { "keywords": ["test"] } } }
//! }"#).unwrap();
//!
//! assert!(evaluate("add a test", &rules).contains("1. testing"));
//! assert!(evaluate("hello there", &rules).is_empty());
//! ```

pub mod error;
pub mod evaluator;
pub mod format;
pub mod hook;
pub mod paths;
pub mod pattern;
pub mod ranking;
pub mod rules;

pub use error::{EvalError, Result};
pub use evaluator::{evaluate_skill, PromptContext, SkillMatch};
pub use ranking::Confidence;
pub use rules::RuleStore;

use paths::PathExtractor;

/// Result of scoring a prompt, before rendering
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Paths detected in the prompt
    pub paths: Vec<String>,
    /// Ranked, capped matches
    pub selected: Vec<SkillMatch>,
    /// Related skills not already selected
    pub related: Vec<String>,
}

impl Evaluation {
    /// The advisory text, or an empty string when nothing was selected
    pub fn render(&self, rules: &RuleStore) -> String {
        if self.selected.is_empty() {
            return String::new();
        }
        format::render(&self.selected, &self.related, &self.paths, &rules.config)
    }
}

/// Score every skill and select the ones to show
pub fn analyze(prompt: &str, rules: &RuleStore) -> Evaluation {
    let lower = prompt.to_lowercase();
    let paths = PathExtractor::new(&rules.path_directories).extract(prompt);

    let context = PromptContext {
        original: prompt,
        lower: &lower,
        paths: &paths,
    };

    let matches: Vec<SkillMatch> = rules
        .skills
        .iter()
        .filter_map(|(name, skill)| evaluate_skill(name, skill, &context, rules))
        .collect();

    let selected = ranking::select(matches, &rules.config);
    let related = ranking::related_skills(&selected, &rules.skills);

    Evaluation {
        paths,
        selected,
        related,
    }
}

/// Evaluate a prompt. An empty string means no advisory.
pub fn evaluate(prompt: &str, rules: &RuleStore) -> String {
    analyze(prompt, rules).render(rules)
}

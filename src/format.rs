//! Render selected skills into the advisory block injected into the prompt.

use std::fmt::Write;

use crate::evaluator::SkillMatch;
use crate::ranking::Confidence;
use crate::rules::Config;

/// Reasons shown per skill
const MAX_REASONS: usize = 3;

/// Render the advisory. Callers only invoke this with at least one match;
/// an empty slice renders as an empty string.
pub fn render(matches: &[SkillMatch], related: &[String], paths: &[String], config: &Config) -> String {
    let Some(top) = matches.first() else {
        return String::new();
    };

    let mut out = String::new();
    out.push_str("<user-prompt-submit-hook>\n");
    out.push_str("SKILL ACTIVATION REQUIRED\n\n");

    if !paths.is_empty() {
        let _ = writeln!(out, "Detected file paths: {}\n", paths.join(", "));
    }

    out.push_str("Matched skills (ranked by relevance):\n");

    for (i, m) in matches.iter().enumerate() {
        let confidence = Confidence::from_score(m.score, config.min_confidence_score);
        let _ = writeln!(out, "{}. {} ({} confidence)", i + 1, m.name, confidence.as_str());

        if config.show_match_reasons && !m.reasons.is_empty() {
            let shown: Vec<&str> = m.reasons.iter().take(MAX_REASONS).map(String::as_str).collect();
            let _ = writeln!(out, "   Matched: {}", shown.join(", "));
        }
    }

    if !related.is_empty() {
        let _ = writeln!(out, "\nRelated skills to consider: {}", related.join(", "));
    }

    out.push_str("\nBefore implementing, you MUST:\n");
    out.push_str("1. EVALUATE: State YES/NO for each skill with brief reasoning\n");
    out.push_str("2. ACTIVATE: Invoke the Skill tool for each YES skill\n");
    out.push_str("3. IMPLEMENT: Only proceed after skill activation\n");
    out.push_str("\nExample evaluation:\n");
    let _ = writeln!(out, "- {}: YES - [your reasoning]", top.name);
    if let Some(second) = matches.get(1) {
        let _ = writeln!(out, "- {}: NO - [your reasoning]", second.name);
    }
    out.push_str("\nDO NOT skip this step. Invoke relevant skills NOW.\n");
    out.push_str("</user-prompt-submit-hook>");

    out
}

//! Threshold, order and cap the scored skills, then collect related skills.

use std::collections::HashSet;

use crate::evaluator::SkillMatch;
use crate::rules::{Config, OrderedMap, SkillDefinition};

/// Confidence level relative to the configured minimum score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Score >= 3x minimum
    High,
    /// Score >= 2x minimum
    Medium,
    /// Anything that passed the threshold
    Low,
}

impl Confidence {
    /// With a minimum of 0 every match is HIGH.
    pub fn from_score(score: u32, min_score: u32) -> Self {
        if score >= min_score.saturating_mul(3) {
            Confidence::High
        } else if score >= min_score.saturating_mul(2) {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

/// Drop matches under the threshold, sort by score then priority (both
/// descending, stable otherwise) and keep the first `max_skills_to_show`.
pub fn select(mut matches: Vec<SkillMatch>, config: &Config) -> Vec<SkillMatch> {
    matches.retain(|m| m.score > 0 && m.score >= config.min_confidence_score);
    matches.sort_by(|a, b| b.score.cmp(&a.score).then(b.priority.cmp(&a.priority)));
    matches.truncate(config.max_skills_to_show);
    matches
}

/// Related skills of the selected matches, excluding the selected ones
/// themselves. First-seen order, no duplicates.
pub fn related_skills(selected: &[SkillMatch], skills: &OrderedMap<SkillDefinition>) -> Vec<String> {
    let selected_names: HashSet<&str> = selected.iter().map(|m| m.name.as_str()).collect();
    let mut seen = HashSet::new();
    let mut related = Vec::new();

    for m in selected {
        let Some(skill) = skills.get(&m.name) else {
            continue;
        };
        for name in &skill.related_skills {
            if !selected_names.contains(name.as_str()) && seen.insert(name.as_str()) {
                related.push(name.clone());
            }
        }
    }

    related
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(name: &str, score: u32, priority: i32) -> SkillMatch {
        SkillMatch {
            name: name.to_string(),
            score,
            reasons: vec![],
            priority,
        }
    }

    fn config(min: u32, max: usize) -> Config {
        Config {
            min_confidence_score: min,
            max_skills_to_show: max,
            show_match_reasons: true,
        }
    }

    fn names(matches: &[SkillMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(Confidence::from_score(9, 3), Confidence::High);
        assert_eq!(Confidence::from_score(8, 3), Confidence::Medium);
        assert_eq!(Confidence::from_score(6, 3), Confidence::Medium);
        assert_eq!(Confidence::from_score(5, 3), Confidence::Low);
        assert_eq!(Confidence::from_score(3, 3), Confidence::Low);
    }

    #[test]
    fn test_zero_minimum_is_always_high() {
        assert_eq!(Confidence::from_score(1, 0), Confidence::High);
        assert_eq!(Confidence::High.as_str(), "HIGH");
    }

    #[test]
    fn test_threshold_filter() {
        let selected = select(vec![hit("a", 2, 5), hit("b", 3, 5), hit("c", 0, 5)], &config(3, 5));
        assert_eq!(names(&selected), vec!["b"]);
    }

    #[test]
    fn test_zero_score_dropped_even_with_zero_minimum() {
        let selected = select(vec![hit("a", 0, 5), hit("b", 1, 5)], &config(0, 5));
        assert_eq!(names(&selected), vec!["b"]);
    }

    #[test]
    fn test_sort_by_score_then_priority() {
        let selected = select(
            vec![hit("y", 10, 3), hit("low", 4, 9), hit("x", 10, 8)],
            &config(1, 5),
        );
        assert_eq!(names(&selected), vec!["x", "y", "low"]);
    }

    #[test]
    fn test_sort_is_stable_on_full_ties() {
        let selected = select(
            vec![hit("first", 5, 5), hit("second", 5, 5), hit("third", 5, 5)],
            &config(1, 5),
        );
        assert_eq!(names(&selected), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_truncate_to_max() {
        let selected = select(
            vec![hit("a", 1, 5), hit("b", 2, 5), hit("c", 3, 5)],
            &config(1, 2),
        );
        assert_eq!(names(&selected), vec!["c", "b"]);
    }

    #[test]
    fn test_related_skills() {
        let rules = crate::rules::RuleStore::from_json(
            r#"{ "skills": {
                "a": { "relatedSkills": ["b", "c", "d"] },
                "b": { "relatedSkills": ["a", "d", "e"] },
                "c": {}
            } }"#,
        )
        .unwrap();

        let selected = vec![hit("a", 5, 5), hit("b", 4, 5)];
        assert_eq!(related_skills(&selected, &rules.skills), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_related_skills_may_name_filtered_matches() {
        let rules = crate::rules::RuleStore::from_json(
            r#"{ "skills": { "a": { "relatedSkills": ["b"] }, "b": {} } }"#,
        )
        .unwrap();
        // "b" scored but missed the cut; it still shows as related
        let selected = select(vec![hit("a", 5, 5), hit("b", 1, 5)], &config(3, 5));
        assert_eq!(related_skills(&selected, &rules.skills), vec!["b"]);
    }
}

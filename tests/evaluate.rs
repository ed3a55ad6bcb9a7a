use skill_eval::rules::lint;
use skill_eval::{analyze, evaluate, RuleStore};
use std::path::Path;

fn sample_rules() -> RuleStore {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("rules/skill-rules.json");
    RuleStore::load(&path).unwrap()
}

fn scores(prompt: &str, rules: &RuleStore) -> Vec<(String, u32)> {
    analyze(prompt, rules)
        .selected
        .into_iter()
        .map(|m| (m.name, m.score))
        .collect()
}

#[test]
fn test_sample_rules_lint_clean() {
    assert!(lint(&sample_rules()).is_empty());
}

#[test]
fn test_path_pattern_match() {
    let rules = RuleStore::from_json(
        r#"{
            "config": { "minConfidenceScore": 1 },
            "scoring": { "pathPattern": 3 },
            "skills": { "components": { "triggers": { "pathPatterns": ["src/components/**"] } } }
        }"#,
    )
    .unwrap();

    let evaluation = analyze("update src/components/Button.tsx", &rules);
    assert_eq!(evaluation.paths, vec!["src/components/Button.tsx"]);
    assert_eq!(evaluation.selected.len(), 1);
    assert!(evaluation.selected[0].score >= 3);
    assert_eq!(
        evaluation.selected[0].reasons,
        vec!["path \"src/components/Button.tsx\""]
    );

    let out = evaluation.render(&rules);
    assert!(out.contains("Detected file paths: src/components/Button.tsx\n"));
    assert!(out.contains("1. components (HIGH confidence)\n   Matched: path \"src/components/Button.tsx\"\n"));
}

#[test]
fn test_no_match_is_empty() {
    assert_eq!(evaluate("just chatting, no code here", &sample_rules()), "");
}

#[test]
fn test_exclusion_removes_skill() {
    let rules = RuleStore::from_json(
        r#"{
            "config": { "minConfidenceScore": 1 },
            "skills": {
                "testing": { "triggers": { "keywords": ["test"] }, "excludePatterns": ["don't.*test"] },
                "writing": { "triggers": { "keywords": ["write"] } }
            }
        }"#,
    )
    .unwrap();

    let out = evaluate("please don't write tests for this", &rules);
    assert!(out.contains("1. writing"));
    assert!(!out.contains("testing"));

    let sample = evaluate("please don't write tests for this", &sample_rules());
    assert!(!sample.contains("testing-patterns"));
}

#[test]
fn test_zero_minimum_labels_high() {
    let rules = RuleStore::from_json(
        r#"{
            "config": { "minConfidenceScore": 0 },
            "scoring": { "keyword": 1 },
            "skills": { "docs": { "triggers": { "keywords": ["readme"] } } }
        }"#,
    )
    .unwrap();

    assert!(evaluate("update the readme", &rules).contains("1. docs (HIGH confidence)"));
}

#[test]
fn test_priority_breaks_ties() {
    let rules = RuleStore::from_json(
        r#"{
            "config": { "minConfidenceScore": 1 },
            "scoring": { "keyword": 10 },
            "skills": {
                "y": { "triggers": { "keywords": ["deploy"] }, "priority": 3 },
                "x": { "triggers": { "keywords": ["deploy"] }, "priority": 8 }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(
        scores("deploy it", &rules),
        vec![("x".to_string(), 10), ("y".to_string(), 10)]
    );
    let out = evaluate("deploy it", &rules);
    assert!(out.contains("- x: YES - [your reasoning]\n- y: NO - [your reasoning]\n"));
}

#[test]
fn test_sample_component_and_test_prompt() {
    let rules = sample_rules();
    let prompt = "Add a unit test for src/components/Button.tsx";

    assert_eq!(
        scores(prompt, &rules),
        vec![
            ("react-ui-patterns".to_string(), 17),
            ("testing-patterns".to_string(), 12),
        ]
    );

    let evaluation = analyze(prompt, &rules);
    assert_eq!(evaluation.related, vec!["graphql-schema", "systematic-debugging"]);

    let out = evaluation.render(&rules);
    assert!(out.starts_with("<user-prompt-submit-hook>\nSKILL ACTIVATION REQUIRED\n\n"));
    assert!(out.contains(
        "1. react-ui-patterns (HIGH confidence)\n   Matched: keyword \"component\", keyword \"button\", intent detected\n"
    ));
    assert!(out.contains("2. testing-patterns (HIGH confidence)\n"));
    assert!(out.contains("\nRelated skills to consider: graphql-schema, systematic-debugging\n"));
    assert!(out.ends_with("DO NOT skip this step. Invoke relevant skills NOW.\n</user-prompt-submit-hook>"));
}

#[test]
fn test_sample_content_pattern_is_case_sensitive() {
    let rules = sample_rules();

    let out = evaluate("why does useQuery crash here", &rules);
    assert!(out.contains("1. systematic-debugging (MEDIUM confidence)"));
    assert!(out.contains("2. graphql-schema (LOW confidence)\n   Matched: keyword \"query\", code pattern detected\n"));

    // Without the code casing graphql-schema only has its keyword and misses the cut
    assert_eq!(
        scores("why does usequery crash here", &rules),
        vec![("systematic-debugging".to_string(), 6)]
    );
}

#[test]
fn test_sample_directory_mapping() {
    let rules = sample_rules();
    let evaluation = analyze("check .github/workflows/deploy.yml", &rules);

    assert_eq!(evaluation.selected.len(), 1);
    let m = &evaluation.selected[0];
    assert_eq!(m.name, "github-actions");
    assert_eq!(m.score, 11);
    assert_eq!(
        m.reasons,
        vec![
            "keyword \"workflow\"",
            "path \".github/workflows/deploy.yml\"",
            "directory mapping",
        ]
    );
}

#[test]
fn test_result_capped_at_max() {
    let rules = RuleStore::from_json(
        r#"{
            "config": { "minConfidenceScore": 1, "maxSkillsToShow": 2 },
            "skills": {
                "a": { "triggers": { "keywords": ["build"] } },
                "b": { "triggers": { "keywords": ["build", "app"] } },
                "c": { "triggers": { "keywords": ["build"] }, "priority": 9 }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(
        scores("build the app", &rules),
        vec![("b".to_string(), 4), ("c".to_string(), 2)]
    );
    let out = evaluate("build the app", &rules);
    assert!(!out.contains(". a ("));
}

#[test]
fn test_extra_keyword_never_lowers_score() {
    let rules = sample_rules();
    let before = scores("fix this bug", &rules);
    let after = scores("fix this bug, it is a crash", &rules);

    let score_of = |list: &[(String, u32)]| {
        list.iter()
            .find(|(n, _)| n == "systematic-debugging")
            .map(|(_, s)| *s)
            .unwrap()
    };
    assert!(score_of(&after[..]) >= score_of(&before[..]));
}

#[test]
fn test_evaluate_is_deterministic() {
    let rules = sample_rules();
    let prompt = "Add a unit test for src/components/Button.tsx and src/graphql/user.gql";
    let first = evaluate(prompt, &rules);
    assert!(!first.is_empty());
    for _ in 0..5 {
        assert_eq!(evaluate(prompt, &rules), first);
    }
}

//! Skill Eval hook binary
//!
//! Runs as a Claude Code `UserPromptSubmit` hook.
//!
//! # Input (via stdin)
//! JSON with at least a `prompt` field. Anything that is not JSON is used as
//! the prompt verbatim.
//!
//! # Output (via stdout)
//! A `<user-prompt-submit-hook>` block listing matched skills, or nothing.
//!
//! The hook never blocks the prompt: every failure is logged to stderr and the
//! process exits 0.

use clap::Parser;
use colored::{ColoredString, Colorize};
use std::io::{self, Read};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

use skill_eval::hook::{extract_prompt, is_blank};
use skill_eval::rules::{candidate_paths, lint, resolve_rules_path, RuleStore};
use skill_eval::{analyze, Confidence, EvalError};

/// Longest prompt prefix written to the logs
const LOG_PREVIEW_CHARS: usize = 50;

#[derive(Parser, Debug)]
#[command(name = "skill-eval", version, about = "Suggest skills to activate for a prompt")]
struct Cli {
    /// Rules document (defaults to skill-rules.json next to the binary,
    /// then .claude/hooks/ in the current directory, then in the home directory)
    #[arg(long, env = "SKILL_EVAL_RULES")]
    rules: Option<PathBuf>,

    /// Evaluate this prompt instead of reading the hook payload from stdin
    #[arg(long)]
    prompt: Option<String>,

    /// Lint the rules document and exit
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.check {
        return check(&cli);
    }

    if let Err(e) = run(&cli) {
        error!("Skill evaluation skipped: {}", e);
    }
    // Exit 0 to not block Claude
    ExitCode::SUCCESS
}

fn load_rules(cli: &Cli) -> Result<RuleStore, EvalError> {
    let path = resolve_rules_path(cli.rules.as_deref(), &candidate_paths())?;
    debug!("Loading rules from: {:?}", path);
    let rules = RuleStore::load(&path)?;
    info!(
        "Loaded {} skills and {} directory mappings",
        rules.skills.len(),
        rules.directory_mappings.len()
    );
    Ok(rules)
}

fn run(cli: &Cli) -> Result<(), EvalError> {
    let prompt = match &cli.prompt {
        Some(p) => p.clone(),
        None => {
            // Hook payloads are not guaranteed to be valid UTF-8
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            let input = String::from_utf8_lossy(&bytes);
            debug!("Received input: {}", input);
            extract_prompt(&input)
        }
    };

    if is_blank(&prompt) {
        debug!("Empty prompt, nothing to evaluate");
        return Ok(());
    }

    let rules = load_rules(cli)?;

    info!("Processing prompt: {}", preview(&prompt));

    let (evaluation, output) = match panic::catch_unwind(panic::AssertUnwindSafe(|| {
        let evaluation = analyze(&prompt, &rules);
        let output = evaluation.render(&rules);
        (evaluation, output)
    })) {
        Ok(result) => result,
        Err(_) => {
            error!("Skill evaluation failed unexpectedly");
            return Ok(());
        }
    };

    debug!("Detected paths: {:?}", evaluation.paths);

    if output.is_empty() {
        debug!("No matches found");
        return Ok(());
    }

    for m in &evaluation.selected {
        let confidence = Confidence::from_score(m.score, rules.config.min_confidence_score);
        info!(
            "{} (score: {}, priority: {}, confidence: {}) - {}",
            m.name.bold(),
            m.score,
            m.priority,
            paint(confidence),
            m.reasons.join(", ")
        );
    }

    println!("{}", output);

    Ok(())
}

fn check(cli: &Cli) -> ExitCode {
    let rules = match load_rules(cli) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let findings = lint(&rules);
    if findings.is_empty() {
        println!(
            "{} {} skills, no problems found",
            "ok:".green().bold(),
            rules.skills.len()
        );
        return ExitCode::SUCCESS;
    }

    for finding in &findings {
        warn!("{}", finding);
        println!("{} {}", "warning:".yellow().bold(), finding);
    }
    println!("{} problem(s) found", findings.len());
    ExitCode::FAILURE
}

fn paint(confidence: Confidence) -> ColoredString {
    match confidence {
        Confidence::High => confidence.as_str().green(),
        Confidence::Medium => confidence.as_str().yellow(),
        Confidence::Low => confidence.as_str().red(),
    }
}

fn preview(prompt: &str) -> String {
    prompt.chars().take(LOG_PREVIEW_CHARS).collect()
}

//! Error taxonomy for the hook.
//!
//! None of these ever reach the user as a failed hook: the binary logs them
//! and exits 0 so the prompt is never blocked.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Failed to read stdin: {0}")]
    StdinRead(#[from] io::Error),

    #[error("Skill rules not found (searched: {})", format_searched(.0))]
    RulesNotFound(Vec<PathBuf>),

    #[error("Failed to read skill rules from {path}: {source}")]
    RulesRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse skill rules: {0}")]
    RulesParse(#[from] serde_json::Error),

    #[error("Invalid skill rules: {0}")]
    RulesInvalid(String),
}

fn format_searched(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, EvalError>;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("No JSON payload found in reviewer output: {raw:?}")]
    NoJson { raw: String },

    #[error("Violations array does not match the expected shape: {0}")]
    InvalidViolation(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Failed to reach the GitHub API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API rejected the comment (status {status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list prompt sections in '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported prompt instruction: {0}")]
    UnsupportedInstruction(String),

    #[error("Failed to write rendered prompt: {0}")]
    Write(#[from] std::io::Error),
}

//! Typed error hierarchy for the analysis pipeline.
//!
//! Every stage of the pipeline (lexer, parser, classifier, math engine,
//! asymptotic engine) reports failures through [`CoreError`]. The
//! Orchestrator is the only place that converts a `CoreError` into a
//! human-readable sentinel stored on `AnalysisResult::error`; nothing
//! below it ever panics on malformed-but-syntactically-valid input.

use thiserror::Error;

/// A position in the source pseudocode, 1-indexed like most editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {location}")]
    UnexpectedChar { ch: char, location: SourceLocation },
}

/// Malformed pseudocode. Mirrors the `ParseError{line,column,message}`
/// contract of the grammar (spec §4.1): the first failure is reported,
/// error recovery is a non-goal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at {location}: {message}")]
pub struct SyntaxError {
    pub location: SourceLocation,
    pub offending_token: String,
    pub message: String,
}

/// Internal analysis failure occurring after a successful parse.
/// Grammar-level shape invariants (duplicate names, non-boolean
/// conditions) are already rejected by the parser as `SyntaxError`;
/// this variant covers the one failure that can only be detected once
/// the whole `Program` is visible: a CLI/embedding caller naming a
/// function hint that isn't declared anywhere in the source. Never
/// escapes the Orchestrator boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("unresolved call target: {name}")]
    UnresolvedCall { name: String },
}

/// Top-level error type threaded through the pipeline's internal
/// `Result`-returning stages. The Orchestrator is the sole consumer
/// that converts this into a sentinel-filled `AnalysisResult`; no other
/// caller should need to match on it directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

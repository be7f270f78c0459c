//! Error types for the email training engine.

use thiserror::Error;

/// Failures surfaced by the prompt/invoke/parse pipeline.
///
/// Nothing here is retried internally; the first failure propagates to the
/// caller untouched. A grading parse failure in particular must never be
/// softened into a zero-score result.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Prompt composition was asked to render a scenario that is missing a
    /// required field.
    #[error("scenario field '{0}' is required but empty")]
    Template(String),

    /// The text-generation backend was unreachable or returned an error.
    #[error("model invocation failed: {0}")]
    ModelInvocation(#[from] reqwest::Error),

    /// The grading response was not the expected JSON shape.
    #[error("grading output malformed: {0}")]
    GradingFormat(String),
}

//! Error types for the opener pipeline and the report generator.
//!
//! Each pipeline stage has its own enum; [`OpenerError`] wraps them so the
//! orchestrator can log any failure the same way.

use thiserror::Error;

use crate::llm::LlmError;

/// Errors reading conversation history from the state holder.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history unavailable: {0}")]
    Unavailable(String),
}

/// Errors building a prompt from a conversation.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("turn {index} has no bot reply but is not the last turn")]
    PendingTurnNotLast { index: usize },
}

/// Errors cleaning up raw model output.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("model returned an empty completion")]
    EmptyCompletion,

    #[error("unexpected completion shape: {0}")]
    UnexpectedShape(String),
}

/// Any failure inside the opener pipeline.
///
/// The pipeline never surfaces these to its caller; they are logged and
/// replaced by a fallback opener.
#[derive(Debug, Error)]
pub enum OpenerError {
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Errors converting an evaluation log to a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid log record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_error_display() {
        let err = PromptError::PendingTurnNotLast { index: 1 };
        assert_eq!(
            err.to_string(),
            "turn 1 has no bot reply but is not the last turn"
        );
    }

    #[test]
    fn test_opener_error_is_transparent() {
        let err: OpenerError = LlmError::NoWorker("vicuna-13b".to_string()).into();
        assert_eq!(err.to_string(), "no worker available for model 'vicuna-13b'");

        let err: OpenerError = FilterError::EmptyCompletion.into();
        assert!(matches!(err, OpenerError::Filter(_)));
    }

    #[test]
    fn test_report_error_display() {
        let err = ReportError::InvalidRecord {
            line: 3,
            reason: "missing field `text`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid log record on line 3: missing field `text`"
        );
    }
}

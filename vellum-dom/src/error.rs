use pest::error::{Error as PestError, LineColLocation};
use thiserror::Error;

use crate::parse::Rule;

/// Markup that the fragment grammar rejects: unclosed or mismatched tags,
/// stray close tags, unterminated attribute quotes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed markup at {line}:{column}: {message}")]
pub struct MarkupError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<PestError<Rule>> for MarkupError {
    fn from(err: PestError<Rule>) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        Self {
            line,
            column,
            message: err.variant.message().into_owned(),
        }
    }
}

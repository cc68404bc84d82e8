use thiserror::Error;
use vellum_core::{DataError, ValueKind};
use vellum_dom::MarkupError;

use crate::interpolate::InterpolationError;

/// Every failure aborts the whole execution; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("unknown directive: {0}")]
    UnknownDirective(String),

    #[error("unknown data field: {0}")]
    UnknownDataField(String),

    #[error("data field `{field}` is not of type {expected} (found {found})")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("sequence not found for field: {0}")]
    SequenceNotFound(String),

    #[error("data field `{field}` is not a sequence (found {found})")]
    NotSequence { field: String, found: ValueKind },

    #[error("malformed for expression `{0}`, expected `<var> in <field>`")]
    MalformedForExpression(String),

    #[error("component `{component}` nests deeper than {limit} levels")]
    ComponentDepth { component: String, limit: usize },

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

impl From<DataError> for TemplateError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::UnknownField(field) => TemplateError::UnknownDataField(field),
            DataError::TypeMismatch {
                field,
                expected,
                found,
            } => TemplateError::TypeMismatch {
                field,
                expected,
                found,
            },
            DataError::NotARecord(found) => TemplateError::TypeMismatch {
                field: String::new(),
                expected: ValueKind::Record,
                found,
            },
        }
    }
}

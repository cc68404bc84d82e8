use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("unknown data field: {0}")]
    UnknownField(String),

    #[error("data field `{field}` is not of type {expected} (found {found})")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("data must be a record of fields, found {0}")]
    NotARecord(ValueKind),
}

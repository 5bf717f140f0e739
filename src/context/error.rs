use thiserror::Error;

use super::ValueKind;
use crate::clock::Timestamp;

/// Error type for cell and store updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The update names a field the store's schema does not define.
    #[error("unknown context field: {field}")]
    UnknownField { field: String },
    /// A toggle was requested on a field that does not hold a boolean.
    #[error("cannot toggle field {field}: holds {kind}, not bool")]
    InvalidToggleType { field: String, kind: ValueKind },
    /// A replacement value does not match the kind the schema declares.
    #[error("field {field} expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        found: ValueKind,
    },
    /// A schema declares a field whose name collides with a store-level key.
    #[error("field name {field} is reserved for the store itself")]
    ReservedField { field: String },
    /// A non-forced write carried a timestamp older than the stored one.
    #[error("stale write to {id}: stored {stored:?}, attempted {attempted:?}")]
    StaleWrite {
        id: String,
        stored: Timestamp,
        attempted: Timestamp,
    },
}

// ─── Error ──────────────────────────────────────────────────────────────────
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ObjectError {
    #[error("\"{0}\" is a protected property, use a different key")]
    ProtectedField(SmolStr),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("The iterator class \"{0}\" does not exist")]
    InvalidIterator(SmolStr),
    #[error("\"{field}\" does not have a callable \"{accessor}\" accessor method which must be defined")]
    UndefinedAccessor { field: SmolStr, accessor: String },
    #[error("The property \"{field}\" cannot be unset as NULL is an invalid value for it")]
    InvalidNullAssignment { field: SmolStr },
    #[error("Invalid value for \"{field}\": {reason}")]
    InvalidValue { field: SmolStr, reason: String },
    #[error("Invalid serialized blob: {0}")]
    InvalidBlob(String),
    #[error("CBOR error: {0}")]
    Cbor(String),
}

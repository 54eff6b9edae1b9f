use super::*;
use thiserror::Error;

/// Failures raised while building or deserializing a COSE message.
#[derive(Error, Debug)]
pub enum Error {
    /// Both protected header forms were supplied to the same builder.
    #[error("Cannot set both protected header bytes and a protected header map")]
    ConflictingProtectedHeaders,

    /// `build()` was called before a required field was set.
    #[error("{message} is missing required field '{field}'")]
    MissingField {
        message: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failures raised when bytes do not describe a well-formed COSE structure.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("{message} must be an array of {expected} items, found {received}")]
    ArityMismatch {
        message: &'static str,
        expected: usize,
        received: usize,
    },

    #[error("Failed to parse {field}: {source}")]
    TypeMismatch {
        field: &'static str,
        source: cbor::value::Error,
    },

    #[error("Expected CBOR tag {expected}, found tag {found}")]
    UnexpectedTag { expected: u64, found: u64 },

    #[error(transparent)]
    MalformedInput(#[from] cbor::decode::Error),
}

/// Attaches the name of the field being decoded to a CBOR value access error.
pub trait CaptureFieldErr<T> {
    fn map_field_err(self, field: &'static str) -> Result<T, DecodeError>;
}

impl<T> CaptureFieldErr<T> for Result<T, cbor::value::Error> {
    fn map_field_err(self, field: &'static str) -> Result<T, DecodeError> {
        self.map_err(|source| DecodeError::TypeMismatch { field, source })
    }
}

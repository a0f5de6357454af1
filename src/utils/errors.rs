use std::io;

use thiserror::Error;

use crate::utils::types::Oid;

/// Central error enum for the crate.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("object with ID {0} not found")]
    NotFound(Oid),

    #[error("dimensionality mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cannot parse distance value {input:?}: required pattern is {pattern:?}")]
    ParseDistance { input: String, pattern: &'static str },

    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("backend {backend:?} does not support {missing}")]
    CapabilityMismatch {
        backend: &'static str,
        missing: String,
    },

    #[error("duplicate object ID {0}")]
    DuplicateOid(Oid),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

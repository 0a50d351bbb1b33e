use core::fmt;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = ProtocolError> = core::result::Result<T, E>;

/// Message field that carries an independent check encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Channel,
    Operation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Channel => f.write_str("channel"),
            Field::Operation => f.write_str("operation"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("{field} verification failed: value {forward} does not match check value {check}")]
    VerificationFailed { field: Field, forward: u8, check: u8 },
    #[error("intensity out of range: {0} (maximum is 100)")]
    IntensityOutOfRange(u32),
    #[error("parsing failed: unknown {what} {input:?}")]
    Unparsable { what: &'static str, input: String },
    #[error("invalid bit string: {0}")]
    InvalidBitString(String),
}

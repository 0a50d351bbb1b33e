use thiserror::Error;

pub type Result<T, E = TransportError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid arguments: {0}")]
    InvalidArgument(String),
    #[error("GPIO error: {0}")]
    Gpio(String),
}

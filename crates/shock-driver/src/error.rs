use bit_transport::TransportError;
use core::fmt;
use thiserror::Error;

pub type Result<T, E = DriverError> = core::result::Result<T, E>;

/// Underlying cause reported by a driver constructor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which registry a driver name is looked up in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DriverKind {
    Encoder,
    Transport,
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverKind::Encoder => f.write_str("encoder"),
            DriverKind::Transport => f.write_str("transport"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("syntax error in driver string at column {column}: {message}")]
    Syntax { column: usize, message: String },
    #[error("invalid driver count {0}: expected an encoder and at most one transport")]
    DriverCount(usize),
    #[error("{kind} driver {name:?} not found")]
    UnknownDriver { kind: DriverKind, name: String },
    #[error("error initializing {kind} driver {name:?}: {source}")]
    Init {
        kind: DriverKind,
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("encoder {0:?} cannot be bound to a transport")]
    NotBindable(String),
    #[error("no transport bound to encoder")]
    TransportUnbound,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

//! shock-protocol: the digital control message understood by Petrainer-style shock collars
//!
//! A [`Message`] is a fixed sequence of 42 bits. Callers set channel, operation and intensity,
//! then call [`Message::finalize`] to stamp the constant header, opaque and footer regions
//! before handing the message to an encoder.

mod error;
pub use error::{Field, ProtocolError, Result};

mod types;
pub use types::{Channel, Intensity, Operation};

mod bits;
pub use bits::bitstring;

mod message;
pub use message::{Decoded, Message, MESSAGE_BITS};

mod report;
pub use report::{FieldReport, MessageReport};

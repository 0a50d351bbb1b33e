//! bit-transport: timed output of binary levels
//!
//! A [`BitTransport`] drives an ordered sequence of levels, holding each one for at least a
//! given interval. Backends are feature-gated; the default build enables a `mock` backend that
//! records what it was asked to emit so binaries and tests run on any host.

mod error;
pub use error::{Result, TransportError};

mod traits;
pub use traits::BitTransport;

mod pacing;
pub use pacing::pace;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::{MockTransport, RecordedLevel, Transmission, TransmissionLog};

#[cfg(feature = "raspi-gpio")]
mod gpio;

#[cfg(feature = "raspi-gpio")]
pub use gpio::GpioTransport;

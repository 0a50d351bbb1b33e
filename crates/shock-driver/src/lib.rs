//! shock-driver: compose message encoders and bit transports from a driver string
//!
//! A driver string such as `softpwm raspi_gpio 17` names an encoder and, optionally, the
//! transport it emits through. [`DriverRegistry::setup`] parses the string, looks both names
//! up, constructs them with their arguments and binds the transport to the encoder.

mod error;
pub use error::{BoxError, DriverError, DriverKind, Result};

mod driver_spec;
pub use driver_spec::{parse_driver_spec, parse_entries, DriverChain, DriverSpec};

mod encoder;
pub use encoder::{Bindable, BoxedTransport, MessageEncoder};

mod registry;
pub use registry::{BoxedEncoder, DriverRegistry, EncoderConstructor, TransportConstructor};

mod compose;
pub use compose::setup;

mod softpwm;
pub use softpwm::{frame, SoftPwm, DEFAULT_INTERVAL, MAX_INTERVAL};

mod log_encoder;
pub use log_encoder::LogEncoder;

mod builtin;
pub use builtin::{builtin_registry, BUILTIN_DRIVERS};

mod metrics;
pub use metrics::SendMetrics;

//! Drivers shipped with this crate and the initialization list that registers them.

use crate::{BoxedEncoder, BoxedTransport, DriverRegistry, LogEncoder, SoftPwm};

pub fn register_softpwm(registry: &mut DriverRegistry) {
    registry.register_encoder("softpwm", |args| {
        Ok(Box::new(SoftPwm::from_args(args)?) as BoxedEncoder)
    });
}

pub fn register_log(registry: &mut DriverRegistry) {
    registry.register_encoder("log", |args| {
        Ok(Box::new(LogEncoder::from_args(args)?) as BoxedEncoder)
    });
}

#[cfg(feature = "mock")]
pub fn register_mock(registry: &mut DriverRegistry) {
    registry.register_transport("mock", |args| {
        Ok(Box::new(bit_transport::MockTransport::from_args(args)?) as BoxedTransport)
    });
}

#[cfg(feature = "raspi-gpio")]
pub fn register_raspi_gpio(registry: &mut DriverRegistry) {
    registry.register_transport("raspi_gpio", |args| {
        Ok(Box::new(bit_transport::GpioTransport::from_args(args)?) as BoxedTransport)
    });
}

/// Every driver compiled into this build, in registration order.
pub const BUILTIN_DRIVERS: &[fn(&mut DriverRegistry)] = &[
    register_softpwm,
    register_log,
    #[cfg(feature = "mock")]
    register_mock,
    #[cfg(feature = "raspi-gpio")]
    register_raspi_gpio,
];

/// A registry populated from [`BUILTIN_DRIVERS`].
pub fn builtin_registry() -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    for register in BUILTIN_DRIVERS {
        register(&mut registry);
    }
    tracing::debug!(
        encoders = ?registry.encoder_names(),
        transports = ?registry.transport_names(),
        "registered builtin drivers"
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names() {
        let reg = builtin_registry();
        assert_eq!(reg.encoder_names(), vec!["log", "softpwm"]);
        #[cfg(feature = "mock")]
        assert!(reg.transport_names().contains(&"mock"));
    }

    #[test]
    fn log_encoder_is_not_bindable() {
        let reg = builtin_registry();
        assert!(matches!(
            reg.setup("log mock"),
            Err(crate::DriverError::NotBindable(_))
        ));
    }
}

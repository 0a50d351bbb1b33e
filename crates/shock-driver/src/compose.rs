use crate::{
    parse_driver_spec, BoxedEncoder, BoxedTransport, DriverError, DriverKind, DriverRegistry,
    DriverSpec, Result,
};

impl DriverRegistry {
    /// Build a ready-to-use encoder from a driver string such as `softpwm raspi_gpio 17`.
    ///
    /// The first entry names the encoder. A second entry names a transport, which is only
    /// constructed once the encoder has been checked for the binding capability.
    pub fn setup(&self, driver_string: &str) -> Result<BoxedEncoder> {
        let chain = parse_driver_spec(driver_string)?;
        let mut encoder = self.construct_encoder(&chain.encoder)?;

        let Some(transport_spec) = chain.transport else {
            tracing::info!(encoder = %chain.encoder, "encoder ready");
            return Ok(encoder);
        };

        let Some(bindable) = encoder.as_bindable() else {
            return Err(DriverError::NotBindable(chain.encoder.name));
        };
        let transport = self.construct_transport(&transport_spec)?;
        bindable.bind(transport)?;
        tracing::info!(
            encoder = %chain.encoder,
            transport = %transport_spec,
            "encoder ready, transport bound"
        );
        Ok(encoder)
    }

    fn construct_encoder(&self, spec: &DriverSpec) -> Result<BoxedEncoder> {
        let constructor = self
            .encoder(&spec.name)
            .ok_or_else(|| DriverError::UnknownDriver {
                kind: DriverKind::Encoder,
                name: spec.name.clone(),
            })?;
        constructor(&spec.args).map_err(|source| DriverError::Init {
            kind: DriverKind::Encoder,
            name: spec.name.clone(),
            source,
        })
    }

    fn construct_transport(&self, spec: &DriverSpec) -> Result<BoxedTransport> {
        let constructor = self
            .transport(&spec.name)
            .ok_or_else(|| DriverError::UnknownDriver {
                kind: DriverKind::Transport,
                name: spec.name.clone(),
            })?;
        constructor(&spec.args).map_err(|source| DriverError::Init {
            kind: DriverKind::Transport,
            name: spec.name.clone(),
            source,
        })
    }
}

/// Free-function form of [`DriverRegistry::setup`].
pub fn setup(registry: &DriverRegistry, driver_string: &str) -> Result<BoxedEncoder> {
    registry.setup(driver_string)
}

use crate::{BoxError, BoxedTransport, MessageEncoder};
use std::collections::HashMap;

/// A ready-to-use encoder, possibly with a transport bound to it.
pub type BoxedEncoder = Box<dyn MessageEncoder + Send>;

pub type EncoderConstructor =
    Box<dyn Fn(&[String]) -> Result<BoxedEncoder, BoxError> + Send + Sync>;

pub type TransportConstructor =
    Box<dyn Fn(&[String]) -> Result<BoxedTransport, BoxError> + Send + Sync>;

/// Name to constructor maps for encoders and transports.
///
/// Built once by the entry point (see [`crate::builtin_registry`]) and only read afterwards.
/// Registering a name twice replaces the earlier constructor.
#[derive(Default)]
pub struct DriverRegistry {
    encoders: HashMap<String, EncoderConstructor>,
    transports: HashMap<String, TransportConstructor>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_encoder<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&[String]) -> Result<BoxedEncoder, BoxError> + Send + Sync + 'static,
    {
        if self
            .encoders
            .insert(name.to_string(), Box::new(constructor))
            .is_some()
        {
            tracing::debug!(name, "replaced encoder registration");
        }
    }

    pub fn register_transport<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&[String]) -> Result<BoxedTransport, BoxError> + Send + Sync + 'static,
    {
        if self
            .transports
            .insert(name.to_string(), Box::new(constructor))
            .is_some()
        {
            tracing::debug!(name, "replaced transport registration");
        }
    }

    pub fn encoder(&self, name: &str) -> Option<&EncoderConstructor> {
        self.encoders.get(name)
    }

    pub fn transport(&self, name: &str) -> Option<&TransportConstructor> {
        self.transports.get(name)
    }

    /// Registered encoder names, sorted.
    pub fn encoder_names(&self) -> Vec<&str> {
        sorted_keys(&self.encoders)
    }

    /// Registered transport names, sorted.
    pub fn transport_names(&self) -> Vec<&str> {
        sorted_keys(&self.transports)
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use shock_protocol::Message;

    struct Tagged;

    impl MessageEncoder for Tagged {
        fn output(&mut self, _message: &Message) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lookup_by_name() {
        let mut reg = DriverRegistry::new();
        reg.register_encoder("tagged", |_| Ok(Box::new(Tagged) as BoxedEncoder));
        assert!(reg.encoder("tagged").is_some());
        assert!(reg.encoder("missing").is_none());
        assert!(reg.transport("tagged").is_none());
    }

    #[test]
    fn registering_twice_replaces() {
        let mut reg = DriverRegistry::new();
        reg.register_encoder("x", |_| Err("first".into()));
        reg.register_encoder("x", |_| Err("second".into()));
        assert_eq!(reg.encoder_names(), vec!["x"]);
        let ctor = reg.encoder("x").unwrap();
        let err = ctor(&[]).err().unwrap();
        assert_eq!(err.to_string(), "second");
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = DriverRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            reg.register_encoder(name, |_| Ok(Box::new(Tagged) as BoxedEncoder));
        }
        assert_eq!(reg.encoder_names(), vec!["alpha", "mid", "zeta"]);
        assert!(reg.transport_names().is_empty());
    }
}

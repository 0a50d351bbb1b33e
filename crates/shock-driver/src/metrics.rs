use crate::{BoxedEncoder, DriverError};
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use shock_protocol::Message;

/// Counters for messages pushed through an encoder.
#[derive(Clone)]
pub struct SendMetrics {
    registry: Registry,
    pub messages_sent: IntCounter,
    pub send_failures: IntCounter,
}

impl SendMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let messages_sent =
            IntCounter::new("shock_messages_sent", "Messages handed to the transport")?;
        let send_failures =
            IntCounter::new("shock_send_failures", "Messages whose output call failed")?;
        registry.register(Box::new(messages_sent.clone()))?;
        registry.register(Box::new(send_failures.clone()))?;
        Ok(Self {
            registry,
            messages_sent,
            send_failures,
        })
    }

    /// Send through `encoder`, counting the outcome.
    pub fn output(&self, encoder: &mut BoxedEncoder, message: &Message) -> Result<(), DriverError> {
        match encoder.output(message) {
            Ok(()) => {
                self.messages_sent.inc();
                Ok(())
            }
            Err(e) => {
                self.send_failures.inc();
                Err(e)
            }
        }
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogEncoder, SoftPwm};

    #[test]
    fn counts_success_and_failure() {
        let metrics = SendMetrics::new().unwrap();
        let mut ok: BoxedEncoder = Box::new(LogEncoder::default());
        let mut unbound: BoxedEncoder = Box::new(SoftPwm::new(crate::DEFAULT_INTERVAL));
        let msg = Message::new().finalize();

        metrics.output(&mut ok, &msg).unwrap();
        metrics.output(&mut ok, &msg).unwrap();
        assert!(metrics.output(&mut unbound, &msg).is_err());

        assert_eq!(metrics.messages_sent.get(), 2);
        assert_eq!(metrics.send_failures.get(), 1);
        let text = metrics.encode_text();
        assert!(text.contains("shock_messages_sent 2"));
        assert!(text.contains("shock_send_failures 1"));
    }
}

use crate::{BoxError, MessageEncoder, Result};
use shock_protocol::Message;

/// Standalone encoder that only logs what it would send. It cannot be bound to a transport.
#[derive(Debug, Default)]
pub struct LogEncoder {
    sent: u64,
}

impl LogEncoder {
    pub fn from_args(args: &[String]) -> Result<Self, BoxError> {
        if !args.is_empty() {
            return Err("log takes no arguments".into());
        }
        Ok(Self::default())
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl MessageEncoder for LogEncoder {
    fn output(&mut self, message: &Message) -> Result<()> {
        self.sent += 1;
        let report = message.report();
        if report.is_verified() {
            tracing::info!(seq = self.sent, "{report}");
        } else {
            tracing::warn!(seq = self.sent, "{report}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_messages_and_rejects_binding() {
        let mut enc = LogEncoder::from_args(&[]).unwrap();
        enc.output(&Message::new().finalize()).unwrap();
        enc.output(&Message::new().finalize()).unwrap();
        assert_eq!(enc.sent(), 2);
        assert!(enc.as_bindable().is_none());
        assert!(LogEncoder::from_args(&["x".into()]).is_err());
    }
}

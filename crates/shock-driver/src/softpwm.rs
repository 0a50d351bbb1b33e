use crate::{Bindable, BoxError, BoxedTransport, DriverError, MessageEncoder, Result};
use shock_protocol::Message;
use std::time::Duration;

const PREAMBLE: &str = "00000000000000011111";
const TRAILER: &str = "";

/// Symbol interval used unless the driver string overrides it.
pub const DEFAULT_INTERVAL: Duration = Duration::from_micros(250);

/// Longest symbol interval accepted from a driver string.
pub const MAX_INTERVAL: Duration = Duration::from_secs(1);

/// Software framing encoder.
///
/// Each message bit becomes four symbols: a `1` start marker, the bit twice, a `0` stop
/// marker. The frame is the preamble, the symbols, then the trailer, clocked out through the
/// bound transport at a fixed interval.
pub struct SoftPwm {
    interval: Duration,
    transport: Option<BoxedTransport>,
}

impl SoftPwm {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            transport: None,
        }
    }

    /// Construct from driver arguments: an optional symbol interval in microseconds.
    pub fn from_args(args: &[String]) -> Result<Self, BoxError> {
        match args {
            [] => Ok(Self::new(DEFAULT_INTERVAL)),
            [us] => {
                let us: u64 = us
                    .parse()
                    .map_err(|e| format!("parsing interval {us:?} (microseconds): {e}"))?;
                let interval = Duration::from_micros(us);
                if interval.is_zero() || interval > MAX_INTERVAL {
                    return Err(format!(
                        "interval {us} microseconds out of range 1..={}",
                        MAX_INTERVAL.as_micros()
                    )
                    .into());
                }
                Ok(Self::new(interval))
            }
            _ => Err("softpwm takes at most one argument: symbol interval in microseconds".into()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// The symbol stream for one message.
pub fn frame(message: &Message) -> Vec<bool> {
    let bits = message.bits();
    let mut out = Vec::with_capacity(PREAMBLE.len() + bits.len() * 4 + TRAILER.len());
    out.extend(PREAMBLE.bytes().map(|b| b == b'1'));
    for &bit in bits {
        out.extend_from_slice(&[true, bit, bit, false]);
    }
    out.extend(TRAILER.bytes().map(|b| b == b'1'));
    out
}

impl MessageEncoder for SoftPwm {
    fn output(&mut self, message: &Message) -> Result<()> {
        let transport = self.transport.as_mut().ok_or(DriverError::TransportUnbound)?;
        let symbols = frame(message);
        tracing::trace!(%message, symbols = symbols.len(), "softpwm frame");
        transport.output(&symbols, self.interval)?;
        Ok(())
    }

    fn as_bindable(&mut self) -> Option<&mut dyn Bindable> {
        Some(self)
    }
}

impl Bindable for SoftPwm {
    fn bind(&mut self, transport: BoxedTransport) -> Result<()> {
        self.transport = Some(transport);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shock_protocol::{bitstring, Channel, Operation};

    fn shock_38() -> Message {
        Message::new()
            .with_channel(Channel::ONE)
            .with_operation(Operation::SHOCK)
            .with_intensity(38u8)
            .finalize()
    }

    #[test]
    fn frame_layout() {
        let symbols = frame(&shock_38());
        assert_eq!(symbols.len(), 20 + 42 * 4);
        assert_eq!(
            bitstring(&symbols[..40]),
            "0000000000000001111110001110100010001000"
        );
        // the final message bit is a footer 0
        assert_eq!(bitstring(&symbols[symbols.len() - 4..]), "1000");
    }

    #[test]
    fn every_bit_is_framed() {
        let msg = shock_38();
        let symbols = frame(&msg);
        for (i, &bit) in msg.bits().iter().enumerate() {
            let group = &symbols[20 + i * 4..20 + i * 4 + 4];
            assert_eq!(group, &[true, bit, bit, false], "bit {i}");
        }
    }

    #[test]
    fn unbound_output_fails() {
        let mut enc = SoftPwm::new(DEFAULT_INTERVAL);
        assert!(matches!(
            enc.output(&shock_38()),
            Err(DriverError::TransportUnbound)
        ));
    }

    #[test]
    fn interval_argument() {
        assert_eq!(SoftPwm::from_args(&[]).unwrap().interval(), DEFAULT_INTERVAL);
        assert_eq!(
            SoftPwm::from_args(&["500".into()]).unwrap().interval(),
            Duration::from_micros(500)
        );
        assert!(SoftPwm::from_args(&["0".into()]).is_err());
        assert_eq!(
            SoftPwm::from_args(&["1000000".into()]).unwrap().interval(),
            MAX_INTERVAL
        );
        assert!(SoftPwm::from_args(&["1000001".into()]).is_err());
        assert!(SoftPwm::from_args(&["18446744073709551615".into()]).is_err());
        assert!(SoftPwm::from_args(&["fast".into()]).is_err());
        assert!(SoftPwm::from_args(&["1".into(), "2".into()]).is_err());
    }
}

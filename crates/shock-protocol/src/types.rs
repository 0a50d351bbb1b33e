use crate::{ProtocolError, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Channel the message is sent on, a 4-bit value.
///
/// One remote talks on two channels. Other 4-bit values are representable and encode
/// like any other, but no device is known to listen on them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Channel(u8);

impl Channel {
    pub const ONE: Channel = Channel(0);
    pub const TWO: Channel = Channel(14);

    /// Build a channel from a raw value; only the low 4 bits are kept.
    pub const fn from_raw(raw: u8) -> Self {
        Channel(raw & 0x0F)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub fn is_known(self) -> bool {
        self == Self::ONE || self == Self::TWO
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ONE => f.write_str("1"),
            Self::TWO => f.write_str("2"),
            Channel(raw) => write!(f, "unknown channel ({raw})"),
        }
    }
}

impl FromStr for Channel {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(Self::ONE),
            "2" => Ok(Self::TWO),
            other => Err(ProtocolError::Unparsable {
                what: "channel",
                input: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Channel {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Channel> for String {
    fn from(ch: Channel) -> Self {
        ch.to_string()
    }
}

/// What the receiver should do, a 3-bit value.
///
/// The known values look like a bitmask but are compared by equality, never combined.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Operation(u8);

impl Operation {
    /// Deliver an electric pulse at the message intensity.
    pub const SHOCK: Operation = Operation(1);
    /// Vibrate at the message intensity.
    pub const VIBRATE: Operation = Operation(2);
    /// Beep; intensity is ignored by the receiver.
    pub const BEEP: Operation = Operation(4);

    /// Build an operation from a raw value; only the low 3 bits are kept.
    pub const fn from_raw(raw: u8) -> Self {
        Operation(raw & 0x07)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::SHOCK | Self::VIBRATE | Self::BEEP)
    }
}

impl Default for Operation {
    fn default() -> Self {
        Self::BEEP
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SHOCK => f.write_str("shock"),
            Self::VIBRATE => f.write_str("vibrate"),
            Self::BEEP => f.write_str("beep"),
            Operation(raw) => write!(f, "unknown operation ({raw})"),
        }
    }
}

impl FromStr for Operation {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shock" => Ok(Self::SHOCK),
            "vibrate" => Ok(Self::VIBRATE),
            "beep" => Ok(Self::BEEP),
            _ => Err(ProtocolError::Unparsable {
                what: "operation",
                input: s.trim().to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Operation {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.to_string()
    }
}

/// Strength of a shock or vibration, validated to 0..=100.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MAX: u8 = 100;

    pub fn new(value: u32) -> Result<Self> {
        match u8::try_from(value) {
            Ok(v) if v <= Self::MAX => Ok(Intensity(v)),
            _ => Err(ProtocolError::IntensityOutOfRange(value)),
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Intensity {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        let parsed: u32 = s.trim().parse().map_err(|_| ProtocolError::Unparsable {
            what: "intensity",
            input: s.trim().to_string(),
        })?;
        Self::new(parsed)
    }
}

impl TryFrom<u32> for Intensity {
    type Error = ProtocolError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Intensity> for u8 {
    fn from(i: Intensity) -> Self {
        i.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names() {
        assert_eq!(Channel::ONE.to_string(), "1");
        assert_eq!(Channel::TWO.to_string(), "2");
        assert_eq!(Channel::from_raw(12).to_string(), "unknown channel (12)");
        assert_eq!("2".parse::<Channel>().unwrap(), Channel::TWO);
        assert!(matches!(
            "3".parse::<Channel>(),
            Err(ProtocolError::Unparsable { what: "channel", .. })
        ));
    }

    #[test]
    fn raw_values_are_masked_to_field_width() {
        assert_eq!(Channel::from_raw(0x1E), Channel::TWO);
        assert_eq!(Operation::from_raw(0x0C), Operation::BEEP);
        assert!(!Channel::from_raw(5).is_known());
        assert!(Operation::VIBRATE.is_known());
    }

    #[test]
    fn operation_names() {
        assert_eq!(Operation::SHOCK.to_string(), "shock");
        assert_eq!(Operation::from_raw(7).to_string(), "unknown operation (7)");
        assert_eq!("Vibrate".parse::<Operation>().unwrap(), Operation::VIBRATE);
        assert!("zap".parse::<Operation>().is_err());
    }

    #[test]
    fn intensity_range() {
        assert_eq!(Intensity::new(100).unwrap().value(), 100);
        assert_eq!(
            Intensity::new(101),
            Err(ProtocolError::IntensityOutOfRange(101))
        );
        assert_eq!(
            "300".parse::<Intensity>(),
            Err(ProtocolError::IntensityOutOfRange(300))
        );
        assert!("-1".parse::<Intensity>().is_err());
        assert_eq!(" 38 ".parse::<Intensity>().unwrap().value(), 38);
    }

    #[test]
    fn defaults_match_new_message() {
        assert_eq!(Channel::default(), Channel::ONE);
        assert_eq!(Operation::default(), Operation::BEEP);
        assert_eq!(Intensity::default().value(), 0);
    }
}

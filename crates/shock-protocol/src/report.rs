use crate::{Channel, Decoded, Message, Operation};
use core::fmt;
use serde::Serialize;

/// Field-by-field view of a message for logs and diagnostics.
///
/// Decoding never fails here: mismatched check bits are kept so tooling can show
/// what the message actually carried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageReport {
    pub header: String,
    pub channel: FieldReport<Channel>,
    pub operation: FieldReport<Operation>,
    pub opaque: String,
    pub intensity: u8,
    pub footer: String,
    pub bits: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FieldReport<T> {
    pub value: T,
    pub check: T,
    pub verified: bool,
}

impl<T: PartialEq + Copy> From<Decoded<T>> for FieldReport<T> {
    fn from(d: Decoded<T>) -> Self {
        FieldReport {
            value: d.forward,
            check: d.check,
            verified: d.is_verified(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for FieldReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verified {
            write!(f, "{} (verified)", self.value)
        } else {
            write!(f, "{} (NOT verified: {})", self.value, self.check)
        }
    }
}

impl MessageReport {
    pub fn is_verified(&self) -> bool {
        self.channel.verified && self.operation.verified
    }
}

impl From<&Message> for MessageReport {
    fn from(msg: &Message) -> Self {
        MessageReport {
            header: msg.header(),
            channel: msg.decode_channel().into(),
            operation: msg.decode_operation().into(),
            opaque: msg.opaque(),
            intensity: msg.decode_intensity(),
            footer: msg.footer(),
            bits: msg.to_string(),
        }
    }
}

impl Message {
    pub fn report(&self) -> MessageReport {
        MessageReport::from(self)
    }
}

impl fmt::Display for MessageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "header: {}; channel: {}; operation: {}; opaque part: {}; intensity: {}; footer: {}; full message: {}",
            self.header,
            self.channel,
            self.operation,
            self.opaque,
            self.intensity,
            self.footer,
            self.bits
        )
    }
}

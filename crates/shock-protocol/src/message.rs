use crate::bits::{bitstring, pattern};
use crate::{Channel, Field, Operation, ProtocolError, Result};
use core::fmt;
use core::str::FromStr;

/// Number of bits in one protocol message.
pub const MESSAGE_BITS: usize = 42;

const HEADER: &str = "01";
const HEADER_AT: usize = 0;

const CHANNEL_AT: usize = 2;
const CHANNEL_WIDTH: usize = 4;

const OPERATION_AT: usize = 6;
const OPERATION_WIDTH: usize = 3;

// Meaning unknown, probably a remote ID. Other remotes have been seen sending
// 10111010010101110; both end in 110.
const OPAQUE: &str = "00101110001010110";
const OPAQUE_AT: usize = 9;

// Intensity is written MSB-first from value bit 7 down to bit 1. Offset 25 is shared
// with the last opaque bit and value bit 0 has no slot, so odd values go out rounded down.
const INTENSITY_AT: usize = 25;
const INTENSITY_WIDTH: usize = 7;

const OPERATION_CHECK_AT: usize = 33;
const CHANNEL_CHECK_AT: usize = 36;

const FOOTER: &str = "00";
const FOOTER_AT: usize = MESSAGE_BITS - 2;

/// One control message, bit 0 transmitted first.
///
/// Setters take `self` by value and return the updated copy, so a template message can be
/// reused to derive variants without aliasing.
///
/// Layout:
///   * 0..2    header, constant `01`
///   * 2..6    channel, MSB-first
///   * 6..9    operation, MSB-first
///   * 9..26   opaque constant
///   * 25..32  intensity (see above for the overlap at 25)
///   * 33..36  operation check, LSB-first and inverted
///   * 36..40  channel check, LSB-first and inverted
///   * 40..42  footer, constant `00`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Message {
    bits: [bool; MESSAGE_BITS],
}

/// Forward and check encodings of a field, decoded independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded<T> {
    pub forward: T,
    pub check: T,
}

impl<T: PartialEq> Decoded<T> {
    pub fn is_verified(&self) -> bool {
        self.forward == self.check
    }
}

impl<T: PartialEq + Copy> Decoded<T> {
    /// The forward value if both encodings agree.
    fn verify(self, field: Field, raw: impl Fn(T) -> u8) -> Result<T> {
        if self.is_verified() {
            Ok(self.forward)
        } else {
            Err(ProtocolError::VerificationFailed {
                field,
                forward: raw(self.forward),
                check: raw(self.check),
            })
        }
    }
}

impl Decoded<Channel> {
    pub fn verified(self) -> Result<Channel> {
        self.verify(Field::Channel, Channel::raw)
    }
}

impl Decoded<Operation> {
    pub fn verified(self) -> Result<Operation> {
        self.verify(Field::Operation, Operation::raw)
    }
}

impl Message {
    /// All bits cleared. Nothing is set, not even check bits; prefer [`Message::new`].
    pub const fn empty() -> Self {
        Message {
            bits: [false; MESSAGE_BITS],
        }
    }

    /// Channel 1, beep, intensity 0. Not finalized.
    pub fn new() -> Self {
        Self::empty()
            .with_channel(Channel::ONE)
            .with_operation(Operation::BEEP)
            .with_intensity(0u8)
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        let raw = channel.raw();
        for i in 0..CHANNEL_WIDTH {
            self.bits[CHANNEL_AT + i] = (raw >> (CHANNEL_WIDTH - 1 - i)) & 1 == 1;
            self.bits[CHANNEL_CHECK_AT + i] = (raw >> i) & 1 == 0;
        }
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        let raw = operation.raw();
        for i in 0..OPERATION_WIDTH {
            self.bits[OPERATION_AT + i] = (raw >> (OPERATION_WIDTH - 1 - i)) & 1 == 1;
            self.bits[OPERATION_CHECK_AT + i] = (raw >> i) & 1 == 0;
        }
        self
    }

    /// Write the intensity field. No range check happens here; validate with
    /// [`crate::Intensity`] before calling.
    pub fn with_intensity(mut self, intensity: impl Into<u8>) -> Self {
        let raw = intensity.into();
        for i in 0..INTENSITY_WIDTH {
            self.bits[INTENSITY_AT + i] = (raw >> (INTENSITY_WIDTH - i)) & 1 == 1;
        }
        self
    }

    /// Stamp header, opaque region and footer. Call once, after the field setters.
    ///
    /// The opaque region covers offset 25, so a prior intensity write loses its top bit
    /// there. Finalizing again does not bring it back.
    pub fn finalize(mut self) -> Self {
        stamp(&mut self.bits, HEADER_AT, HEADER);
        stamp(&mut self.bits, OPAQUE_AT, OPAQUE);
        stamp(&mut self.bits, FOOTER_AT, FOOTER);
        self
    }

    pub fn decode_channel(&self) -> Decoded<Channel> {
        let mut forward = 0u8;
        let mut check = 0u8;
        for i in 0..CHANNEL_WIDTH {
            if self.bits[CHANNEL_AT + i] {
                forward |= 1 << (CHANNEL_WIDTH - 1 - i);
            }
            if !self.bits[CHANNEL_CHECK_AT + i] {
                check |= 1 << i;
            }
        }
        Decoded {
            forward: Channel::from_raw(forward),
            check: Channel::from_raw(check),
        }
    }

    pub fn decode_operation(&self) -> Decoded<Operation> {
        let mut forward = 0u8;
        let mut check = 0u8;
        for i in 0..OPERATION_WIDTH {
            if self.bits[OPERATION_AT + i] {
                forward |= 1 << (OPERATION_WIDTH - 1 - i);
            }
            if !self.bits[OPERATION_CHECK_AT + i] {
                check |= 1 << i;
            }
        }
        Decoded {
            forward: Operation::from_raw(forward),
            check: Operation::from_raw(check),
        }
    }

    /// Raw intensity as it sits on the wire. There is no check encoding to verify against.
    pub fn decode_intensity(&self) -> u8 {
        let mut raw = 0u8;
        for i in 0..INTENSITY_WIDTH {
            if self.bits[INTENSITY_AT + i] {
                raw |= 1 << (INTENSITY_WIDTH - i);
            }
        }
        raw
    }

    pub fn header(&self) -> String {
        bitstring(&self.bits[HEADER_AT..HEADER_AT + HEADER.len()])
    }

    pub fn opaque(&self) -> String {
        bitstring(&self.bits[OPAQUE_AT..OPAQUE_AT + OPAQUE.len()])
    }

    pub fn footer(&self) -> String {
        bitstring(&self.bits[FOOTER_AT..])
    }

    pub fn bits(&self) -> &[bool; MESSAGE_BITS] {
        &self.bits
    }

    /// Build from raw bits, e.g. a captured transmission.
    pub const fn from_bits(bits: [bool; MESSAGE_BITS]) -> Self {
        Message { bits }
    }
}

fn stamp(bits: &mut [bool; MESSAGE_BITS], at: usize, constant: &'static str) {
    for (slot, bit) in bits.iter_mut().skip(at).zip(pattern(constant)) {
        *slot = bit;
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bitstring(&self.bits))
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({self})")
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    /// Parse a 42-character string of `0` and `1`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let count = s.chars().count();
        if count != MESSAGE_BITS {
            return Err(ProtocolError::InvalidBitString(format!(
                "expected {MESSAGE_BITS} bits, got {count}"
            )));
        }
        let mut bits = [false; MESSAGE_BITS];
        for (slot, c) in bits.iter_mut().zip(s.chars()) {
            *slot = match c {
                '0' => false,
                '1' => true,
                other => {
                    return Err(ProtocolError::InvalidBitString(format!(
                        "unexpected character {other:?}"
                    )))
                }
            };
        }
        Ok(Message { bits })
    }
}

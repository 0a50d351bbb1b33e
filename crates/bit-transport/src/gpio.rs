use crate::{pace, BitTransport, Result, TransportError};
use rppal::gpio::{Gpio, Level, OutputPin};
use std::time::Duration;

/// Raspberry Pi GPIO output pin, BCM numbering.
pub struct GpioTransport {
    pin_number: u8,
    pin: OutputPin,
}

impl GpioTransport {
    pub fn open(pin_number: u8) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| TransportError::Gpio(e.to_string()))?;
        let pin = gpio
            .get(pin_number)
            .map_err(|e| TransportError::Gpio(format!("pin {pin_number}: {e}")))?
            .into_output_low();
        tracing::info!(pin = pin_number, "raspi_gpio: pin configured as output");
        Ok(Self { pin_number, pin })
    }

    /// Construct from driver arguments: exactly one BCM pin number.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let [pin] = args else {
            return Err(TransportError::InvalidArgument(
                "needs exactly one argument: pin number to use (BCM numbering)".to_string(),
            ));
        };
        let pin_number = pin
            .parse::<u8>()
            .map_err(|e| TransportError::InvalidArgument(format!("parsing pin {pin:?}: {e}")))?;
        Self::open(pin_number)
    }

    pub fn pin_number(&self) -> u8 {
        self.pin_number
    }
}

impl BitTransport for GpioTransport {
    fn output(&mut self, levels: &[bool], interval: Duration) -> Result<()> {
        let pin = &mut self.pin;
        pace(levels, interval, |level| {
            pin.write(if level { Level::High } else { Level::Low });
            Ok(())
        })?;
        // idle low between messages
        pin.set_low();
        tracing::trace!(pin = self.pin_number, levels = levels.len(), "raspi_gpio transmission");
        Ok(())
    }
}

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn set_channel(&mut self, channel: u8) -> Result<(), BusError<SPI::Error, DO::Error>> {
        if channel > 125 {
            return Ok(());
        }
        self._rf_ch = channel;
        self.spi_write_byte(registers::RF_CH, channel)
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Set the radio channel (the carrier frequency).
    ///
    /// The radio's frequency is `2400 + channel` MHz. Values above 125 are
    /// ignored.
    pub fn set_channel(
        &mut self,
        channel: u8,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().set_channel(channel)?)
    }

    /// Returns the channel last written with [`RF24Radio::set_channel()`]
    /// (or the hardware default of 2).
    pub fn channel(&self) -> u8 {
        self.shared.lock_core()._rf_ch
    }
}

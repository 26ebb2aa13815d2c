use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;
use crate::types::OutputPower;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn set_output_power(
        &mut self,
        level: OutputPower,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._rf_setup = self._rf_setup.with_output_power(level);
        self.spi_write_byte(registers::RF_SETUP, self._rf_setup.into_bits())
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Set the Power Amplifier level.
    pub fn set_output_power(
        &mut self,
        level: OutputPower,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().set_output_power(level)?)
    }

    /// Returns the level last written with [`RF24Radio::set_output_power()`].
    pub fn output_power(&self) -> OutputPower {
        self.shared.lock_core()._rf_setup.output_power()
    }
}

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;
use crate::types::DataRate;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn set_data_rate(
        &mut self,
        data_rate: DataRate,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._rf_setup = self._rf_setup.with_data_rate(data_rate);
        self.spi_write_byte(registers::RF_SETUP, self._rf_setup.into_bits())
    }

    /// Read RF_SETUP back from the chip and decode the data rate bits.
    ///
    /// A non-plus variant silently drops the 250 kbps request, so comparing
    /// this against the shadow tells the two models apart.
    pub fn read_data_rate(&mut self) -> Result<DataRate, BusError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RF_SETUP)?;
        Ok(DataRate::from_bits(self._buf[1] & DataRate::MASK))
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Set the data rate (over the air).
    ///
    /// [`DataRate::Kbps250`] is only supported by the nRF24L01+; see
    /// [`RF24Radio::is_plus_variant()`].
    pub fn set_data_rate(
        &mut self,
        data_rate: DataRate,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().set_data_rate(data_rate)?)
    }

    /// Returns the data rate last written with [`RF24Radio::set_data_rate()`].
    pub fn data_rate(&self) -> DataRate {
        self.shared.lock_core()._rf_setup.data_rate()
    }
}

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn set_auto_ack(&mut self, enable: bool) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._en_aa = if enable { 0x3F } else { 0 };
        self.spi_write_byte(registers::EN_AA, self._en_aa)
    }

    pub fn set_retransmissions(
        &mut self,
        count: u8,
        delay_us: u32,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        // round to the nearest delay code the hardware can represent
        let delay_code = ((delay_us.min(4000) + 124) / 250).saturating_sub(1) as u8;
        self._setup_retr = self
            ._setup_retr
            .with_ard(delay_code)
            .with_arc(count.min(15));
        self.spi_write_byte(registers::SETUP_RETR, self._setup_retr.into_bits())
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Enable or disable automatic acknowledgement on all pipes.
    pub fn set_auto_ack(
        &mut self,
        enable: bool,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().set_auto_ack(enable)?)
    }

    /// Is automatic acknowledgement enabled on all pipes?
    pub fn auto_ack(&self) -> bool {
        self.shared.lock_core()._en_aa == 0x3F
    }

    /// Set the automatic retransmission parameters.
    ///
    /// `count` is the number of attempts (clamped to range [0, 15]) after
    /// which the packet is reported as failed. `delay_us` is the time between
    /// attempts in microseconds; the hardware supports multiples of 250 in
    /// range [250, 4000] and the nearest representable value is used.
    pub fn set_retransmissions(
        &mut self,
        count: u8,
        delay_us: u32,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().set_retransmissions(count, delay_us)?)
    }

    /// Returns the retransmission parameters as `(count, delay_us)`.
    ///
    /// `delay_us` is the value the hardware actually uses, so it may differ
    /// from the one requested with [`RF24Radio::set_retransmissions()`].
    pub fn retransmissions(&self) -> (u8, u32) {
        let setup_retr = self.shared.lock_core()._setup_retr;
        (setup_retr.arc(), (setup_retr.ard() as u32 + 1) * 250)
    }
}

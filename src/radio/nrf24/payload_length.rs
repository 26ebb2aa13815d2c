use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// The static payload length is a driver-side setting; it reaches the
    /// chip's RX_PW registers when a pipe is opened.
    pub fn set_payload_size(&mut self, length: u8) {
        self._payload_size = length.clamp(1, 32);
    }

    pub fn set_address_width(&mut self, width: u8) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._setup_aw = width.clamp(3, 5) - 2;
        self.spi_write_byte(registers::SETUP_AW, self._setup_aw)
    }

    pub fn address_width(&self) -> u8 {
        self._setup_aw + 2
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Set the static payload length used on all pipes.
    ///
    /// The value is clamped to range [1, 32]. Pipes opened earlier keep the
    /// length they were opened with; transmitted packets are padded or
    /// truncated to this length.
    pub fn set_payload_size(&mut self, length: u8) {
        self.shared.lock_core().set_payload_size(length);
    }

    /// Returns the value set by [`RF24Radio::set_payload_size()`].
    pub fn payload_size(&self) -> u8 {
        self.shared.lock_core()._payload_size
    }

    /// Set the address width in bytes.
    ///
    /// The value is clamped to range [3, 5]. All pipe addresses written
    /// afterwards use this many bytes.
    pub fn set_address_width(
        &mut self,
        width: u8,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().set_address_width(width)?)
    }

    /// Returns the value set by [`RF24Radio::set_address_width()`].
    pub fn address_width(&self) -> u8 {
        self.shared.lock_core().address_width()
    }
}

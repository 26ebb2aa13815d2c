use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;
use crate::StatusFlags;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Refresh the cached STATUS byte with a 1 byte NOP command.
    pub fn update(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self.spi_read(0, commands::NOP)
    }

    /// The STATUS byte captured during the most recent SPI transaction.
    pub fn status_flags(&self) -> StatusFlags {
        self._status
    }

    /// Write 1 to the selected event bits to release the IRQ line.
    pub fn clear_status(
        &mut self,
        flags: StatusFlags,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Read the radio's STATUS register.
    ///
    /// Latched events stay asserted; they are only cleared by the interrupt
    /// service routine.
    pub fn status(&self) -> Result<StatusFlags, RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        let mut core = self.shared.lock_core();
        core.update()?;
        Ok(core.status_flags())
    }
}

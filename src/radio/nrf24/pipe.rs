use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn open_rx_pipe(
        &mut self,
        pipe: u8,
        address: u64,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        if pipe > 5 {
            return Ok(());
        }
        if pipe == 0 {
            // remembered for when start_listening() restores it after a
            // transmission overwrote RX_ADDR_P0
            self._pipe0_rx_addr = Some(address);
        }
        if pipe < 2 {
            self.write_address(registers::RX_ADDR_P0 + pipe, address)?;
        } else {
            // pipes 2 through 5 share the upper address bytes with pipe 1
            self.spi_write_byte(registers::RX_ADDR_P0 + pipe, (address & 0xFF) as u8)?;
        }
        self.spi_write_byte(registers::RX_PW_P0 + pipe, self._payload_size)?;
        self._en_rxaddr |= 1 << pipe;
        self.spi_write_byte(registers::EN_RXADDR, self._en_rxaddr)
    }

    pub fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), BusError<SPI::Error, DO::Error>> {
        if pipe > 5 {
            return Ok(());
        }
        self._en_rxaddr &= !(1 << pipe);
        self.spi_write_byte(registers::EN_RXADDR, self._en_rxaddr)
    }

    pub fn open_tx_pipe(&mut self, address: u64) -> Result<(), BusError<SPI::Error, DO::Error>> {
        // RX_ADDR_P0 receives the auto-ACK replies for this destination
        self.write_address(registers::RX_ADDR_P0, address)?;
        self.write_address(registers::TX_ADDR, address)?;
        self.spi_write_byte(registers::RX_PW_P0, self._payload_size)
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Open RX pipe `pipe` (0 to 5, others are ignored) for receiving packets
    /// addressed to `address`.
    ///
    /// The address travels over the bus least significant byte first, using
    /// the configured address width. Pipes 2 through 5 only take the least
    /// significant byte and share the remaining bytes with pipe 1. The pipe's
    /// static payload length is fixed at the current
    /// [`RF24Radio::payload_size()`].
    pub fn open_rx_pipe(
        &mut self,
        pipe: u8,
        address: u64,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().open_rx_pipe(pipe, address)?)
    }

    /// Stop receiving on RX pipe `pipe` (0 to 5, others are ignored).
    ///
    /// Only the pipe's enable bit is cleared; its address remains configured.
    pub fn close_rx_pipe(
        &mut self,
        pipe: u8,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().close_rx_pipe(pipe)?)
    }

    /// Set the destination address for outgoing packets.
    ///
    /// RX pipe 0 is pointed at the same address to catch auto-ACK replies,
    /// clobbering any receive address opened there until the next
    /// [`RF24Radio::start_listening()`].
    pub fn open_tx_pipe(
        &mut self,
        address: u64,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().open_tx_pipe(address)?)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::registers;
    use crate::radio::nrf24::commands;
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;

    #[test]
    pub fn open_rx_pipes() {
        let spi_expectations = spi_test_expects![
            // pipe 1 takes the full address, LSB first
            (
                vec![
                    (registers::RX_ADDR_P0 + 1) | commands::W_REGISTER,
                    0x05u8,
                    0xB6,
                    0xB5,
                    0xB4,
                    0xB3
                ],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![(registers::RX_PW_P0 + 1) | commands::W_REGISTER, 8u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
            // pipe 2 only takes the LSB
            (
                vec![(registers::RX_ADDR_P0 + 2) | commands::W_REGISTER, 0xC7u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![(registers::RX_PW_P0 + 2) | commands::W_REGISTER, 8u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 7u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_payload_size(8);
        radio.open_rx_pipe(1, 0xB3B4B5B605).unwrap();
        radio.open_rx_pipe(2, 0xC3C4C5C6C7).unwrap();
        // pipe indices above 5 are ignored
        radio.open_rx_pipe(6, 0xC3C4C5C6C8).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn close_rx_pipe() {
        let spi_expectations = spi_test_expects![
            // pipes 0 and 1 are enabled out of reset; close pipe 1
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.close_rx_pipe(1).unwrap();
        radio.close_rx_pipe(6).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn open_tx_pipe() {
        let spi_expectations = spi_test_expects![
            // pipe 0 catches the auto-ACK replies
            (
                vec![
                    registers::RX_ADDR_P0 | commands::W_REGISTER,
                    0xE7u8,
                    0xE7,
                    0xE7,
                    0xE7,
                    0xE7
                ],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![
                    registers::TX_ADDR | commands::W_REGISTER,
                    0xE7u8,
                    0xE7,
                    0xE7,
                    0xE7,
                    0xE7
                ],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![registers::RX_PW_P0 | commands::W_REGISTER, 32u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.open_tx_pipe(0xE7E7E7E7E7).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn shorter_address_width() {
        let spi_expectations = spi_test_expects![
            // set_address_width(3)
            (
                vec![registers::SETUP_AW | commands::W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            // only 3 bytes of the address go over the bus
            (
                vec![
                    (registers::RX_ADDR_P0 + 1) | commands::W_REGISTER,
                    0x05u8,
                    0xB6,
                    0xB5
                ],
                vec![0xEu8, 0, 0, 0],
            ),
            (
                vec![(registers::RX_PW_P0 + 1) | commands::W_REGISTER, 32u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_address_width(3).unwrap();
        radio.open_rx_pipe(1, 0xB3B4B5B605).unwrap();
        spi.done();
        ce_pin.done();
    }
}

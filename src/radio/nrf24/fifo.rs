use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, mnemonics, registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;
use crate::StatusFlags;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn packet_available(&mut self) -> Result<bool, BusError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::FIFO_STATUS)?;
        Ok(self._buf[1] & mnemonics::RX_FIFO_EMPTY == 0)
    }

    /// Pop one payload off the RX FIFO.
    ///
    /// The exchange always clocks out a full static payload; the returned
    /// data is truncated to `length` bytes when that is shorter.
    pub fn read_payload(
        &mut self,
        length: u8,
    ) -> Result<Vec<u8>, BusError<SPI::Error, DO::Error>> {
        let count = length.min(self._payload_size) as usize;
        self.spi_read(self._payload_size, commands::R_RX_PAYLOAD)?;
        Ok(self._buf[1..=count].to_vec())
    }

    pub fn fetch_packet(
        &mut self,
        length: u8,
    ) -> Result<Vec<u8>, BusError<SPI::Error, DO::Error>> {
        let data = self.read_payload(length)?;
        self.clear_status(StatusFlags::default().with_rx_dr(true))?;
        Ok(data)
    }

    pub fn flush_rx(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    pub fn flush_tx(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self.spi_read(0, commands::FLUSH_TX)
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Is a received payload waiting in the RX FIFO?
    pub fn packet_available(&self) -> Result<bool, RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().packet_available()?)
    }

    /// Pop one payload off the RX FIFO and acknowledge the receive event.
    ///
    /// At most `length` bytes are returned (and never more than the static
    /// payload length). Useful when no receive callback is registered, or
    /// when the callback was registered with an expected payload size of 0.
    pub fn fetch_packet(
        &self,
        length: u8,
    ) -> Result<Vec<u8>, RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().fetch_packet(length)?)
    }

    /// Discard all payloads waiting in the RX FIFO.
    pub fn discard_received_packets(
        &self,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().flush_rx()?)
    }

    /// Discard all payloads waiting in the TX FIFO.
    ///
    /// The transmit accounting is not touched: slots taken by the discarded
    /// payloads are only released through the interrupt service routine.
    pub fn discard_queued_transmit_packets(
        &self,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().flush_tx()?)
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
    pub fn packet_available() {
        let spi_expectations = spi_test_expects![
            // an occupied RX FIFO
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0u8]),
            // an empty RX FIFO
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 1u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.packet_available().unwrap());
        assert!(!radio.packet_available().unwrap());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn fetch_packet() {
        let spi_expectations = spi_test_expects![
            // the exchange always covers the full static payload length
            (
                vec![commands::R_RX_PAYLOAD, 0u8, 0u8, 0u8, 0u8],
                vec![0x40u8, 1u8, 2u8, 3u8, 4u8],
            ),
            // acknowledge the receive event
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x40u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_payload_size(4);
        let payload = radio.fetch_packet(2).unwrap();
        assert_eq!(payload, [1, 2]);
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn discard_packets() {
        let spi_expectations = spi_test_expects![
            // flush_rx()
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            // flush_tx()
            (vec![commands::FLUSH_TX], vec![0xEu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.discard_received_packets().unwrap();
        radio.discard_queued_transmit_packets().unwrap();
        spi.done();
        ce_pin.done();
    }
}

use std::sync::PoisonError;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, registers, BusError, RadioCore, RadioError, RF24Radio, TX_FIFO_DEPTH};
use crate::radio::IrqPin;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Hand one payload to the chip's TX FIFO.
    ///
    /// The payload is truncated or zero padded to the static payload length.
    pub fn queue_packet(
        &mut self,
        packet: &[u8],
        multicast: bool,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        let length = packet.len().min(self._payload_size as usize);
        self._buf[0] = if multicast {
            commands::W_TX_PAYLOAD_NO_ACK
        } else {
            commands::W_TX_PAYLOAD
        };
        self._buf[1..(length + 1)].copy_from_slice(&packet[..length]);
        self._buf[(length + 1)..(self._payload_size as usize + 1)].fill(0);
        self.spi_transfer(self._payload_size + 1)
    }

    pub fn start_listening(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self.power_up()?;

        self._config_reg = self._config_reg.with_is_rx(true);
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())?;

        self.ce_pin.set_high().map_err(BusError::Gpo)?;

        // Restore the pipe 0 address, if one was opened.
        if let Some(address) = self._pipe0_rx_addr.filter(|address| address & 0xFF != 0) {
            self.write_address(registers::RX_ADDR_P0, address)?;
        } else {
            self.close_rx_pipe(0)?;
        }
        Ok(())
    }

    pub fn stop_listening(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(BusError::Gpo)?;

        self._config_reg = self._config_reg.with_is_rx(false);
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())?;

        // Transmitting listens on pipe 0 for the auto-ACK replies.
        self._en_rxaddr |= 1;
        self.spi_write_byte(registers::EN_RXADDR, self._en_rxaddr)
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Queue a packet for transmission.
    ///
    /// The transmission happens asynchronously. This function only blocks when
    /// the TX FIFO already holds 3 packets, until the interrupt service
    /// routine confirms a completed (or abandoned) transmission. The IRQ line
    /// must be armed with [`RF24Radio::configure_receive_callback()`] for
    /// those confirmations to arrive.
    ///
    /// The packet is truncated or zero padded to the configured
    /// [`RF24Radio::payload_size()`]. When `multicast` is `true` the packet is
    /// transmitted without requesting an acknowledgement.
    pub fn transmit(
        &self,
        packet: &[u8],
        multicast: bool,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        let mut core = self.shared.lock_core();
        while core.tx_queue == TX_FIFO_DEPTH {
            core = self
                .shared
                .tx_slot_freed
                .wait(core)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if core.tx_queue == 0 {
            core.ce_pin.set_high().map_err(RadioError::Gpo)?;
        }

        if let Err(error) = core.queue_packet(packet, multicast) {
            // CE may not stay high with nothing in the TX FIFO.
            if core.tx_queue == 0 {
                let _ = core.ce_pin.set_low();
            }
            return Err(error.into());
        }
        core.tx_queue += 1;
        Ok(())
    }

    /// Start listening for incoming packets.
    ///
    /// Powers the radio up if needed, switches it to primary RX and raises CE.
    /// The address opened on RX pipe 0 is restored here, since
    /// [`RF24Radio::open_tx_pipe()`] overwrites it. Pending transmissions are
    /// not waited on; watch [`RF24Radio::in_flight()`] when ordering matters.
    pub fn start_listening(&self) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().start_listening()?)
    }

    /// Stop listening for incoming packets.
    ///
    /// Lowers CE (back to standby-I) and switches the radio to primary TX.
    /// RX pipe 0 is re-enabled so subsequent transmissions can receive their
    /// auto-ACK replies.
    pub fn stop_listening(&self) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().stop_listening()?)
    }
}

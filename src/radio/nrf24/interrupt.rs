use std::sync::{mpsc, Arc};
use std::thread;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{mnemonics, registers, BusError, RadioCore, RadioError, RadioShared, RF24Radio};
use crate::radio::IrqPin;
use crate::types::Edge;
use crate::StatusFlags;

/// One received-packet notification crossing to the delivery thread.
pub(crate) struct RxEvent {
    pub(crate) pipe: u8,
    pub(crate) payload: Option<Vec<u8>>,
}

impl<SPI, DO, DELAY> RadioShared<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Drain every event the radio latched since the last falling edge.
    ///
    /// Runs on the transport's notification context. All three conditions can
    /// be pending at once and new ones can latch while older ones are being
    /// serviced, so the loop re-reads STATUS until nothing is left.
    pub(crate) fn service_interrupt(&self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        let mut core = self.lock_core();
        loop {
            core.update()?;
            let status = core.status_flags();

            if status.rx_dr() {
                let expected = core.expected_payload_size;
                loop {
                    let payload = if expected > 0 {
                        Some(core.read_payload(expected)?)
                    } else {
                        None
                    };
                    // The payload exchange refreshes STATUS, so the pipe
                    // number belongs to the packet just read out.
                    let pipe = core.status_flags().rx_pipe();
                    core.dispatch_rx(pipe, payload);
                    core.clear_status(StatusFlags::default().with_rx_dr(true))?;

                    if expected == 0 {
                        // Nothing was popped off the RX FIFO; the callback
                        // fetches the packet itself.
                        break;
                    }
                    core.spi_read(1, registers::FIFO_STATUS)?;
                    if core._buf[1] & mnemonics::RX_FIFO_EMPTY != 0 {
                        break;
                    }
                }
            } else if status.tx_ds() {
                core.clear_status(StatusFlags::default().with_tx_ds(true))?;
                core.tx_queue = core.tx_queue.saturating_sub(1);
                if core.tx_queue == 0 {
                    core.ce_pin.set_low().map_err(BusError::Gpo)?;
                }
                self.tx_slot_freed.notify_all();
            } else if status.max_rt() {
                core.clear_status(StatusFlags::default().with_max_rt(true))?;
                log::error!(
                    "maximum retransmissions reached, flushing {} queued packets",
                    core.tx_queue
                );
                core.flush_tx()?;
                core.tx_queue = 0;
                core.ce_pin.set_low().map_err(BusError::Gpo)?;
                self.tx_slot_freed.notify_all();
            } else {
                return Ok(());
            }
        }
    }
}

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn dispatch_rx(&mut self, pipe: u8, payload: Option<Vec<u8>>) {
        if let Some(sink) = &self.rx_sink {
            if sink.send(RxEvent { pipe, payload }).is_err() {
                log::warn!("receive callback dispatcher is gone, dropping packet");
                self.rx_sink = None;
            }
        }
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice + Send + 'static,
    DO: OutputPin + Send + 'static,
    IRQ: IrqPin,
    DELAY: DelayNs + Send + 'static,
{
    /// Register the receive callback and arm the IRQ line.
    ///
    /// The radio uses the IRQ line to notify the host about events such as a
    /// received packet or a finished transmission. Register servicing happens
    /// on the transport's notification context; received packets are then
    /// handed to `callback` as `(pipe, payload)` pairs on a dedicated
    /// delivery thread, in arrival order.
    ///
    /// When `expected_payload_size` is 0, the callback receives [`None`] and
    /// must fetch the packet itself with [`RF24Radio::fetch_packet()`].
    /// Otherwise up to `expected_payload_size` bytes are read out per packet
    /// and delivered as [`Some`].
    ///
    /// Calling this again replaces the callback and re-arms the line. The
    /// callback may drive the radio through a shared [`Arc`] handle, but must
    /// not own the last clone of it; the radio's teardown joins the delivery
    /// thread.
    pub fn configure_receive_callback<F>(
        &mut self,
        expected_payload_size: u8,
        mut callback: F,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>>
    where
        F: FnMut(u8, Option<Vec<u8>>) + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<RxEvent>();
        {
            let mut core = self.shared.lock_core();
            core.expected_payload_size = expected_payload_size;
            // Dropping a previous sender here lets its dispatcher run dry.
            core.rx_sink = Some(sender);
        }
        if let Some(handle) = self.dispatcher.take() {
            let _ = handle.join();
        }
        self.dispatcher = Some(thread::spawn(move || {
            while let Ok(event) = receiver.recv() {
                callback(event.pipe, event.payload);
            }
        }));

        let shared = Arc::clone(&self.shared);
        self.irq_pin
            .attach(
                Edge::Falling,
                Box::new(move || {
                    if shared.service_interrupt().is_err() {
                        log::error!("interrupt servicing failed, radio events may be lost");
                    }
                }),
            )
            .map_err(RadioError::Irq)?;

        // Catch an event that latched before the line was armed.
        if self.irq_pin.is_low().map_err(RadioError::Irq)? {
            self.shared.service_interrupt()?;
        }
        Ok(())
    }
}

use std::sync::{mpsc, Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

mod auto_ack;
pub(crate) mod bit_fields;
mod channel;
mod constants;
mod data_rate;
mod details;
mod fifo;
mod init;
mod interrupt;
mod pa_level;
mod payload_length;
mod pipe;
mod power;
mod radio;
mod status;

use crate::radio::IrqPin;
use crate::StatusFlags;
use bit_fields::{Config, RfSetup, SetupRetr};
pub use constants::{commands, mnemonics, registers};
use interrupt::RxEvent;

/// The depth of the chip's TX FIFO in payloads.
pub(crate) const TX_FIFO_DEPTH: u8 = 3;

/// An assortment of error types describing hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RadioError<SPI, DO, IRQ> {
    /// The SPI bus rejected a transfer.
    Spi(SPI),
    /// The CE output pin could not be driven.
    Gpo(DO),
    /// The IRQ line could not be read or (re)armed.
    Irq(IRQ),
}

/// Errors raised below the IRQ layer (SPI bus and CE pin only).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum BusError<SPI, DO> {
    Spi(SPI),
    Gpo(DO),
}

impl<SPI, DO, IRQ> From<BusError<SPI, DO>> for RadioError<SPI, DO, IRQ> {
    fn from(error: BusError<SPI, DO>) -> Self {
        match error {
            BusError::Spi(e) => RadioError::Spi(e),
            BusError::Gpo(e) => RadioError::Gpo(e),
        }
    }
}

/// The radio state guarded by [`RadioShared::core`].
///
/// Everything in here, including the SPI bus and the CE pin, is only ever
/// touched with the mutex held. The interrupt service routine and user-facing
/// calls therefore never interleave register accesses.
pub(crate) struct RadioCore<SPI, DO, DELAY> {
    _spi: SPI,
    ce_pin: DO,
    _delay_impl: DELAY,
    _buf: [u8; 33],
    _status: StatusFlags,
    _config_reg: Config,
    _setup_retr: SetupRetr,
    _rf_setup: RfSetup,
    _setup_aw: u8,
    _rf_ch: u8,
    _en_aa: u8,
    _en_rxaddr: u8,
    _feature: u8,
    _payload_size: u8,
    _is_plus_variant: bool,
    _pipe0_rx_addr: Option<u64>,
    /// Payloads handed to the chip's TX FIFO and not yet confirmed sent.
    pub(crate) tx_queue: u8,
    pub(crate) rx_sink: Option<mpsc::Sender<RxEvent>>,
    pub(crate) expected_payload_size: u8,
}

/// State shared between the user-facing handle and the IRQ handler.
pub(crate) struct RadioShared<SPI, DO, DELAY> {
    pub(crate) core: Mutex<RadioCore<SPI, DO, DELAY>>,
    /// Signalled whenever the interrupt service routine frees TX FIFO slots.
    pub(crate) tx_slot_freed: Condvar,
}

impl<SPI, DO, DELAY> RadioShared<SPI, DO, DELAY> {
    /// Lock the core, recovering the guard if a holder panicked.
    ///
    /// Register shadows stay byte-consistent across a recovered poison
    /// because every mutation writes the shadow and the bus in one step.
    pub(crate) fn lock_core(&self) -> MutexGuard<'_, RadioCore<SPI, DO, DELAY>> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// This struct drives an nRF24L01+ transceiver attached to the host through
/// a bridged SPI bus, a CE output pin and the chip's IRQ line.
///
/// The driver is interrupt driven: received packets are dispatched to the
/// callback registered with [`RF24Radio::configure_receive_callback()`], and
/// [`RF24Radio::transmit()`] blocks only when all 3 TX FIFO slots are taken,
/// until the IRQ handler confirms a completed (or failed) transmission.
///
/// Configuration methods take `&mut self`; once the radio is armed and shared
/// with producer threads (for example via [`Arc`]), only the `&self` methods
/// (transmitting, mode switches, diagnostics) remain callable, which keeps
/// configuration races out of the armed phase by construction.
pub struct RF24Radio<SPI, DO, IRQ, DELAY>
where
    IRQ: IrqPin,
{
    shared: Arc<RadioShared<SPI, DO, DELAY>>,
    irq_pin: IRQ,
    dispatcher: Option<JoinHandle<()>>,
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`RF24Radio`] object for use on the specified
    /// `spi` bus with the given `ce_pin` and `irq_pin`.
    ///
    /// The chip's CSN (Chip Select) pin belongs to the
    /// [`SpiDevice`](trait@embedded_hal::spi::SpiDevice) implementation behind
    /// the `spi` parameter, not to this driver.
    ///
    /// The `irq_pin` must be wired to the chip's active-low IRQ line; it is
    /// armed by [`RF24Radio::configure_receive_callback()`].
    pub fn new(ce_pin: DO, spi: SPI, irq_pin: IRQ, delay_impl: DELAY) -> RF24Radio<SPI, DO, IRQ, DELAY> {
        RF24Radio {
            shared: Arc::new(RadioShared {
                core: Mutex::new(RadioCore::new(ce_pin, spi, delay_impl)),
                tx_slot_freed: Condvar::new(),
            }),
            irq_pin,
            dispatcher: None,
        }
    }

    /// Does the connected chip identify as the plus variant?
    ///
    /// The answer is only meaningful once [`RF24Radio::init()`] has probed
    /// the hardware.
    pub fn is_plus_variant(&self) -> bool {
        self.shared.lock_core()._is_plus_variant
    }

    /// The number of payloads handed to the chip's TX FIFO and not yet
    /// confirmed sent (0 to 3).
    pub fn in_flight(&self) -> u8 {
        self.shared.lock_core().tx_queue
    }
}

impl<SPI, DO, IRQ, DELAY> Drop for RF24Radio<SPI, DO, IRQ, DELAY>
where
    IRQ: IrqPin,
{
    /// Release the IRQ registration and stop the dispatcher thread.
    fn drop(&mut self) {
        let _ = self.irq_pin.detach();
        if let Some(handle) = self.dispatcher.take() {
            self.shared.lock_core().rx_sink = None;
            let _ = handle.join();
        }
    }
}

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// All register shadows start at the chip's power-on reset values.
    fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> RadioCore<SPI, DO, DELAY> {
        RadioCore {
            _spi: spi,
            ce_pin,
            _delay_impl: delay_impl,
            _buf: [0u8; 33],
            _status: StatusFlags::from_bits(0),
            _config_reg: Config::default(),
            _setup_retr: SetupRetr::default(),
            _rf_setup: RfSetup::default(),
            _setup_aw: 3,
            _rf_ch: 2,
            _en_aa: 0x3F,
            _en_rxaddr: 3,
            _feature: 0,
            _payload_size: 32,
            _is_plus_variant: false,
            _pipe0_rx_addr: None,
            tx_queue: 0,
            rx_sink: None,
            expected_payload_size: 32,
        }
    }

    fn spi_transfer(&mut self, len: u8) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len as usize])
            .map_err(BusError::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// Passing a length of 0 turns this into a bare 1 byte command:
    /// ```ignore
    /// self.spi_read(0, commands::NOP)?;
    /// // self._status now holds a fresh STATUS byte
    /// ```
    fn spi_read(&mut self, len: u8, command: u8) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        // The command byte is followed by zero filler, never residue from an
        // earlier exchange.
        self._buf[1..len as usize + 1].fill(0);
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(
        &mut self,
        command: u8,
        byte: u8,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._buf[0] = command | commands::W_REGISTER;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._buf[0] = command | commands::W_REGISTER;
        let buf_len = buf.len();
        self._buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        self.spi_transfer(buf_len as u8 + 1)
    }

    /// Unlock the FEATURE register on first generation (non-plus) chips.
    /// Plus variants treat the command as a no-op.
    fn toggle_features(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self._buf[0] = commands::ACTIVATE;
        self._buf[1] = 0x73;
        self.spi_transfer(2)
    }

    /// Write `address` to `register`, least significant byte first, using the
    /// configured address width.
    fn write_address(
        &mut self,
        register: u8,
        address: u64,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        let width = self.address_width() as usize;
        let mut bytes = [0u8; 5];
        for (i, byte) in bytes[..width].iter_mut().enumerate() {
            *byte = (address >> (8 * i)) as u8;
        }
        self.spi_write_buf(register, &bytes[..width])
    }

    /// Read a multi-byte address back from `register` (LSB first on the wire).
    fn read_address(&mut self, register: u8) -> Result<u64, BusError<SPI::Error, DO::Error>> {
        let width = self.address_width();
        self.spi_read(width, register)?;
        let mut address = 0u64;
        for i in (1..=width as usize).rev() {
            address = address << 8 | self._buf[i] as u64;
        }
        Ok(address)
    }
}

//! Types shared across the driver's public API.

use std::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

/// Power Amplifier level. The units dBm (decibel-milliwatts) represent a
/// logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputPower {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl OutputPower {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            OutputPower::Min => 0,
            OutputPower::Low => 2,
            OutputPower::High => 4,
            OutputPower::Max => 6,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value {
            0 => OutputPower::Min,
            2 => OutputPower::Low,
            4 => OutputPower::High,
            _ => OutputPower::Max,
        }
    }
}

impl Display for OutputPower {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            OutputPower::Min => write!(f, "Min"),
            OutputPower::Low => write!(f, "Low"),
            OutputPower::High => write!(f, "High"),
            OutputPower::Max => write!(f, "Max"),
        }
    }
}

/// The on-air transmission speed, in bits per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataRate {
    /// 1 Mbps
    Mbps1,
    /// 2 Mbps
    Mbps2,
    /// 250 Kbps, a nRF24L01+ exclusive
    Kbps250,
}

impl DataRate {
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value {
            0x8 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// An edge transition on a digital input line.
///
/// The nRF24L01's IRQ line is active low, so interrupt conditions are
/// announced by a [`Edge::Falling`] transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// The line went from low to high.
    Rising,
    /// The line went from high to low.
    Falling,
}

/// The interrupt events latched in the radio's STATUS register.
///
/// ```
/// use nrf24_radio::StatusFlags;
///
/// let flags = StatusFlags::default() // no flags raised
///     .with_rx_dr(true); // raise only the `rx_dr` flag
/// assert!(flags.rx_dr());
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to `false`.
/// Use [`StatusFlags::new`] to instantiate all flags set to `true`.
#[bitfield(u8, new = false, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A received packet is waiting in the RX FIFO.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A packet finished transmission (and was acknowledged when auto-ack is on).
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A packet exhausted its retransmission attempts.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// The pipe number of the payload at the top of the RX FIFO (7 when empty).
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// The TX FIFO cannot accept another payload.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for the STATUS register.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// Like [`StatusFlags::default`], except every IRQ flag starts raised.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// A received packet is waiting in the RX FIFO.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::RX_DR_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::RX_DR_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }

    /// A packet finished transmission.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DS_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::TX_DS_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }

    /// A packet exhausted its retransmission attempts.
    pub fn with_max_rt(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::MAX_RT_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::MAX_RT_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

/// A snapshot of the radio's register file taken by
/// [`RF24Radio::dump_registers()`](crate::radio::RF24Radio::dump_registers).
///
/// Multi-byte addresses are decoded least significant byte first, mirroring
/// the order they travel over the SPI bus.
#[derive(Clone, Copy, Debug)]
pub struct RegisterDump {
    /// The STATUS register flags.
    pub status: StatusFlags,
    /// The full address of RX pipe 0.
    pub rx_addr_p0: u64,
    /// The full address of RX pipe 1.
    pub rx_addr_p1: u64,
    /// The address LSBs of RX pipes 2 through 5.
    pub rx_addr_p2_5: [u8; 4],
    /// The transmit destination address.
    pub tx_addr: u64,
    /// The static payload lengths configured for pipes 0 through 5.
    pub rx_pw: [u8; 6],
    /// The EN_AA (auto-ack per pipe) register.
    pub en_aa: u8,
    /// The EN_RXADDR (pipe enable) register.
    pub en_rxaddr: u8,
    /// The RF_CH (channel) register.
    pub rf_ch: u8,
    /// The RF_SETUP register.
    pub rf_setup: u8,
    /// The SETUP_AW (address width) register.
    pub setup_aw: u8,
    /// The CONFIG register.
    pub config: u8,
    /// The DYNPD (dynamic payload per pipe) register.
    pub dynpd: u8,
    /// The FEATURE register.
    pub feature: u8,
}

use bitfield_struct::bitfield;

use crate::types::{DataRate, OutputPower};

/// The CONFIG register. The default value matches the chip's power-on reset.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(4)]
    _padding: u8,

    /// The EN_CRC bit.
    #[bits(1, default = true)]
    pub en_crc: bool,

    /// The CRCO bit; a 2 byte checksum when set.
    pub crc_16bit: bool,

    /// The PWR_UP bit.
    pub power: bool,

    /// The PRIM_RX bit.
    pub is_rx: bool,
}

/// The SETUP_RETR register. The default value matches the chip's power-on reset.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetr {
    /// The retransmission delay code (ARD); `(ard + 1) * 250` microseconds.
    #[bits(4)]
    pub ard: u8,

    /// The retransmission attempt count (ARC).
    #[bits(4, default = 3)]
    pub arc: u8,
}

/// The RF_SETUP register. The default value matches the chip's power-on reset.
#[bitfield(u8, order = Msb)]
pub(crate) struct RfSetup {
    #[bits(2)]
    _padding: u8,

    #[bits(1, access = None)]
    dr_low: bool,

    #[bits(1)]
    _pll_lock: bool,

    #[bits(1, access = None, default = true)]
    dr_high: bool,

    #[bits(2, access = None, default = 3)]
    pa_level: u8,

    #[bits(1)]
    _lna: u8,
}

impl RfSetup {
    const PA_MASK: u8 = 0b110;
    const DATA_RATE_MASK: u8 = 0x28;

    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits() & Self::DATA_RATE_MASK)
    }

    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_val = self.into_bits() & !Self::DATA_RATE_MASK;
        Self::from_bits(new_val | data_rate.into_bits())
    }

    pub const fn output_power(&self) -> OutputPower {
        OutputPower::from_bits(self.into_bits() & Self::PA_MASK)
    }

    pub fn with_output_power(self, level: OutputPower) -> Self {
        let new_val = self.into_bits() & !Self::PA_MASK;
        Self::from_bits(new_val | level.into_bits())
    }
}

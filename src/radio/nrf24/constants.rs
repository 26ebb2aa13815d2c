//! Register addresses, SPI opcodes and bit positions of the nRF24L01(+).

/// Addresses of the chip's configuration and status registers.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    /// Pipes 1 through 5 follow at consecutive addresses.
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const RX_ADDR_P1: u8 = 0x0B;
    pub const TX_ADDR: u8 = 0x10;
    /// One payload length register per pipe, 0 through 5.
    pub const RX_PW_P0: u8 = 0x11;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// SPI instruction opcodes. Every transaction clocks one of these out first
/// and the STATUS register back in.
pub mod commands {
    /// Bitwise OR'd with a register address to write that register.
    pub const W_REGISTER: u8 = 0x20;
    /// Followed by 0x73; unlocks the FEATURE register on non-plus chips.
    pub const ACTIVATE: u8 = 0x50;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const W_TX_PAYLOAD_NO_ACK: u8 = 0xB0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const NOP: u8 = 0xFF;
}

/// Bit positions inside individual registers.
pub mod mnemonics {
    /// FIFO_STATUS: no payloads left to read out.
    pub const RX_FIFO_EMPTY: u8 = 1;
}

//! A module to encapsulate everything related to radio operation.
mod nrf24;
pub use nrf24::{RadioError, RF24Radio};

mod config;
pub use config::RadioConfig;

mod irq;
pub use irq::IrqPin;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn power_up(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        if self._config_reg.power() {
            return Ok(());
        }
        self._config_reg = self._config_reg.with_power(true);
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())?;

        // Leaving power down passes through standby-I. The datasheet allows
        // the chip up to 5 ms (Tpd2stby) before CE may be raised.
        self._delay_impl.delay_us(5000);
        Ok(())
    }

    pub fn power_down(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        if !self._config_reg.power() {
            return Ok(());
        }
        // CE may not stay high while the chip has no power.
        self.ce_pin.set_low().map_err(BusError::Gpo)?;
        self._config_reg = self._config_reg.with_power(false);
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Wake the radio from power down mode.
    ///
    /// Does nothing if the radio is already powered up. Otherwise this blocks
    /// for the chip's 5 ms oscillator settling time.
    pub fn power_up(&self) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().power_up()?)
    }

    /// Put the radio into power down mode (a sleep state).
    ///
    /// Does nothing if the radio is already powered down. In full power down
    /// mode, the radio consumes approximately 900 nA.
    pub fn power_down(&self) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().power_down()?)
    }

    /// Is the chip currently powered?
    pub fn is_powered(&self) -> bool {
        self.shared.lock_core()._config_reg.power()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::registers;
    use crate::radio::nrf24::commands;
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };

    #[test]
    pub fn power_up_is_idempotent() {
        let spi_expectations = spi_test_expects![
            // power_up() only writes CONFIG once
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xAu8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.power_up().unwrap();
        radio.power_up().unwrap();
        assert!(radio.is_powered());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn power_down_when_already_down() {
        let mocks = mk_radio(&[], &[]);
        let (radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        // without calling init(), the radio starts out powered down
        assert!(!radio.is_powered());
        radio.power_down().unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn power_cycle() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // power_up()
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xAu8],
                vec![0xEu8, 0u8],
            ),
            // power_down() lowers CE first
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x8u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.power_up().unwrap();
        radio.power_down().unwrap();
        assert!(!radio.is_powered());
        spi.done();
        ce_pin.done();
    }
}

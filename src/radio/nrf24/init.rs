use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, Config, RadioCore, RadioError, RF24Radio};
use crate::radio::{IrqPin, RadioConfig};
use crate::types::DataRate;
use crate::StatusFlags;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn init(&mut self) -> Result<(), BusError<SPI::Error, DO::Error>> {
        // Reset CONFIG and enable 16-bit CRC.
        self._config_reg = Config::default().with_crc_16bit(true);
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())?;

        self.set_retransmissions(15, 250)?;

        // Check for a connected module and plus variant by requesting the
        // 250 kbps data rate, which only the nRF24L01+ supports.
        self.set_data_rate(DataRate::Kbps250)?;
        self._is_plus_variant = self.read_data_rate()? == DataRate::Kbps250;

        // Default speed
        self.set_data_rate(DataRate::Mbps1)?;

        // Keep dynamic payloads disabled. The reset value already disables
        // them, but the radio may not have gone through a power-on reset.
        self.toggle_features()?;
        self._feature = 0;
        self.spi_write_byte(registers::FEATURE, self._feature)?;
        self.spi_write_byte(registers::DYNPD, 0)?;

        // Reset latched events. Notice reset and flush is the last thing we do.
        self.clear_status(StatusFlags::new())?;

        // This channel should be universally safe and not bleed over into
        // adjacent spectrum.
        self.set_channel(76)?;

        self.flush_rx()?;
        self.flush_tx()?;

        self.power_up()?;

        // Enable PTX, do not write CE high so radio will remain in standby-I
        // mode (130 us max to transition to RX or TX instead of 1500 us from
        // power up).
        self._config_reg = self._config_reg.with_is_rx(false);
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())
    }

    pub fn with_config(
        &mut self,
        config: &RadioConfig,
    ) -> Result<(), BusError<SPI::Error, DO::Error>> {
        self.set_address_width(config.address_width())?;
        self.set_retransmissions(config.retry_count(), config.retry_delay_us())?;
        self.set_auto_ack(config.auto_ack())?;
        self.set_data_rate(config.data_rate())?;
        self.set_output_power(config.output_power())?;
        self.set_payload_size(config.payload_size());
        self.set_channel(config.channel())
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Bring the chip from power-on reset into a known working state.
    ///
    /// Must be called before any other operation. Leaves the radio powered up
    /// in standby-I mode (CE low, primary TX) with 16-bit CRC, 1 Mbps,
    /// channel 76, 15 retransmissions spaced 250 microseconds apart, dynamic
    /// payloads disabled and all latched events cleared.
    pub fn init(&mut self) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().init()?)
    }

    /// Apply a [`RadioConfig`] built up off-line to the radio's hardware.
    pub fn with_config(
        &mut self,
        config: &RadioConfig,
    ) -> Result<(), RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().with_config(config)?)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::registers;
    use crate::radio::nrf24::commands;
    use crate::radio::RadioConfig;
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;

    pub fn init_parametrized(is_plus_variant: bool) {
        let spi_expectations = spi_test_expects![
            // write CONFIG (16-bit CRC)
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xCu8],
                vec![0xEu8, 0u8],
            ),
            // set_retransmissions()
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0xFu8],
                vec![0xEu8, 0u8],
            ),
            // request 250 kbps
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x26u8],
                vec![0xEu8, 0u8],
            ),
            // read back RF_SETUP to detect the plus variant
            (
                vec![registers::RF_SETUP, 0u8],
                vec![0xEu8, if is_plus_variant { 0x26u8 } else { 0x6u8 }],
            ),
            // default speed 1 Mbps
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x6u8],
                vec![0xEu8, 0u8],
            ),
            // toggle_features()
            (vec![commands::ACTIVATE, 0x73u8], vec![0xEu8, 0u8]),
            // write FEATURE register
            (
                vec![registers::FEATURE | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
            // write dynamic payloads register
            (
                vec![registers::DYNPD | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
            // clear latched events
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            // set_channel(76)
            (
                vec![registers::RF_CH | commands::W_REGISTER, 76u8],
                vec![0xEu8, 0u8],
            ),
            // flush_rx()
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            // flush_tx()
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            // power_up()
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xEu8],
                vec![0xEu8, 0u8],
            ),
            // enable PTX (CE stays low)
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xEu8],
                vec![0xEu8, 0u8],
            ),
        ];

        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.init().unwrap();
        assert_eq!(radio.is_plus_variant(), is_plus_variant);
        assert_eq!(radio.channel(), 76);
        assert_eq!(radio.retransmissions(), (15, 250));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn init_plus_variant() {
        init_parametrized(true);
    }

    #[test]
    fn init_non_plus_variant() {
        init_parametrized(false);
    }

    #[test]
    fn apply_config() {
        let spi_expectations = spi_test_expects![
            // set_address_width(4)
            (
                vec![registers::SETUP_AW | commands::W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
            // set_retransmissions()
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0xFu8],
                vec![0xEu8, 0u8],
            ),
            // set_auto_ack(true)
            (
                vec![registers::EN_AA | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            // set_data_rate()
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x6u8],
                vec![0xEu8, 0u8],
            ),
            // set_output_power()
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x6u8],
                vec![0xEu8, 0u8],
            ),
            // set_channel()
            (
                vec![registers::RF_CH | commands::W_REGISTER, 100u8],
                vec![0xEu8, 0u8],
            ),
        ];

        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let config = RadioConfig::default()
            .with_address_width(4)
            .with_payload_size(16)
            .with_channel(100);
        radio.with_config(&config).unwrap();
        assert_eq!(radio.address_width(), 4);
        assert_eq!(radio.payload_size(), 16);
        assert_eq!(radio.channel(), 100);
        spi.done();
        ce_pin.done();
    }
}

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, BusError, RadioCore, RadioError, RF24Radio};
use crate::radio::IrqPin;
use crate::RegisterDump;

impl<SPI, DO, DELAY> RadioCore<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn is_connected(&mut self) -> Result<bool, BusError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::SETUP_AW)?;
        Ok((1..=3).contains(&self._buf[1]))
    }

    pub fn dump_registers(&mut self) -> Result<RegisterDump, BusError<SPI::Error, DO::Error>> {
        self.update()?;
        let status = self._status;

        let rx_addr_p0 = self.read_address(registers::RX_ADDR_P0)?;
        let rx_addr_p1 = self.read_address(registers::RX_ADDR_P1)?;
        let mut rx_addr_p2_5 = [0u8; 4];
        for (pipe, lsb) in rx_addr_p2_5.iter_mut().enumerate() {
            self.spi_read(1, registers::RX_ADDR_P0 + 2 + pipe as u8)?;
            *lsb = self._buf[1];
        }
        let tx_addr = self.read_address(registers::TX_ADDR)?;

        let mut rx_pw = [0u8; 6];
        for (pipe, length) in rx_pw.iter_mut().enumerate() {
            self.spi_read(1, registers::RX_PW_P0 + pipe as u8)?;
            *length = self._buf[1];
        }

        self.spi_read(1, registers::EN_AA)?;
        let en_aa = self._buf[1];
        self.spi_read(1, registers::EN_RXADDR)?;
        let en_rxaddr = self._buf[1];
        self.spi_read(1, registers::RF_CH)?;
        let rf_ch = self._buf[1];
        self.spi_read(1, registers::RF_SETUP)?;
        let rf_setup = self._buf[1];
        self.spi_read(1, registers::SETUP_AW)?;
        let setup_aw = self._buf[1];
        self.spi_read(1, registers::CONFIG)?;
        let config = self._buf[1];
        self.spi_read(1, registers::DYNPD)?;
        let dynpd = self._buf[1];
        self.spi_read(1, registers::FEATURE)?;
        let feature = self._buf[1];

        let dump = RegisterDump {
            status,
            rx_addr_p0,
            rx_addr_p1,
            rx_addr_p2_5,
            tx_addr,
            rx_pw,
            en_aa,
            en_rxaddr,
            rf_ch,
            rf_setup,
            setup_aw,
            config,
            dynpd,
            feature,
        };
        self.log_dump(&dump);
        Ok(dump)
    }

    fn log_dump(&self, dump: &RegisterDump) {
        let hex_digits = self.address_width() as usize * 2;
        log::debug!(
            "STATUS: RX_DR = {}, TX_DS = {}, MAX_RT = {}, RX_P_NO = {}, TX_FULL = {}",
            dump.status.rx_dr() as u8,
            dump.status.tx_ds() as u8,
            dump.status.max_rt() as u8,
            dump.status.rx_pipe(),
            dump.status.tx_full() as u8,
        );
        log::debug!("RX_ADDR_P0: {:0digits$x}", dump.rx_addr_p0, digits = hex_digits);
        log::debug!("RX_ADDR_P1: {:0digits$x}", dump.rx_addr_p1, digits = hex_digits);
        log::debug!(
            "RX_ADDR_P2..5: {:02x} {:02x} {:02x} {:02x}",
            dump.rx_addr_p2_5[0],
            dump.rx_addr_p2_5[1],
            dump.rx_addr_p2_5[2],
            dump.rx_addr_p2_5[3],
        );
        log::debug!("TX_ADDR: {:0digits$x}", dump.tx_addr, digits = hex_digits);
        log::debug!(
            "RX_PW_P0..5: {:02x} {:02x} {:02x} {:02x} {:02x} {:02x}",
            dump.rx_pw[0],
            dump.rx_pw[1],
            dump.rx_pw[2],
            dump.rx_pw[3],
            dump.rx_pw[4],
            dump.rx_pw[5],
        );
        log::debug!("EN_AA: {:02x}", dump.en_aa);
        log::debug!("EN_RXADDR: {:02x}", dump.en_rxaddr);
        log::debug!("RF_CH: {:02x}", dump.rf_ch);
        log::debug!("RF_SETUP: {:02x}", dump.rf_setup);
        log::debug!("SETUP_AW: {:02x}", dump.setup_aw);
        log::debug!("CONFIG: {:02x}", dump.config);
        log::debug!("DYNPD: {:02x}", dump.dynpd);
        log::debug!("FEATURE: {:02x}", dump.feature);
    }
}

impl<SPI, DO, IRQ, DELAY> RF24Radio<SPI, DO, IRQ, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    IRQ: IrqPin,
    DELAY: DelayNs,
{
    /// Is the radio reachable over the SPI bus?
    ///
    /// A floating or shorted bus reads the address width register back as a
    /// value outside its legal range.
    pub fn is_connected(&self) -> Result<bool, RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().is_connected()?)
    }

    /// Read back the chip's register file for troubleshooting.
    ///
    /// The snapshot is also emitted line by line on the `log` facade at debug
    /// level, so wiring problems can be diagnosed from the log output alone.
    pub fn dump_registers(
        &self,
    ) -> Result<RegisterDump, RadioError<SPI::Error, DO::Error, IRQ::Error>> {
        Ok(self.shared.lock_core().dump_registers()?)
    }
}

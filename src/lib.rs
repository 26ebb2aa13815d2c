#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`RF24Radio::new()`](fn@crate::radio::RF24Radio::new)
//! - [`RF24Radio::init()`](radio/struct.RF24Radio.html#method.init)
//! - [`RF24Radio::configure_receive_callback()`](radio/struct.RF24Radio.html#method.configure_receive_callback)
//! - [`RF24Radio::open_tx_pipe()`](radio/struct.RF24Radio.html#method.open_tx_pipe)
//! - [`RF24Radio::open_rx_pipe()`](radio/struct.RF24Radio.html#method.open_rx_pipe)
//! - [`RF24Radio::close_rx_pipe()`](radio/struct.RF24Radio.html#method.close_rx_pipe)
//! - [`RF24Radio::transmit()`](radio/struct.RF24Radio.html#method.transmit)
//! - [`RF24Radio::start_listening()`](radio/struct.RF24Radio.html#method.start_listening)
//! - [`RF24Radio::stop_listening()`](radio/struct.RF24Radio.html#method.stop_listening)
//! - [`RF24Radio::packet_available()`](radio/struct.RF24Radio.html#method.packet_available)
//! - [`RF24Radio::fetch_packet()`](radio/struct.RF24Radio.html#method.fetch_packet)
//!
//! ## Advanced API
//!
//! - [`RF24Radio::status()`](radio/struct.RF24Radio.html#method.status)
//! - [`RF24Radio::in_flight()`](radio/struct.RF24Radio.html#method.in_flight)
//! - [`RF24Radio::discard_received_packets()`](radio/struct.RF24Radio.html#method.discard_received_packets)
//! - [`RF24Radio::discard_queued_transmit_packets()`](radio/struct.RF24Radio.html#method.discard_queued_transmit_packets)
//! - [`RF24Radio::dump_registers()`](radio/struct.RF24Radio.html#method.dump_registers)
//! - [`RF24Radio::is_connected()`](radio/struct.RF24Radio.html#method.is_connected)
//! - [`RF24Radio::power_up()`](radio/struct.RF24Radio.html#method.power_up)
//! - [`RF24Radio::power_down()`](radio/struct.RF24Radio.html#method.power_down)
//! - [`RF24Radio::is_powered()`](radio/struct.RF24Radio.html#method.is_powered)
//! - [`RF24Radio::is_plus_variant()`](fn@crate::radio::RF24Radio::is_plus_variant)
//!
//! ## Configuration API
//!
//! - [`RF24Radio::with_config()`](radio/struct.RF24Radio.html#method.with_config)
//! - [`RF24Radio::set_channel()`](radio/struct.RF24Radio.html#method.set_channel)
//! - [`RF24Radio::channel()`](radio/struct.RF24Radio.html#method.channel)
//! - [`RF24Radio::set_data_rate()`](radio/struct.RF24Radio.html#method.set_data_rate)
//! - [`RF24Radio::data_rate()`](radio/struct.RF24Radio.html#method.data_rate)
//! - [`RF24Radio::set_output_power()`](radio/struct.RF24Radio.html#method.set_output_power)
//! - [`RF24Radio::output_power()`](radio/struct.RF24Radio.html#method.output_power)
//! - [`RF24Radio::set_auto_ack()`](radio/struct.RF24Radio.html#method.set_auto_ack)
//! - [`RF24Radio::auto_ack()`](radio/struct.RF24Radio.html#method.auto_ack)
//! - [`RF24Radio::set_retransmissions()`](radio/struct.RF24Radio.html#method.set_retransmissions)
//! - [`RF24Radio::retransmissions()`](radio/struct.RF24Radio.html#method.retransmissions)
//! - [`RF24Radio::set_address_width()`](radio/struct.RF24Radio.html#method.set_address_width)
//! - [`RF24Radio::address_width()`](radio/struct.RF24Radio.html#method.address_width)
//! - [`RF24Radio::set_payload_size()`](radio/struct.RF24Radio.html#method.set_payload_size)
//! - [`RF24Radio::payload_size()`](radio/struct.RF24Radio.html#method.payload_size)
//!

mod types;
pub use types::{DataRate, Edge, OutputPower, RegisterDump, StatusFlags};
pub mod radio;

#[cfg(test)]
mod test {
    use crate::radio::{IrqPin, RF24Radio};
    use crate::types::Edge;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };
    use std::sync::{Arc, Mutex};

    /// Expands a list of `(expected, response)` vector pairs into the matching
    /// array of full-duplex `SpiTransaction`s.
    ///
    /// NOTE: Only used to script bus expectations in this crate's unit tests.
    #[macro_export]
    macro_rules! spi_test_expects {
        ($( ($expected:expr , $response:expr $(,)? ) , ) + ) => {
            [
                $(
                    SpiTransaction::transaction_start(),
                    SpiTransaction::transfer_in_place($expected, $response),
                    SpiTransaction::transaction_end(),
                )*
            ]
        }
    }

    /// A stand-in IRQ line that captures the attached handler so tests can
    /// fire synthetic falling edges. Clones share the captured handler.
    #[derive(Clone, Default)]
    pub struct FakeIrqPin {
        handler: Arc<Mutex<Option<Box<dyn FnMut() + Send>>>>,
    }

    impl FakeIrqPin {
        /// Invoke the attached handler, as the transport would on a falling edge.
        pub fn fire(&self) {
            let mut handler = self.handler.lock().unwrap();
            if let Some(handler) = handler.as_mut() {
                handler();
            }
        }

        pub fn has_handler(&self) -> bool {
            self.handler.lock().unwrap().is_some()
        }
    }

    impl embedded_hal::digital::ErrorType for FakeIrqPin {
        type Error = core::convert::Infallible;
    }

    impl embedded_hal::digital::InputPin for FakeIrqPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            // the IRQ line idles high
            Ok(true)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(false)
        }
    }

    impl IrqPin for FakeIrqPin {
        fn attach(
            &mut self,
            _edge: Edge,
            handler: Box<dyn FnMut() + Send>,
        ) -> Result<(), Self::Error> {
            *self.handler.lock().unwrap() = Some(handler);
            Ok(())
        }

        fn detach(&mut self) -> Result<(), Self::Error> {
            *self.handler.lock().unwrap() = None;
            Ok(())
        }
    }

    /// A tuple struct to encapsulate objects used to mock [`RF24Radio`].
    pub struct MockRadio(
        pub RF24Radio<SpiMock<u8>, PinMock, FakeIrqPin, NoopDelay>,
        pub SpiMock<u8>,
        pub PinMock,
        pub FakeIrqPin,
    );

    /// Create mock objects using the given expectations.
    pub fn mk_radio(
        ce_expectations: &[PinTransaction],
        spi_expectations: &[SpiTransaction<u8>],
    ) -> MockRadio {
        let spi = SpiMock::new(spi_expectations);
        let ce_pin = PinMock::new(ce_expectations);
        let irq_pin = FakeIrqPin::default();
        let delay_impl = NoopDelay;
        let radio = RF24Radio::new(ce_pin.clone(), spi.clone(), irq_pin.clone(), delay_impl);
        MockRadio(radio, spi, ce_pin, irq_pin)
    }
}

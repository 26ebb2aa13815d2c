use crate::types::{DataRate, OutputPower};

/// A bundle of radio settings applied in one call.
///
/// This struct follows a builder pattern. All fields are private, so start
/// from the [`RadioConfig::default`] constructor and chain the `with_*`
/// methods.
/// ```
/// use nrf24_radio::radio::RadioConfig;
///
/// let config = RadioConfig::default().with_channel(83);
/// assert_eq!(config.channel(), 83);
/// ```
/// Apply the result with
/// [`RF24Radio::with_config()`](crate::radio::RF24Radio::with_config).
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    channel: u8,
    address_width: u8,
    payload_size: u8,
    data_rate: DataRate,
    output_power: OutputPower,
    retry_count: u8,
    retry_delay_us: u32,
    auto_ack: bool,
}

impl Default for RadioConfig {
    /// Construct a [`RadioConfig`] holding the library defaults.
    ///
    /// | setting | default |
    /// |--------:|:--------|
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::address_width()`] | `5` |
    /// | [`RadioConfig::payload_size()`] | `32` |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::output_power()`] | [`OutputPower::Max`] |
    /// | [`RadioConfig::retry_count()`] | `15` |
    /// | [`RadioConfig::retry_delay_us()`] | `250` |
    /// | [`RadioConfig::auto_ack()`] | `true` |
    fn default() -> Self {
        Self {
            channel: 76,
            address_width: 5,
            payload_size: 32,
            data_rate: DataRate::Mbps1,
            output_power: OutputPower::Max,
            retry_count: 15,
            retry_delay_us: 250,
            auto_ack: true,
        }
    }
}

impl RadioConfig {
    /// The value last given to [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the radio channel (the carrier frequency).
    ///
    /// Values above 125 are clamped to 125. The carrier frequency follows as:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value.min(125),
            ..self
        }
    }

    /// The value last given to [`RadioConfig::with_address_width()`].
    pub const fn address_width(&self) -> u8 {
        self.address_width
    }

    /// Set the address width in bytes.
    ///
    /// This value is clamped to range [3, 5].
    pub fn with_address_width(self, value: u8) -> Self {
        Self {
            address_width: value.clamp(3, 5),
            ..self
        }
    }

    /// The value last given to [`RadioConfig::with_payload_size()`].
    pub const fn payload_size(&self) -> u8 {
        self.payload_size
    }

    /// Set the static payload length used on all pipes.
    ///
    /// This value is clamped to range [1, 32].
    pub fn with_payload_size(self, value: u8) -> Self {
        Self {
            payload_size: value.clamp(1, 32),
            ..self
        }
    }

    /// The value last given to [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// The on-air data rate.
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// The value last given to [`RadioConfig::with_output_power()`].
    pub const fn output_power(&self) -> OutputPower {
        self.output_power
    }

    /// The Power Amplifier level.
    pub fn with_output_power(self, level: OutputPower) -> Self {
        Self {
            output_power: level,
            ..self
        }
    }

    /// The retransmission `count` (set via [`RadioConfig::with_retransmissions()`]).
    pub const fn retry_count(&self) -> u8 {
        self.retry_count
    }

    /// The retransmission `delay_us` (set via [`RadioConfig::with_retransmissions()`]).
    pub const fn retry_delay_us(&self) -> u32 {
        self.retry_delay_us
    }

    /// Set the automatic retransmission parameters.
    ///
    /// `count` is the number of retry attempts (clamped to range [0, 15]) and
    /// `delay_us` the time between attempts in microseconds (rounded to the
    /// nearest multiple of 250 in range [250, 4000]).
    pub fn with_retransmissions(self, count: u8, delay_us: u32) -> Self {
        Self {
            retry_count: count.min(15),
            retry_delay_us: ((delay_us.min(4000) + 124) / 250).max(1) * 250,
            ..self
        }
    }

    /// The value last given to [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> bool {
        self.auto_ack
    }

    /// Enable or disable automatic acknowledgement on all pipes.
    pub fn with_auto_ack(self, enable: bool) -> Self {
        Self {
            auto_ack: enable,
            ..self
        }
    }
}

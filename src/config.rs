//! Session configuration.

use std::time::Duration;

use crate::device::{DeviceCode, DongleId};
use crate::error::Error;

/// Default channel byte of device-directed commands.
pub const DEFAULT_CHANNEL: u8 = 0x01;

/// Default per-step timeout of the initialization handshake.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(3);

/// Default acknowledgement timeout of the outbound queue.
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Default debounce interval of the device registrar.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

/// Configuration of a transceiver session.
#[derive(Clone, Debug)]
pub struct Config {
    /// Serial number of the USB stick.
    pub code: DongleId,
    /// Devices to register during the initial handshake.
    pub pairs: Vec<DeviceCode>,
    /// Channel byte for device-directed commands.
    pub channel: u8,
    /// Per-step timeout of the initialization handshake.
    pub step_timeout: Duration,
    /// Acknowledgement timeout of the outbound queue.
    pub ack_timeout: Duration,
    /// Debounce interval of the device registrar.
    pub debounce: Duration,
}

impl Config {
    /// Creates a configuration from the stick's serial number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if the serial is not six hex
    /// characters starting with `6F`.
    pub fn new(code: &str) -> Result<Self, Error> {
        code.parse()
            .map(Self::with_code)
            .map_err(|_| Error::ConfigInvalid(format!("invalid transceiver serial: {code:?}")))
    }

    /// Creates a configuration from a validated serial number.
    #[must_use]
    pub const fn with_code(code: DongleId) -> Self {
        Self {
            code,
            pairs: Vec::new(),
            channel: DEFAULT_CHANNEL,
            step_timeout: DEFAULT_STEP_TIMEOUT,
            ack_timeout: DEFAULT_ACK_TIMEOUT,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Sets the devices to register during the initial handshake.
    #[must_use]
    pub fn pairs(mut self, pairs: Vec<DeviceCode>) -> Self {
        self.pairs = pairs;
        self
    }

    /// Sets the channel byte for device-directed commands.
    #[must_use]
    pub const fn channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }
}

//! Addressing of DuoFern devices and the USB transceiver.

use core::fmt::{Display, Formatter};
use core::str::FromStr;

use crate::error::Error;
use crate::utils::{parse_fixed, HexSlice};

/// Radio address of a DuoFern device.
///
/// Rendered as six uppercase hex characters. The leading byte encodes
/// the device class, see [`DeviceKind`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DeviceCode([u8; 3]);

impl DeviceCode {
    /// The reserved broadcast address.
    pub const BROADCAST: Self = Self([0xFF, 0xFF, 0xFF]);

    /// Creates a device code from its raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of the device code.
    #[must_use]
    pub const fn bytes(self) -> [u8; 3] {
        self.0
    }

    /// Determines whether this is the broadcast address.
    #[must_use]
    pub fn is_broadcast(self) -> bool {
        self == Self::BROADCAST
    }

    /// Returns the device class encoded in the leading byte.
    #[must_use]
    pub const fn kind(self) -> DeviceKind {
        DeviceKind::from_code(self.0[0])
    }
}

impl Display for DeviceCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&HexSlice::new(&self.0), f)
    }
}

impl FromStr for DeviceCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s)
            .map(Self)
            .ok_or_else(|| Error::InvalidArgument(format!("not a device code: {s:?}")))
    }
}

/// Serial number of the DuoFern USB transceiver stick.
///
/// Six hex characters whose first byte is always `0x6F`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DongleId([u8; 3]);

impl DongleId {
    /// The fixed leading byte of every transceiver serial.
    pub const PREFIX: u8 = 0x6F;

    /// Creates a dongle id from its raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the leading byte is not [`Self::PREFIX`].
    pub fn new(bytes: [u8; 3]) -> Result<Self, Error> {
        if bytes[0] == Self::PREFIX {
            Ok(Self(bytes))
        } else {
            Err(Error::InvalidArgument(format!(
                "not a transceiver serial: {}",
                HexSlice::new(&bytes)
            )))
        }
    }

    /// Returns the raw bytes of the serial.
    #[must_use]
    pub const fn bytes(self) -> [u8; 3] {
        self.0
    }
}

impl Display for DongleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&HexSlice::new(&self.0), f)
    }
}

impl FromStr for DongleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s)
            .ok_or_else(|| Error::InvalidArgument(format!("not a transceiver serial: {s:?}")))
            .and_then(Self::new)
    }
}

/// Device classes distinguished by the leading byte of a [`DeviceCode`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DeviceKind {
    /// Roller shutter actuators.
    Blind,
    /// Venetian blind actuators with slat control.
    VenetianBlind,
    /// Garage and yard gate actuators.
    Gate,
    /// Switching actuators.
    Actuator,
    /// Dimming actuators.
    Dimmer,
    /// Environmental sensors.
    Sensor,
    /// Radiator thermostats.
    Thermostat,
    /// Hand-held and wall-mounted remote controls.
    Remote,
    /// A device class this library does not know about.
    Unknown,
}

impl DeviceKind {
    /// Classifies a device by the leading byte of its code.
    #[must_use]
    pub const fn from_code(byte: u8) -> Self {
        match byte {
            0x40 | 0x41 | 0x47 | 0x49 | 0x61 | 0x62 => Self::Blind,
            0x42 | 0x4B | 0x4C | 0x70 => Self::VenetianBlind,
            0x4E => Self::Gate,
            0x43 | 0x46 | 0x71 => Self::Actuator,
            0x48 | 0x4A => Self::Dimmer,
            0x65 | 0x69 | 0xA5 | 0xA9 | 0xAA | 0xAB | 0xAC | 0xAF => Self::Sensor,
            0x73 | 0xE1 => Self::Thermostat,
            0x74 | 0xA0..=0xA4 | 0xA7 | 0xA8 | 0xAD | 0xE0 => Self::Remote,
            _ => Self::Unknown,
        }
    }
}

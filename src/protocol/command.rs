//! Catalog of device-directed commands.

use crate::error::Error;

/// Marker byte enabling an automatic program.
const AUTOMATIC_ON: u8 = 0xFD;

/// Marker byte disabling an automatic program.
const AUTOMATIC_OFF: u8 = 0xFE;

/// A command addressed to a single device or to the broadcast address.
///
/// Every command expands to a four-byte body placed behind the channel byte
/// of the outbound frame. Percentages are carried as their plain decimal
/// value, so 50 % travels as `0x32`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Drive up / open.
    Up,
    /// Drive down / close.
    Down,
    /// Stop movement.
    Stop,
    /// Toggle between up, stop and down.
    Toggle,
    /// Drive to a position in percent (0 = open, 100 = closed).
    Position(u8),
    /// Tilt the slats to a position in percent.
    SlatPosition(u8),
    /// Ask the device to report its status.
    StatusRequest,
    /// Engage or release sun mode.
    SunMode(bool),
    /// Engage or release wind mode.
    WindMode(bool),
    /// Engage or release rain mode.
    RainMode(bool),
    /// Enable or disable the sun automatic.
    SunAutomatic(bool),
    /// Enable or disable the time automatic.
    TimeAutomatic(bool),
    /// Enable or disable the dawn automatic.
    DawnAutomatic(bool),
    /// Enable or disable the dusk automatic.
    DuskAutomatic(bool),
    /// Enable or disable manual mode.
    ManualMode(bool),
    /// Enable or disable the wind automatic.
    WindAutomatic(bool),
    /// Enable or disable the rain automatic.
    RainAutomatic(bool),
    /// Set the target position for sun mode in percent.
    SunPosition(u8),
    /// Set the ventilating position in percent.
    VentilatingPosition(u8),
    /// Enable or disable the ventilating mode.
    VentilatingMode(bool),
}

impl Command {
    /// Expands the command into its four-byte body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a percentage exceeds 100.
    pub fn body(self) -> Result<[u8; 4], Error> {
        Ok(match self {
            Self::Up => [0x07, 0x01, 0x00, 0x00],
            Self::Down => [0x07, 0x03, 0x00, 0x00],
            Self::Stop => [0x07, 0x02, 0x00, 0x00],
            Self::Toggle => [0x07, 0x1A, 0x00, 0x00],
            Self::Position(percent) => [0x07, 0x07, 0x00, validated(percent)?],
            Self::SlatPosition(percent) => [0x07, 0x1B, 0x00, validated(percent)?],
            Self::StatusRequest => [0x0F, 0x40, 0x00, 0x00],
            Self::SunMode(true) => [0x07, 0x08, 0x01, 0xFF],
            Self::SunMode(false) => [0x07, 0x0A, 0x01, 0x00],
            Self::WindMode(true) => [0x07, 0x0D, 0x01, 0xFF],
            Self::WindMode(false) => [0x07, 0x0E, 0x01, 0x00],
            Self::RainMode(true) => [0x07, 0x11, 0x01, 0xFF],
            Self::RainMode(false) => [0x07, 0x12, 0x01, 0x00],
            Self::TimeAutomatic(enable) => automatic(0x03, enable),
            Self::SunAutomatic(enable) => automatic(0x04, enable),
            Self::DawnAutomatic(enable) => automatic(0x05, enable),
            Self::DuskAutomatic(enable) => automatic(0x06, enable),
            Self::ManualMode(enable) => automatic(0x07, enable),
            Self::WindAutomatic(enable) => automatic(0x08, enable),
            Self::RainAutomatic(enable) => automatic(0x09, enable),
            Self::SunPosition(percent) => [0x08, 0x01, 0x00, validated(percent)?],
            Self::VentilatingPosition(percent) => [0x08, 0x02, 0x00, validated(percent)?],
            Self::VentilatingMode(true) => [0x08, 0x02, 0x00, AUTOMATIC_ON],
            Self::VentilatingMode(false) => [0x08, 0x02, 0x00, AUTOMATIC_OFF],
        })
    }

    /// Determines whether this command is a status request.
    ///
    /// Status requests travel on channel `FF` with an empty transceiver
    /// serial and suffix `01`.
    #[must_use]
    pub const fn is_status_request(self) -> bool {
        matches!(self, Self::StatusRequest)
    }
}

/// Body of an automatic-program switch.
const fn automatic(program: u8, enable: bool) -> [u8; 4] {
    [
        0x08,
        program,
        0x00,
        if enable { AUTOMATIC_ON } else { AUTOMATIC_OFF },
    ]
}

fn validated(percent: u8) -> Result<u8, Error> {
    if percent <= 100 {
        Ok(percent)
    } else {
        Err(Error::InvalidArgument(format!(
            "position {percent} exceeds 100 %"
        )))
    }
}

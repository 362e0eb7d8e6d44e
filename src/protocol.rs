//! Construction of outbound frames.
//!
//! All device-directed frames share one layout:
//!
//! ```text
//! byte:  0    1    2..6   6..15     15..18   18..21   21
//!        0D   CH   CMD    padding   DONGLE   DEVICE   SFX
//! ```
//!
//! Status requests are special-cased: they travel on channel `FF`, carry an
//! all-zero transceiver serial and end in suffix `01`.

pub use command::Command;

use crate::device::{DeviceCode, DongleId};
use crate::error::Error;
use crate::frame::{Frame, FRAME_SIZE};

pub mod handshake;

mod command;

/// Leading byte of every device-directed frame.
const COMMAND_HEADER: u8 = 0x0D;

/// Channel used for status requests.
const STATUS_CHANNEL: u8 = 0xFF;

/// Suffix byte of status requests.
const STATUS_SUFFIX: u8 = 0x01;

/// Builds a command frame addressed to `device`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the command carries an invalid value.
pub fn device_frame(
    channel: u8,
    dongle: DongleId,
    device: DeviceCode,
    command: Command,
) -> Result<Frame, Error> {
    let body = command.body()?;
    let mut bytes = [0; FRAME_SIZE];
    bytes[0] = COMMAND_HEADER;
    bytes[2..6].copy_from_slice(&body);
    bytes[18..21].copy_from_slice(&device.bytes());

    if command.is_status_request() {
        bytes[1] = STATUS_CHANNEL;
        bytes[21] = STATUS_SUFFIX;
    } else {
        bytes[1] = channel;
        bytes[15..18].copy_from_slice(&dongle.bytes());
    }

    Ok(Frame::new(bytes))
}

/// Builds the two frames that put a hand remote into pairing mode.
///
/// The frames are identical except for their suffix bytes and must both be
/// submitted, back to back.
#[must_use]
pub fn remote_pair_frames(channel: u8, dongle: DongleId, device: DeviceCode) -> [Frame; 2] {
    let mut bytes = [0; FRAME_SIZE];
    bytes[0] = COMMAND_HEADER;
    bytes[1] = channel;
    bytes[2..6].copy_from_slice(&[0x06, 0x01, 0x00, 0x00]);
    bytes[15..18].copy_from_slice(&dongle.bytes());
    bytes[18..21].copy_from_slice(&device.bytes());
    let first = Frame::new(bytes);
    bytes[21] = 0x01;
    [first, Frame::new(bytes)]
}

/// Builds the status request broadcast to all paired devices.
#[must_use]
pub fn broadcast_status_request() -> Frame {
    let mut bytes = [0; FRAME_SIZE];
    bytes[0] = COMMAND_HEADER;
    bytes[1] = STATUS_CHANNEL;
    bytes[2..6].copy_from_slice(&[0x0F, 0x40, 0x00, 0x00]);
    bytes[18..21].copy_from_slice(&DeviceCode::BROADCAST.bytes());
    bytes[21] = STATUS_SUFFIX;
    Frame::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::{broadcast_status_request, device_frame, remote_pair_frames, Command};
    use crate::device::{DeviceCode, DongleId};

    fn dongle() -> DongleId {
        "6F1234".parse().expect("Valid serial")
    }

    fn device() -> DeviceCode {
        "49ABCD".parse().expect("Valid device code")
    }

    #[test]
    fn test_up_frame() {
        let frame =
            device_frame(0x01, dongle(), device(), Command::Up).expect("Valid command frame");
        assert_eq!(
            frame.to_string(),
            "0D01070100000000000000000000006F123449ABCD00"
        );
    }

    #[test]
    fn test_position_frame() {
        let frame = device_frame(0x01, dongle(), device(), Command::Position(50))
            .expect("Valid command frame");
        assert_eq!(
            frame.to_string(),
            "0D01070700320000000000000000006F123449ABCD00"
        );
    }

    #[test]
    fn test_broadcast_status_request() {
        assert_eq!(
            broadcast_status_request().to_string(),
            "0DFF0F400000000000000000000000000000FFFFFF01"
        );
    }

    #[test]
    fn test_status_request_ignores_channel_and_dongle() {
        let frame = device_frame(0x2A, dongle(), device(), Command::StatusRequest)
            .expect("Valid command frame");
        assert_eq!(
            frame.to_string(),
            "0DFF0F40000000000000000000000000000049ABCD01"
        );
    }

    #[test]
    fn test_custom_channel() {
        let frame =
            device_frame(0x2A, dongle(), device(), Command::Stop).expect("Valid command frame");
        assert_eq!(
            frame.to_string(),
            "0D2A070200000000000000000000006F123449ABCD00"
        );
    }

    #[test]
    fn test_remote_pair_frames() {
        let [first, second] = remote_pair_frames(0x01, dongle(), device());
        assert_eq!(
            first.to_string(),
            "0D01060100000000000000000000006F123449ABCD00"
        );
        assert_eq!(
            second.to_string(),
            "0D01060100000000000000000000006F123449ABCD01"
        );
    }

    #[test]
    fn test_layout_invariants() {
        let commands = [
            Command::Up,
            Command::Down,
            Command::Stop,
            Command::Toggle,
            Command::Position(75),
            Command::SlatPosition(25),
            Command::SunMode(true),
            Command::WindMode(false),
            Command::RainMode(true),
            Command::SunAutomatic(true),
            Command::TimeAutomatic(false),
            Command::DawnAutomatic(true),
            Command::DuskAutomatic(false),
            Command::ManualMode(true),
            Command::WindAutomatic(false),
            Command::RainAutomatic(true),
            Command::SunPosition(10),
            Command::VentilatingPosition(90),
            Command::VentilatingMode(true),
        ];

        for command in commands {
            let frame =
                device_frame(0x01, dongle(), device(), command).expect("Valid command frame");
            let bytes = frame.bytes();
            assert_eq!(bytes[0], 0x0D, "{command:?}");
            assert_eq!(bytes[1], 0x01, "{command:?}");
            assert_eq!(&bytes[6..15], &[0; 9], "{command:?}");
            assert_eq!(&bytes[15..18], &[0x6F, 0x12, 0x34], "{command:?}");
            assert_eq!(&bytes[18..21], &[0x49, 0xAB, 0xCD], "{command:?}");
            assert_eq!(bytes[21], 0x00, "{command:?}");
        }
    }
}

//! The fixed-width DuoFern wire frame.

use core::fmt::{Debug, Display, Formatter};
use core::str::FromStr;

use crate::device::DeviceCode;
use crate::error::Error;
use crate::utils::{parse_fixed, HexSlice};

/// Size of every frame on the wire in bytes.
pub const FRAME_SIZE: usize = 22;

/// Byte offset of the device code in inbound frames.
const DEVICE_OFFSET: usize = 15;

/// A single 22-byte frame on the serial link.
///
/// There is no sync word and no length prefix. Frames are conventionally
/// rendered as 44 uppercase hex characters, which is also how they appear
/// in the log.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Frame([u8; FRAME_SIZE]);

impl Frame {
    /// The constant acknowledgement frame.
    pub const ACK: Self = {
        let mut bytes = [0; FRAME_SIZE];
        bytes[0] = 0x81;
        Self(bytes)
    };

    /// Creates a frame from its raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; FRAME_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of the frame.
    #[must_use]
    pub const fn bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }

    /// Classifies the frame by its leading bytes.
    #[must_use]
    pub fn kind(&self) -> FrameKind {
        match self.0 {
            [0x81, ..] => FrameKind::Ack,
            [0x06, 0x02, ..] => FrameKind::Paired(self.device_code()),
            [0x06, 0x03, ..] => FrameKind::Unpaired(self.device_code()),
            _ => FrameKind::Message,
        }
    }

    /// Determines whether this is a device status report.
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self.0, [0x0F, 0xFF, 0x0F, ..])
    }

    /// Returns the status format byte.
    #[must_use]
    pub const fn format_byte(&self) -> u8 {
        self.0[3]
    }

    /// Returns the device code carried in an inbound frame.
    #[must_use]
    pub fn device_code(&self) -> DeviceCode {
        DeviceCode::new([
            self.0[DEVICE_OFFSET],
            self.0[DEVICE_OFFSET + 1],
            self.0[DEVICE_OFFSET + 2],
        ])
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&HexSlice::new(&self.0), f)
    }
}

impl Debug for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Frame({self})")
    }
}

impl FromStr for Frame {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s)
            .map(Self)
            .ok_or_else(|| Error::InvalidArgument(format!("not a frame: {s:?}")))
    }
}

impl From<[u8; FRAME_SIZE]> for Frame {
    fn from(bytes: [u8; FRAME_SIZE]) -> Self {
        Self(bytes)
    }
}

/// Classification of inbound frames.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameKind {
    /// An acknowledgement from the transceiver.
    Ack,
    /// The transceiver has paired a device.
    Paired(DeviceCode),
    /// The transceiver has unpaired a device.
    Unpaired(DeviceCode),
    /// A device-originated message.
    Message,
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameKind, FRAME_SIZE};
    use crate::device::DeviceCode;

    fn frame_with(leading: &[u8]) -> Frame {
        let mut bytes = [0; FRAME_SIZE];
        bytes[..leading.len()].copy_from_slice(leading);
        Frame::new(bytes)
    }

    #[test]
    fn test_ack_constant() {
        assert_eq!(
            Frame::ACK.to_string(),
            "81000000000000000000000000000000000000000000"
        );
        assert_eq!(Frame::ACK.kind(), FrameKind::Ack);
    }

    #[test]
    fn test_hex_round_trip() {
        let hex = "0D01070100000000000000000000006F123449ABCD00";
        let frame: Frame = hex.parse().expect("Valid frame hex");
        assert_eq!(frame.to_string(), hex);
    }

    #[test]
    fn test_from_str_rejects_bad_input() {
        assert!("0D01".parse::<Frame>().is_err());
        assert!("ZZ01070100000000000000000000006F123449ABCD00"
            .parse::<Frame>()
            .is_err());
    }

    #[test]
    fn test_ack_with_tail_is_ack() {
        let mut bytes = [0xAB; FRAME_SIZE];
        bytes[0] = 0x81;
        assert_eq!(Frame::new(bytes).kind(), FrameKind::Ack);
    }

    #[test]
    fn test_pair_events() {
        let mut bytes = [0; FRAME_SIZE];
        bytes[0] = 0x06;
        bytes[1] = 0x02;
        bytes[15..18].copy_from_slice(&[0x49, 0xAB, 0xCD]);
        assert_eq!(
            Frame::new(bytes).kind(),
            FrameKind::Paired(DeviceCode::new([0x49, 0xAB, 0xCD]))
        );

        bytes[1] = 0x03;
        assert_eq!(
            Frame::new(bytes).kind(),
            FrameKind::Unpaired(DeviceCode::new([0x49, 0xAB, 0xCD]))
        );
    }

    #[test]
    fn test_status_detection() {
        let status = frame_with(&[0x0F, 0xFF, 0x0F, 0x21]);
        assert!(status.is_status());
        assert_eq!(status.format_byte(), 0x21);
        assert_eq!(status.kind(), FrameKind::Message);

        assert!(!frame_with(&[0x0F, 0xFF, 0x0E]).is_status());
        assert!(!Frame::ACK.is_status());
    }
}

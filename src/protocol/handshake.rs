//! The frames of the initialization handshake.
//!
//! The transceiver forgets its pair table on every session, so the
//! handshake is replayed in full whenever the session is (re)opened.

use crate::device::{DeviceCode, DongleId};
use crate::frame::{Frame, FRAME_SIZE};

/// First initialization frame.
#[must_use]
pub const fn init1() -> Frame {
    leading(&[0x01])
}

/// Second initialization frame.
#[must_use]
pub const fn init2() -> Frame {
    leading(&[0x0E])
}

/// Third initialization frame, sent after the transceiver serial.
#[must_use]
pub const fn init3() -> Frame {
    leading(&[0x14, 0x14])
}

/// Frame registering the transceiver serial.
#[must_use]
pub fn set_dongle(dongle: DongleId) -> Frame {
    let [d0, d1, d2] = dongle.bytes();
    leading(&[0x0A, d0, d1, d2, 0x00, 0x01])
}

/// Frame registering one paired device at position `counter`.
#[must_use]
pub fn set_pairs(counter: u8, device: DeviceCode) -> Frame {
    let [d0, d1, d2] = device.bytes();
    leading(&[0x03, counter, d0, d1, d2])
}

/// Final initialization frame.
#[must_use]
pub const fn init_end() -> Frame {
    leading(&[0x10, 0x01])
}

/// Builds a frame from its leading bytes, right-padded with zeros.
const fn leading(bytes: &[u8]) -> Frame {
    let mut frame = [0; FRAME_SIZE];
    let mut index = 0;

    while index < bytes.len() {
        frame[index] = bytes[index];
        index += 1;
    }

    Frame::new(frame)
}

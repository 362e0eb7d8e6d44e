//! Events emitted by the transceiver worker.

use crate::device::DeviceCode;
use crate::error::Error;
use crate::frame::Frame;
use crate::status::StatusMap;

/// Everything the worker reports back to the host.
///
/// Consumers are expected to match exhaustively; additions to this type
/// are breaking changes.
#[derive(Clone, Debug)]
pub enum Event {
    /// The serial endpoint has been taken over by the worker.
    Opened,
    /// The initialization handshake completed; commands are being sent.
    Initialized,
    /// The worker has shut down and released the endpoint.
    Closed,
    /// Trace: a frame arrived from the transceiver.
    FrameRx(Frame),
    /// Trace: a frame was written to the transceiver.
    FrameTx(Frame),
    /// The transceiver paired a device.
    Paired(DeviceCode),
    /// The transceiver unpaired a device.
    Unpaired(DeviceCode),
    /// A device-originated message, acknowledged on the wire before emission.
    Message(Frame),
    /// A decoded device status report, emitted after [`Event::Message`].
    Status(DeviceCode, StatusMap),
    /// An error occurred; see [`Error`] for the failure policy.
    Error(Error),
}

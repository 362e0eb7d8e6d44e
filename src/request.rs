//! Requests accepted by the transceiver worker.

use crate::device::DeviceCode;
use crate::frame::Frame;

/// A request from the host to the worker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    /// Enqueue an outbound frame.
    ///
    /// Frames are transmitted in submission order, one at a time, each
    /// gated on the acknowledgement of its predecessor.
    Submit(Frame),
    /// Re-initialize the session with a new pair list.
    Reopen(Vec<DeviceCode>),
    /// Shut the worker down.
    Close,
}

//! Command-side handle to a running transceiver worker.

use std::sync::mpsc::Sender;

use crate::device::{DeviceCode, DongleId};
use crate::error::Error;
use crate::frame::Frame;
use crate::protocol::{self, Command};
use crate::request::Request;

/// A cloneable handle submitting commands to the transceiver worker.
///
/// The handle builds frames locally and hands them to the worker, which
/// transmits them in submission order. Dropping every handle shuts the
/// worker down.
#[derive(Clone, Debug)]
pub struct Host {
    requests: Sender<Request>,
    code: DongleId,
    channel: u8,
}

impl Host {
    /// Create a new host handle.
    #[must_use]
    pub(crate) const fn new(requests: Sender<Request>, code: DongleId, channel: u8) -> Self {
        Self {
            requests,
            code,
            channel,
        }
    }

    /// Send a command to a device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the command carries an invalid
    /// value and [`Error::ChannelDisconnected`] if the worker is gone.
    pub fn command(&self, device: DeviceCode, command: Command) -> Result<(), Error> {
        self.submit(protocol::device_frame(self.channel, self.code, device, command)?)
    }

    /// Ask a single device to report its status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelDisconnected`] if the worker is gone.
    pub fn status_request(&self, device: DeviceCode) -> Result<(), Error> {
        self.command(device, Command::StatusRequest)
    }

    /// Ask all paired devices to report their status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelDisconnected`] if the worker is gone.
    pub fn broadcast_status_request(&self) -> Result<(), Error> {
        self.submit(protocol::broadcast_status_request())
    }

    /// Put a hand remote into pairing mode.
    ///
    /// Submits the two-frame pairing sequence back to back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelDisconnected`] if the worker is gone.
    pub fn pair_remote(&self, device: DeviceCode) -> Result<(), Error> {
        let [first, second] = protocol::remote_pair_frames(self.channel, self.code, device);
        self.submit(first)?;
        self.submit(second)
    }

    /// Submit a raw frame for transmission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelDisconnected`] if the worker is gone.
    pub fn submit(&self, frame: Frame) -> Result<(), Error> {
        self.send(Request::Submit(frame))
    }

    /// Re-initialize the session with a new pair list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelDisconnected`] if the worker is gone.
    pub fn reopen(&self, pairs: Vec<DeviceCode>) -> Result<(), Error> {
        self.send(Request::Reopen(pairs))
    }

    /// Shut the worker down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelDisconnected`] if the worker is already gone.
    pub fn close(&self) -> Result<(), Error> {
        self.send(Request::Close)
    }

    fn send(&self, request: Request) -> Result<(), Error> {
        self.requests
            .send(request)
            .map_err(|_| Error::ChannelDisconnected)
    }
}

//! Communication channels of the transceiver worker.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use log::warn;

use crate::error::Error;
use crate::event::Event;
use crate::request::Request;

/// The worker's ends of the request and event channels.
#[derive(Debug)]
pub struct Channels {
    requests: Receiver<Request>,
    events: Sender<Event>,
}

impl Channels {
    /// Create a new set of communication channels.
    #[must_use]
    pub const fn new(requests: Receiver<Request>, events: Sender<Event>) -> Self {
        Self { requests, events }
    }

    /// Receive a pending request from the host, without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelDisconnected`] once every host handle has
    /// been dropped.
    pub fn receive(&self) -> Result<Option<Request>, Error> {
        match self.requests.try_recv() {
            Ok(request) => Ok(Some(request)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::ChannelDisconnected),
        }
    }

    /// Emit an event to the host.
    ///
    /// Events are fire-and-forget: if the host dropped its receiver, the
    /// event is lost and a warning is logged.
    pub fn emit(&self, event: Event) {
        if self.events.send(event).is_err() {
            warn!("Event receiver disconnected. Dropping event.");
        }
    }
}

//! Error types of the DuoFern protocol engine.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::device::DeviceCode;
use crate::frame::Frame;

/// Any error that can occur while talking to the transceiver.
#[derive(Clone, Debug)]
pub enum Error {
    /// The supplied configuration cannot be used to start a session.
    ConfigInvalid(String),
    /// An argument failed validation during frame construction.
    InvalidArgument(String),
    /// An I/O error occurred on the serial endpoint.
    Io(Arc<std::io::Error>),
    /// The serial endpoint could not be opened.
    SerialConnection(serialport::Error),
    /// A handshake step was not answered within the step timeout.
    HandshakeStepTimeout(&'static str),
    /// A transmitted frame was not acknowledged within the queue timeout.
    ///
    /// This is advisory. The frame is not retransmitted.
    QueueAckTimeout(Frame),
    /// Registration of newly observed devices was given up after repeated failures.
    RegistrationExhausted(Vec<DeviceCode>),
    /// Re-initialization failed; the previous pair list has been restored.
    ReopenFailed(Box<Error>),
    /// A communication channel to or from the worker has disconnected.
    ChannelDisconnected,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigInvalid(detail) => write!(f, "Invalid configuration: {detail}"),
            Self::InvalidArgument(detail) => write!(f, "Invalid argument: {detail}"),
            Self::Io(error) => write!(f, "{error}"),
            Self::SerialConnection(error) => write!(f, "{error}"),
            Self::HandshakeStepTimeout(step) => {
                write!(f, "Handshake step {step} was not answered in time.")
            }
            Self::QueueAckTimeout(frame) => {
                write!(f, "No acknowledgement received for frame {frame}.")
            }
            Self::RegistrationExhausted(devices) => {
                write!(f, "Giving up registration of devices: ")?;

                let mut devices = devices.iter();

                if let Some(device) = devices.next() {
                    write!(f, "{device}")?;
                }

                for device in devices {
                    write!(f, ", {device}")?;
                }

                Ok(())
            }
            Self::ReopenFailed(cause) => write!(f, "Re-initialization failed: {cause}"),
            Self::ChannelDisconnected => write!(f, "Worker channel disconnected."),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::SerialConnection(error) => Some(error),
            Self::ReopenFailed(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(Arc::new(error))
    }
}

impl From<serialport::Error> for Error {
    fn from(error: serialport::Error) -> Self {
        Self::SerialConnection(error)
    }
}

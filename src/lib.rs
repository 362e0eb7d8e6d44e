//! Rademacher DuoFern radio protocol.
//!
//! This library implements the proprietary serial protocol of the DuoFern
//! USB transceiver stick, which bridges a host to a fleet of DuoFern radio
//! devices: roller shutters, venetian blinds, gates, dimmers, switches,
//! sensors, thermostats and hand remotes.
//!
//! The wire carries fixed 22-byte frames at 115200 baud. A session starts
//! with a multi-step initialization handshake registering the stick's
//! serial and its paired devices, after which commands are transmitted one
//! at a time, each gated on an acknowledgement. Devices heard on the air
//! but missing from the pair list are collected and registered through an
//! automatic re-initialization.
//!
//! This library is free software and is not affiliated with Rademacher.

pub use config::Config;
pub use device::{DeviceCode, DeviceKind, DongleId};
pub use error::Error;
pub use event::Event;
pub use frame::{Frame, FrameKind, FRAME_SIZE};
pub use host::Host;
pub use protocol::Command;
pub use request::Request;
pub use serial_port::open;
pub use status::{parse, parse_with_format, FieldName, FieldValue, Format, StatusMap, ValueMap};
pub use transceiver::{State, Transceiver};

mod config;
mod device;
mod error;
mod event;
mod frame;
mod frame_buffer;
mod host;
mod protocol;
mod request;
mod serial_port;
mod status;
mod transceiver;
mod utils;

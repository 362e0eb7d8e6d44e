//! Fixed-width framing over the serial byte stream.

use std::io::{Error, ErrorKind, Read, Write};

use log::trace;

use crate::frame::{Frame, FRAME_SIZE};
use crate::utils::HexSlice;

/// Capacity of the inbound accumulation buffer.
///
/// At most one frame is detached per poll, so the buffer never has to hold
/// more than two whole frames plus one partial read.
const BUFFER_SIZE: usize = 3 * FRAME_SIZE;

/// A buffer for reading and writing DuoFern frames.
///
/// The wire carries neither a sync word nor a length prefix. Inbound bytes
/// are accumulated until 22 of them are available, which are then detached
/// as one [`Frame`]. A single dropped byte desynchronizes the stream until
/// the session is re-initialized; no resynchronization is attempted.
#[derive(Debug)]
pub struct FrameBuffer<T> {
    inner: T,
    buffer: heapless::Vec<u8, BUFFER_SIZE>,
}

impl<T> FrameBuffer<T> {
    /// Create a new `FrameBuffer` with the given inner reader and/or writer.
    #[must_use]
    pub const fn new(inner: T) -> Self {
        Self {
            inner,
            buffer: heapless::Vec::new(),
        }
    }

    /// Return the inner reader-writer type.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Discard any partially accumulated frame.
    pub fn reset(&mut self) {
        if !self.buffer.is_empty() {
            trace!("Discarding {} buffered byte(s).", self.buffer.len());
            self.buffer.clear();
        }
    }

    /// Detach the leading frame from the buffer, if one is complete.
    fn detach_frame(&mut self) -> Option<Frame> {
        if self.buffer.len() < FRAME_SIZE {
            return None;
        }

        let mut bytes = [0; FRAME_SIZE];
        bytes.copy_from_slice(&self.buffer[..FRAME_SIZE]);
        let remainder = self.buffer.len() - FRAME_SIZE;
        self.buffer.copy_within(FRAME_SIZE.., 0);
        self.buffer.truncate(remainder);
        Some(Frame::new(bytes))
    }
}

/// The `FrameBuffer` can read DuoFern frames if `T` implements [`Read`].
impl<T> FrameBuffer<T>
where
    T: Read,
{
    /// Poll for the next inbound [`Frame`].
    ///
    /// Performs at most one read on the inner stream. Returns `Ok(None)` if
    /// the read timed out before a whole frame was available; the partial
    /// bytes stay buffered for the next poll.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the stream terminated or any other I/O error occurred.
    pub fn poll_frame(&mut self) -> std::io::Result<Option<Frame>> {
        if let Some(frame) = self.detach_frame() {
            return Ok(Some(frame));
        }

        let mut chunk = [0; FRAME_SIZE];

        match self.inner.read(&mut chunk) {
            Ok(0) => Err(Error::new(
                ErrorKind::UnexpectedEof,
                "Byte stream terminated unexpectedly.",
            )),
            Ok(count) => {
                trace!("Read {count} byte(s): {}", HexSlice::new(&chunk[..count]));
                self.buffer
                    .extend_from_slice(&chunk[..count])
                    .map_err(|()| {
                        Error::new(ErrorKind::OutOfMemory, "Inbound buffer overflow.")
                    })?;
                Ok(self.detach_frame())
            }
            Err(error)
                if error.kind() == ErrorKind::TimedOut
                    || error.kind() == ErrorKind::WouldBlock =>
            {
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

/// The `FrameBuffer` can write DuoFern frames if `T` implements [`Write`].
impl<T> FrameBuffer<T>
where
    T: Write,
{
    /// Write a [`Frame`] to the inner stream.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the write operation failed.
    pub fn write_frame(&mut self, frame: &Frame) -> std::io::Result<()> {
        trace!("Writing frame: {frame}");
        self.inner.write_all(frame.bytes())?;
        self.inner.flush()
    }
}

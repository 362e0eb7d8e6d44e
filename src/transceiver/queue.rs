//! The ACK-gated outbound queue.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::frame::Frame;

/// FIFO queue of outbound frames with a single in-flight slot.
///
/// At most one frame is awaiting acknowledgement at any time. The next
/// frame leaves the queue only once the in-flight one was acknowledged or
/// its timeout expired. Timed-out frames are not retransmitted: the
/// protocol has no idempotency guarantees and a retransmission could
/// actuate a device twice.
#[derive(Debug, Default)]
pub struct Queue {
    waiting: VecDeque<Frame>,
    in_flight: Option<InFlight>,
}

#[derive(Debug)]
struct InFlight {
    frame: Frame,
    deadline: Instant,
}

impl Queue {
    /// Appends a frame to the queue.
    pub fn push(&mut self, frame: Frame) {
        self.waiting.push_back(frame);
    }

    /// Acknowledges the in-flight frame, freeing the slot.
    ///
    /// Returns the acknowledged frame, or `None` if nothing was in flight.
    pub fn confirm(&mut self) -> Option<Frame> {
        self.in_flight.take().map(|in_flight| in_flight.frame)
    }

    /// Takes the next frame for transmission, occupying the in-flight slot.
    ///
    /// Returns `None` while a frame is in flight or the queue is empty.
    pub fn next_to_send(&mut self, now: Instant, timeout: Duration) -> Option<Frame> {
        if self.in_flight.is_some() {
            return None;
        }

        let frame = self.waiting.pop_front()?;
        self.in_flight = Some(InFlight {
            frame,
            deadline: now + timeout,
        });
        Some(frame)
    }

    /// Drops the in-flight frame if its acknowledgement deadline passed.
    ///
    /// Returns the expired frame for diagnostics.
    pub fn expire(&mut self, now: Instant) -> Option<Frame> {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| now >= in_flight.deadline)
        {
            return self.confirm();
        }

        None
    }

    /// Clears the queue, returning every pending frame.
    pub fn drain(&mut self) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(self.waiting.len() + 1);
        frames.extend(self.confirm());
        frames.extend(self.waiting.drain(..));
        frames
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Queue;
    use crate::frame::{Frame, FRAME_SIZE};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn frame(seed: u8) -> Frame {
        let mut bytes = [0; FRAME_SIZE];
        bytes[0] = 0x0D;
        bytes[21] = seed;
        Frame::new(bytes)
    }

    #[test]
    fn test_fifo_order_with_single_in_flight() {
        let mut queue = Queue::default();
        let now = Instant::now();
        queue.push(frame(1));
        queue.push(frame(2));

        assert_eq!(queue.next_to_send(now, TIMEOUT), Some(frame(1)));
        // Nothing leaves the queue until the first frame is acknowledged.
        assert_eq!(queue.next_to_send(now, TIMEOUT), None);
        assert_eq!(queue.confirm(), Some(frame(1)));
        assert_eq!(queue.next_to_send(now, TIMEOUT), Some(frame(2)));
        assert_eq!(queue.confirm(), Some(frame(2)));
        assert_eq!(queue.next_to_send(now, TIMEOUT), None);
    }

    #[test]
    fn test_expire_frees_the_slot() {
        let mut queue = Queue::default();
        let now = Instant::now();
        queue.push(frame(1));
        queue.push(frame(2));

        assert_eq!(queue.next_to_send(now, TIMEOUT), Some(frame(1)));
        assert_eq!(queue.expire(now), None);
        assert_eq!(queue.expire(now + TIMEOUT), Some(frame(1)));
        assert_eq!(queue.next_to_send(now, TIMEOUT), Some(frame(2)));
    }

    #[test]
    fn test_confirm_without_in_flight() {
        let mut queue = Queue::default();
        assert_eq!(queue.confirm(), None);
    }

    #[test]
    fn test_drain_returns_in_flight_first() {
        let mut queue = Queue::default();
        let now = Instant::now();
        queue.push(frame(1));
        queue.push(frame(2));
        queue.push(frame(3));
        assert_eq!(queue.next_to_send(now, TIMEOUT), Some(frame(1)));

        assert_eq!(queue.drain(), vec![frame(1), frame(2), frame(3)]);
        assert_eq!(queue.drain(), Vec::new());
    }
}

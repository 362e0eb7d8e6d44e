//! Detection and registration of unknown devices.
//!
//! The transceiver acknowledges frames from devices missing in its pair
//! table but silently drops commands addressed to them. Status reports
//! from such devices are therefore collected and, after a debounce
//! interval, folded into the pair list by re-running the handshake.

use std::time::{Duration, Instant};

use log::debug;

use crate::device::DeviceCode;

/// Number of re-initialization retries before a batch is dropped.
const MAX_RETRIES: u32 = 3;

/// Collects unknown device codes and schedules their registration.
#[derive(Debug, Default)]
pub struct Registrar {
    pending: Vec<DeviceCode>,
    deadline: Option<Instant>,
    retries: u32,
}

impl Registrar {
    /// Records a status report from a device missing in the pair list.
    ///
    /// The debounce timer restarts on every observation so that a burst of
    /// reports coalesces into a single re-initialization. During a backoff
    /// the rescheduled deadline is left untouched.
    pub fn observe(&mut self, device: DeviceCode, now: Instant, debounce: Duration) {
        if !self.pending.contains(&device) {
            debug!("Scheduling registration of device {device}");
            self.pending.push(device);
        }

        if self.retries == 0 {
            self.deadline = Some(now + debounce);
        }
    }

    /// Determines whether a registration attempt is due.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Postpones the pending registration by one debounce interval.
    pub fn defer(&mut self, now: Instant, debounce: Duration) {
        self.deadline = Some(now + debounce);
    }

    /// Returns the devices awaiting registration in observation order.
    #[must_use]
    pub fn pending(&self) -> &[DeviceCode] {
        &self.pending
    }

    /// Clears all pending state after a successful registration.
    pub fn succeed(&mut self) {
        self.pending.clear();
        self.deadline = None;
        self.retries = 0;
    }

    /// Handles a failed registration attempt.
    ///
    /// Reschedules with exponential backoff (2 s, 4 s, 8 s at the default
    /// debounce) and returns `None`; once the retries are exhausted, clears
    /// the state and returns the dropped batch. The devices remain eligible
    /// for discovery the next time they transmit a status report.
    pub fn fail(&mut self, now: Instant, debounce: Duration) -> Option<Vec<DeviceCode>> {
        if self.retries >= MAX_RETRIES {
            let batch = core::mem::take(&mut self.pending);
            self.deadline = None;
            self.retries = 0;
            return Some(batch);
        }

        self.deadline = Some(now + debounce * (1_u32 << self.retries));
        self.retries += 1;
        None
    }

    /// Cancels any scheduled registration, keeping nothing.
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.deadline = None;
        self.retries = 0;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Registrar;
    use crate::device::DeviceCode;

    const DEBOUNCE: Duration = Duration::from_secs(2);

    fn device(seed: u8) -> DeviceCode {
        DeviceCode::new([0xAA, 0x11, seed])
    }

    #[test]
    fn test_observation_order_without_duplicates() {
        let mut registrar = Registrar::default();
        let now = Instant::now();
        registrar.observe(device(1), now, DEBOUNCE);
        registrar.observe(device(2), now, DEBOUNCE);
        registrar.observe(device(1), now, DEBOUNCE);
        assert_eq!(registrar.pending(), &[device(1), device(2)]);
    }

    #[test]
    fn test_every_observation_restarts_the_debounce() {
        let mut registrar = Registrar::default();
        let start = Instant::now();
        registrar.observe(device(1), start, DEBOUNCE);
        assert!(!registrar.is_due(start + Duration::from_secs(1)));
        assert!(registrar.is_due(start + DEBOUNCE));

        // A repeated observation pushes the deadline out again.
        registrar.observe(device(1), start + Duration::from_secs(1), DEBOUNCE);
        assert!(!registrar.is_due(start + DEBOUNCE));
        assert!(registrar.is_due(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_backoff_schedule() {
        let mut registrar = Registrar::default();
        let start = Instant::now();
        registrar.observe(device(1), start, DEBOUNCE);

        assert_eq!(registrar.fail(start, DEBOUNCE), None);
        assert!(registrar.is_due(start + Duration::from_secs(2)));

        assert_eq!(registrar.fail(start, DEBOUNCE), None);
        assert!(!registrar.is_due(start + Duration::from_secs(3)));
        assert!(registrar.is_due(start + Duration::from_secs(4)));

        assert_eq!(registrar.fail(start, DEBOUNCE), None);
        assert!(registrar.is_due(start + Duration::from_secs(8)));

        // The fourth failure drops the batch.
        assert_eq!(registrar.fail(start, DEBOUNCE), Some(vec![device(1)]));
        assert!(registrar.pending().is_empty());
        assert!(!registrar.is_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_observation_during_backoff_keeps_the_deadline() {
        let mut registrar = Registrar::default();
        let start = Instant::now();
        registrar.observe(device(1), start, DEBOUNCE);
        assert_eq!(registrar.fail(start, DEBOUNCE), None);

        registrar.observe(device(2), start + Duration::from_secs(1), DEBOUNCE);
        assert_eq!(registrar.pending(), &[device(1), device(2)]);
        assert!(registrar.is_due(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_success_resets_retries() {
        let mut registrar = Registrar::default();
        let start = Instant::now();
        registrar.observe(device(1), start, DEBOUNCE);
        assert_eq!(registrar.fail(start, DEBOUNCE), None);
        registrar.succeed();
        assert!(registrar.pending().is_empty());

        // The next failure starts the backoff from the beginning.
        registrar.observe(device(2), start, DEBOUNCE);
        assert_eq!(registrar.fail(start, DEBOUNCE), None);
        assert!(registrar.is_due(start + Duration::from_secs(2)));
    }
}

//! Session state and the pair list.

use core::fmt::{Display, Formatter};

use log::debug;

use crate::device::DeviceCode;

/// Lifecycle state of a transceiver session.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum State {
    /// No session is running.
    #[default]
    Closed,
    /// The serial endpoint is being taken over.
    Opening,
    /// The initialization handshake is running.
    Handshaking,
    /// Commands are being transmitted.
    Ready,
    /// A re-initialization with a new pair list is running.
    Reinitializing,
    /// The session failed; the host decides recovery.
    Failed,
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Closed => f.write_str("closed"),
            Self::Opening => f.write_str("opening"),
            Self::Handshaking => f.write_str("handshaking"),
            Self::Ready => f.write_str("ready"),
            Self::Reinitializing => f.write_str("reinitializing"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// The session: its state and the ordered list of registered devices.
///
/// The pair list never contains the broadcast address or duplicates, and
/// its order is significant: it determines the counter byte each device
/// is registered under during the handshake.
#[derive(Debug)]
pub struct Session {
    state: State,
    pairs: Vec<DeviceCode>,
}

impl Session {
    /// Creates a new session with an initial pair list.
    #[must_use]
    pub fn new(pairs: Vec<DeviceCode>) -> Self {
        Self {
            state: State::default(),
            pairs: sanitized(pairs),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Transitions to a new state.
    pub fn set_state(&mut self, state: State) {
        if self.state != state {
            debug!("Session state: {} -> {state}", self.state);
            self.state = state;
        }
    }

    /// Returns the registered devices in registration order.
    #[must_use]
    pub fn pairs(&self) -> &[DeviceCode] {
        &self.pairs
    }

    /// Determines whether a device is registered.
    #[must_use]
    pub fn knows(&self, device: DeviceCode) -> bool {
        self.pairs.contains(&device)
    }

    /// Replaces the pair list, returning the previous one.
    pub fn replace_pairs(&mut self, pairs: Vec<DeviceCode>) -> Vec<DeviceCode> {
        core::mem::replace(&mut self.pairs, sanitized(pairs))
    }
}

/// Strips the broadcast address and duplicates, preserving order.
fn sanitized(pairs: Vec<DeviceCode>) -> Vec<DeviceCode> {
    let mut sanitized = Vec::with_capacity(pairs.len());

    for device in pairs {
        if !device.is_broadcast() && !sanitized.contains(&device) {
            sanitized.push(device);
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::{Session, State};
    use crate::device::DeviceCode;

    fn device(seed: u8) -> DeviceCode {
        DeviceCode::new([0x49, 0x00, seed])
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new(Vec::new());
        assert_eq!(session.state(), State::Closed);
        assert!(session.pairs().is_empty());
    }

    #[test]
    fn test_sanitization() {
        let session = Session::new(vec![
            device(1),
            DeviceCode::BROADCAST,
            device(2),
            device(1),
        ]);
        assert_eq!(session.pairs(), &[device(1), device(2)]);
    }

    #[test]
    fn test_replace_pairs_returns_previous() {
        let mut session = Session::new(vec![device(1)]);
        let previous = session.replace_pairs(vec![device(2), device(3)]);
        assert_eq!(previous, vec![device(1)]);
        assert_eq!(session.pairs(), &[device(2), device(3)]);
        assert!(session.knows(device(2)));
        assert!(!session.knows(device(1)));
    }
}

//! Connectivity monitor: a passive subscriber that folds platform network
//! updates into a tri-state signal.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::capabilities::{ConnectivityOutput, NetworkState};

/// `Unknown` only until the first update arrives, or forever when the
/// platform has no connectivity capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivitySignal {
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl ConnectivitySignal {
    #[must_use]
    pub fn from_network_state(state: &NetworkState) -> Self {
        if state.is_online() {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    /// Text input is only switched off by a definite disconnect.
    #[must_use]
    pub const fn allows_text_input(self) -> bool {
        !matches!(self, Self::Disconnected)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "No Network Connection",
            Self::Unknown => "Unknown Network Status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subscription {
    #[default]
    Idle,
    Active,
    Unavailable,
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectivityMonitor {
    signal: ConnectivitySignal,
    subscription: Subscription,
}

impl ConnectivityMonitor {
    #[must_use]
    pub const fn signal(&self) -> ConnectivitySignal {
        self.signal
    }

    #[must_use]
    pub const fn subscription(&self) -> Subscription {
        self.subscription
    }

    /// Marks the subscription as started. Returns `false` while one is
    /// already live, so the caller subscribes at most once per start.
    /// A stopped monitor may start again.
    pub fn begin(&mut self) -> bool {
        if matches!(
            self.subscription,
            Subscription::Active | Subscription::Unavailable
        ) {
            debug!(state = ?self.subscription, "connectivity already subscribed");
            return false;
        }
        self.signal = ConnectivitySignal::Unknown;
        self.subscription = Subscription::Active;
        true
    }

    /// Folds one capability update into the signal. Returns the new signal
    /// when it changed.
    pub fn apply(&mut self, output: ConnectivityOutput) -> Option<ConnectivitySignal> {
        if self.subscription != Subscription::Active {
            debug!(state = ?self.subscription, "ignoring connectivity update");
            return None;
        }

        match output {
            ConnectivityOutput::State(state) => {
                let next = ConnectivitySignal::from_network_state(&state);
                if next == self.signal {
                    return None;
                }
                info!(from = ?self.signal, to = ?next, "connectivity changed");
                self.signal = next;
                Some(next)
            }
            ConnectivityOutput::Unavailable { reason } => {
                warn!(%reason, "connectivity capability unavailable");
                self.subscription = Subscription::Unavailable;
                let previous = std::mem::take(&mut self.signal);
                (previous != ConnectivitySignal::Unknown).then_some(ConnectivitySignal::Unknown)
            }
        }
    }

    /// Tears the subscription down and forgets the last signal. Returns
    /// `true` if the shell should be told to unsubscribe.
    pub fn end(&mut self) -> bool {
        let was_active = self.subscription == Subscription::Active;
        self.subscription = Subscription::Closed;
        self.signal = ConnectivitySignal::Unknown;
        was_active
    }
}

//! Countdown timer bookkeeping
//!
//! The periodic source lives outside the simulation (see `platform`). This
//! type decides whether a delivered tick still belongs to the running
//! countdown. Every start opens a new session; stopping closes it, so ticks
//! already in flight for an old session are discarded.

use serde::{Deserialize, Serialize};

/// Identity of one start/stop cycle of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerSession(pub u64);

/// One period of the countdown elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerTick {
    pub session: TimerSession,
}

/// Logical state of the single countdown timer
#[derive(Debug, Clone, Default)]
pub struct CountdownTimer {
    running: Option<TimerSession>,
    next_session: u64,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the timer if it is stopped.
    ///
    /// Returns the new session, or `None` if a session is already running.
    pub fn start(&mut self) -> Option<TimerSession> {
        if self.running.is_some() {
            return None;
        }
        self.next_session += 1;
        let session = TimerSession(self.next_session);
        self.running = Some(session);
        Some(session)
    }

    /// Stop the timer. Returns the session that was running, if any.
    pub fn stop(&mut self) -> Option<TimerSession> {
        self.running.take()
    }

    pub fn session(&self) -> Option<TimerSession> {
        self.running
    }

    /// Whether a tick belongs to the running session
    pub fn accepts(&self, tick: &TimerTick) -> bool {
        self.running == Some(tick.session)
    }
}

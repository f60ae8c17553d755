//! One-shot detonation state for explosive props
//!
//! A gnome detonates at most once. Chain requests arm a single randomized
//! timer; the timer fire is liveness-checked by the caller.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a gnome is set to go off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetonationMode {
    /// Explodes on the first collision after being thrown
    #[default]
    Impact,
    /// Explodes when its chain timer runs out
    Timed,
}

/// Per-gnome detonation bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetonationRecord {
    pub has_detonated: bool,
    pub mode: DetonationMode,
    pub timer_armed: bool,
}

impl DetonationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip to detonated. Returns false if this already happened.
    pub fn detonate(&mut self) -> bool {
        if self.has_detonated {
            return false;
        }
        self.has_detonated = true;
        true
    }

    /// Switch to timed mode with the timer running
    pub fn arm_timer(&mut self) {
        self.mode = DetonationMode::Timed;
        self.timer_armed = true;
    }
}

/// Chain trigger lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerState {
    #[default]
    Idle,
    Armed,
    Fired,
    Detonated,
}

/// Delayed chain-detonation trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainTrigger {
    state: TriggerState,
    /// Delay chosen when armed (ms)
    delay_ms: Option<u64>,
}

impl ChainTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn delay_ms(&self) -> Option<u64> {
        self.delay_ms
    }

    /// Arm from Idle with a delay in [1, max_delay_ms]
    ///
    /// Returns the delay to schedule, or None when already armed or done.
    pub fn request<R: Rng + ?Sized>(&mut self, rng: &mut R, max_delay_ms: u64) -> Option<u64> {
        if self.state != TriggerState::Idle {
            return None;
        }
        let delay = rng.random_range(1..=max_delay_ms.max(1));
        self.state = TriggerState::Armed;
        self.delay_ms = Some(delay);
        Some(delay)
    }

    /// Timer expiry. Returns true when the caller should detonate now.
    ///
    /// A fire for a body the host already removed does nothing.
    pub fn fire(&mut self, alive: bool) -> bool {
        if self.state != TriggerState::Armed || !alive {
            return false;
        }
        self.state = TriggerState::Fired;
        self.state = TriggerState::Detonated;
        true
    }

    /// Detonated some other way (impact)
    pub fn mark_detonated(&mut self) {
        self.state = TriggerState::Detonated;
    }
}

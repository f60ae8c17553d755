//! Weaponized gnome prop
//!
//! Grab, throw, and impact handling for a single gnome. Each instance owns
//! its own detonation record and chain trigger.

use serde::{Deserialize, Serialize};

use super::detonation::{ChainTrigger, DetonationMode, DetonationRecord};
use crate::Hand;

/// A grenade gnome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gnome {
    pub record: DetonationRecord,
    pub trigger: ChainTrigger,
    /// Hand that last grabbed the gnome
    pub hand: Option<Hand>,
    /// Released fast enough to count as thrown
    pub thrown: bool,
}

impl Gnome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_grab(&mut self, hand: Hand) {
        self.hand = Some(hand);
    }

    /// Release from the hand. Returns true if this counts as a throw.
    pub fn on_release(&mut self, speed: f32, throw_threshold: f32) -> bool {
        if self.hand.is_none() || speed < throw_threshold {
            return false;
        }
        self.thrown = true;
        true
    }

    /// Collision with anything. Returns true if the gnome should go off now.
    pub fn on_collision(&self) -> bool {
        self.thrown && self.record.mode == DetonationMode::Impact && !self.record.has_detonated
    }

    pub fn has_detonated(&self) -> bool {
        self.record.has_detonated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::THROW_SPEED_THRESHOLD;

    #[test]
    fn test_release_without_grab_is_not_throw() {
        let mut gnome = Gnome::new();
        assert!(!gnome.on_release(10.0, THROW_SPEED_THRESHOLD));
        assert!(!gnome.thrown);
    }

    #[test]
    fn test_slow_release_is_not_throw() {
        let mut gnome = Gnome::new();
        gnome.on_grab(Hand::Left);
        assert!(!gnome.on_release(1.5, THROW_SPEED_THRESHOLD));
        assert!(!gnome.on_collision());
    }

    #[test]
    fn test_thrown_gnome_detonates_on_impact() {
        let mut gnome = Gnome::new();
        gnome.on_grab(Hand::Right);
        assert!(gnome.on_release(THROW_SPEED_THRESHOLD, THROW_SPEED_THRESHOLD));
        assert!(gnome.on_collision());
    }

    #[test]
    fn test_timed_mode_ignores_impact() {
        let mut gnome = Gnome::new();
        gnome.on_grab(Hand::Right);
        gnome.on_release(5.0, THROW_SPEED_THRESHOLD);
        gnome.record.arm_timer();
        assert!(!gnome.on_collision());
    }

    #[test]
    fn test_detonated_gnome_ignores_impact() {
        let mut gnome = Gnome::new();
        gnome.on_grab(Hand::Right);
        gnome.on_release(5.0, THROW_SPEED_THRESHOLD);
        gnome.record.detonate();
        assert!(!gnome.on_collision());
        assert!(gnome.has_detonated());
    }
}

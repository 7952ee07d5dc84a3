//! Power-up and combo timers
//!
//! Three independent countdowns (Freeze-Time, Combo-Multiplier,
//! Instant-Tiles) plus the red-star combo chain. All timers are real-time
//! milliseconds advanced by the frame delta; an effect is active exactly
//! while its remaining time is above zero.

use serde::{Deserialize, Serialize};

use m4tch_types::{
    PowerUp, COMBO_CHAIN_WINDOW_MS, COMBO_MULTIPLIER_MS, FREEZE_TIME_MS, INSTANT_TILES_MS,
    MAX_RED_COMBO,
};

/// Remaining time of each power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub freeze_ms: u32,
    pub combo_ms: u32,
    pub instant_ms: u32,
}

impl PowerUpTimers {
    pub fn is_active(&self, power_up: PowerUp) -> bool {
        self.remaining_ms(power_up) > 0
    }

    pub fn remaining_ms(&self, power_up: PowerUp) -> u32 {
        match power_up {
            PowerUp::FreezeTime => self.freeze_ms,
            PowerUp::ComboMultiplier => self.combo_ms,
            PowerUp::InstantTiles => self.instant_ms,
        }
    }

    /// Freeze-Time, Combo-Multiplier and Instant-Tiles all running.
    pub fn all_active(&self) -> bool {
        self.freeze_ms > 0 && self.combo_ms > 0 && self.instant_ms > 0
    }

    /// Start the effect a star of the matching color unlocks.
    ///
    /// Freeze-Time and Combo-Multiplier restart from their full duration;
    /// Instant-Tiles stacks another 10 s on top of whatever is left.
    pub fn activate(&mut self, power_up: PowerUp) {
        match power_up {
            PowerUp::FreezeTime => self.freeze_ms = FREEZE_TIME_MS,
            PowerUp::ComboMultiplier => self.combo_ms = COMBO_MULTIPLIER_MS,
            PowerUp::InstantTiles => {
                self.instant_ms = self.instant_ms.saturating_add(INSTANT_TILES_MS);
            }
        }
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.freeze_ms = self.freeze_ms.saturating_sub(elapsed_ms);
        self.combo_ms = self.combo_ms.saturating_sub(elapsed_ms);
        self.instant_ms = self.instant_ms.saturating_sub(elapsed_ms);
    }
}

/// Combo chain: a score multiplier that escalates on consecutive red star
/// matches made while every power-up is active, and falls back to x1 when
/// its window lapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboChain {
    multiplier: u32,
    red_count: u32,
    window_ms: u32,
}

impl ComboChain {
    pub fn new() -> Self {
        Self {
            multiplier: 1,
            red_count: 0,
            window_ms: 0,
        }
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn red_count(&self) -> u32 {
        self.red_count
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Qualifying red star match: bump the counter and set the multiplier to
    /// 2^count.
    pub fn escalate(&mut self) {
        self.red_count = (self.red_count + 1).min(MAX_RED_COMBO);
        self.multiplier = 1u32 << self.red_count;
        self.window_ms = COMBO_CHAIN_WINDOW_MS;
    }

    /// Keep the current multiplier alive for another window.
    pub fn refresh_window(&mut self) {
        self.window_ms = COMBO_CHAIN_WINDOW_MS;
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.window_ms == 0 {
            return;
        }
        self.window_ms = self.window_ms.saturating_sub(elapsed_ms);
        if self.window_ms == 0 {
            self.multiplier = 1;
            self.red_count = 0;
        }
    }
}

impl Default for ComboChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_start_inactive() {
        let t = PowerUpTimers::default();
        for p in PowerUp::ALL {
            assert!(!t.is_active(p));
        }
        assert!(!t.all_active());
    }

    #[test]
    fn test_freeze_overwrites_remaining_time() {
        let mut t = PowerUpTimers::default();
        t.activate(PowerUp::FreezeTime);
        t.tick(3_000);
        assert_eq!(t.freeze_ms, 2_000);
        t.activate(PowerUp::FreezeTime);
        assert_eq!(t.freeze_ms, FREEZE_TIME_MS);
    }

    #[test]
    fn test_combo_multiplier_overwrites_remaining_time() {
        let mut t = PowerUpTimers::default();
        t.activate(PowerUp::ComboMultiplier);
        t.tick(1_000);
        t.activate(PowerUp::ComboMultiplier);
        assert_eq!(t.combo_ms, COMBO_MULTIPLIER_MS);
    }

    #[test]
    fn test_instant_tiles_extends_when_active() {
        let mut t = PowerUpTimers::default();
        t.activate(PowerUp::InstantTiles);
        assert_eq!(t.instant_ms, 10_000);
        t.tick(4_000);
        t.activate(PowerUp::InstantTiles);
        assert_eq!(t.instant_ms, 16_000);
    }

    #[test]
    fn test_timers_expire() {
        let mut t = PowerUpTimers::default();
        for p in PowerUp::ALL {
            t.activate(p);
        }
        assert!(t.all_active());
        t.tick(FREEZE_TIME_MS);
        assert!(!t.is_active(PowerUp::FreezeTime));
        assert!(t.is_active(PowerUp::ComboMultiplier));
        assert!(!t.all_active());
    }

    #[test]
    fn test_combo_chain_escalates_by_powers_of_two() {
        let mut c = ComboChain::new();
        assert_eq!(c.multiplier(), 1);
        c.escalate();
        assert_eq!((c.red_count(), c.multiplier()), (1, 2));
        c.escalate();
        assert_eq!((c.red_count(), c.multiplier()), (2, 4));
        c.escalate();
        assert_eq!((c.red_count(), c.multiplier()), (3, 8));
    }

    #[test]
    fn test_combo_chain_resets_when_window_lapses() {
        let mut c = ComboChain::new();
        c.escalate();
        c.tick(COMBO_CHAIN_WINDOW_MS - 1);
        assert_eq!(c.multiplier(), 2);
        c.tick(1);
        assert_eq!(c.multiplier(), 1);
        assert_eq!(c.red_count(), 0);
    }

    #[test]
    fn test_combo_chain_refresh_extends_window() {
        let mut c = ComboChain::new();
        c.escalate();
        c.tick(400);
        c.refresh_window();
        c.tick(400);
        assert_eq!(c.multiplier(), 2);
    }

    #[test]
    fn test_combo_chain_caps_counter() {
        let mut c = ComboChain::new();
        for _ in 0..100 {
            c.escalate();
        }
        assert_eq!(c.red_count(), MAX_RED_COMBO);
        assert_eq!(c.multiplier(), 1 << MAX_RED_COMBO);
    }
}

//! Scoring module - points per resolved match
//!
//! The table is keyed by the tier of the matched pair and the power-up state
//! at resolution time. Precedence, highest first:
//! 1. red star that escalated the combo chain
//! 2. all three power-ups active
//! 3. Combo-Multiplier active
//! 4. base
//!
//! The engine multiplies the table value by the current combo chain
//! multiplier.

use crate::power_ups::PowerUpTimers;
use m4tch_types::{PowerUp, Tier, TileColor};

/// Power-up state relevant to scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreContext {
    pub all_power_ups: bool,
    pub combo_multiplier: bool,
    /// This match escalated the red combo chain.
    pub red_chain: bool,
}

impl ScoreContext {
    pub fn from_timers(timers: &PowerUpTimers, red_chain: bool) -> Self {
        Self {
            all_power_ups: timers.all_active(),
            combo_multiplier: timers.is_active(PowerUp::ComboMultiplier),
            red_chain,
        }
    }
}

/// Table value for matching two tiles of `tier` and `color`.
pub fn score_for(tier: Tier, color: TileColor, ctx: ScoreContext) -> u32 {
    match tier {
        Tier::One => {
            if ctx.all_power_ups {
                290
            } else if ctx.combo_multiplier {
                100
            } else {
                50
            }
        }
        Tier::Two => {
            if ctx.all_power_ups {
                610
            } else if ctx.combo_multiplier {
                300
            } else {
                150
            }
        }
        Tier::Star => {
            if color == TileColor::Red && ctx.all_power_ups && ctx.red_chain {
                5000
            } else if ctx.all_power_ups {
                2500
            } else if ctx.combo_multiplier {
                1000
            } else {
                500
            }
        }
    }
}

/// Score delta after the combo multiplier (saturating)
pub fn apply_multiplier(points: u32, multiplier: u32) -> u32 {
    points.saturating_mul(multiplier.max(1))
}

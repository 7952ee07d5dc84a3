use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::power_ups::{ComboChain, PowerUpTimers};
use crate::tile::Tile;
use m4tch_types::{Coord, MatchEvent};

/// Value copy of one play session.
///
/// Shares nothing with the live engine: pausing hosts take one, stop ticking
/// and hand it back to [`GameState::restore`](crate::GameState::restore) on
/// resume. Renderers draw from it directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub score: u32,
    pub time_remaining_ms: u32,
    pub session_length_ms: u32,
    /// Elapsed session clock; tile appear times are measured against it.
    pub session_ms: u32,
    pub power_ups: PowerUpTimers,
    pub combo: ComboChain,
    pub session_over: bool,
    pub last_event: Option<MatchEvent>,
    pub session_id: u32,
    /// Selected cells in selection order. Presentation only; not restored.
    pub selected: [Option<Coord>; 2],
    /// Mismatch feedback is running. Presentation only; not restored.
    pub input_blocked: bool,
}

impl GameSnapshot {
    pub fn tile(&self, col: i32, row: i32) -> Option<&Tile> {
        self.grid.get_at(col, row)
    }

    pub fn is_selected(&self, coord: Coord) -> bool {
        self.selected.contains(&Some(coord))
    }

    pub fn playable(&self) -> bool {
        !self.session_over && !self.input_blocked
    }

    /// Whole seconds left, rounded up so "0" only shows once time is out.
    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_ms.div_ceil(1000)
    }
}

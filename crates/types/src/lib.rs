//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (rules engine, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The playfield is a square 4x4 grid:
//!
//! - **Columns**: indexed 0-3, left to right
//! - **Rows**: indexed 0-3, top to bottom (row 3 is the bottom row)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SESSION_MS` | 60000 | Default time budget of one session |
//! | `MISMATCH_COOLDOWN_MS` | 500 | Input block after a mismatched pair |
//! | `COMBO_CHAIN_WINDOW_MS` | 500 | Lifetime of the combo chain multiplier |
//! | `FREEZE_TIME_MS` | 5000 | Freeze-Time duration (blue star) |
//! | `COMBO_MULTIPLIER_MS` | 7000 | Combo-Multiplier duration (red star) |
//! | `INSTANT_TILES_MS` | 10000 | Instant-Tiles duration/extension (green star) |
//!
//! # Examples
//!
//! ```
//! use m4tch_types::{Coord, PowerUp, TileColor, Tier, GRID_SIZE};
//!
//! // Each color's star unlocks one power-up
//! assert_eq!(TileColor::Blue.power_up(), PowerUp::FreezeTime);
//!
//! // Tiers upgrade one rank at a time
//! assert_eq!(Tier::One.upgraded(), Some(Tier::Two));
//! assert_eq!(Tier::Two.upgraded(), Some(Tier::Star));
//! assert_eq!(Tier::Star.upgraded(), None);
//!
//! // Coordinates are bounds-checked
//! assert!(Coord::checked(3, 3).is_some());
//! assert!(Coord::checked(4, 0).is_none());
//!
//! assert_eq!(GRID_SIZE, 4);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width and height in cells (4x4)
pub const GRID_SIZE: u8 = 4;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default session length (60 seconds)
pub const SESSION_MS: u32 = 60_000;

/// Input block after a mismatch, during which both tiles vibrate
pub const MISMATCH_COOLDOWN_MS: u32 = 500;

/// Combo chain window; the chain multiplier resets when it lapses
pub const COMBO_CHAIN_WINDOW_MS: u32 = 500;

/// Freeze-Time duration granted by a blue star match (overwrites)
pub const FREEZE_TIME_MS: u32 = 5_000;

/// Combo-Multiplier duration granted by a red star match (overwrites)
pub const COMBO_MULTIPLIER_MS: u32 = 7_000;

/// Instant-Tiles duration granted by a green star match (extends when active)
pub const INSTANT_TILES_MS: u32 = 10_000;

/// While Freeze-Time is active the session clock drains at 1/4 speed
pub const FREEZE_DRAIN_DIVISOR: u32 = 4;

/// Scale gained per update tick by a growing tile at normal speed
pub const TILE_GROWTH_STEP: f32 = 0.05;

/// Growth speed of the refill tile spawned into the first-selected slot
pub const REFILL_SPEED: f32 = 0.2;

/// Initial board cascade: delay added per row
pub const APPEAR_ROW_STAGGER_MS: u32 = 150;

/// Initial board cascade: delay added per column. A whole row ripples in
/// before the next row starts.
pub const APPEAR_COL_STAGGER_MS: u32 = 30;

const _: () = assert!((GRID_SIZE as u32 - 1) * APPEAR_COL_STAGGER_MS < APPEAR_ROW_STAGGER_MS);

/// Cap on the red combo counter (multiplier tops out at 2^16)
pub const MAX_RED_COMBO: u32 = 16;

/// Upper bound accepted for a configured session length
pub const MAX_SESSION_MS: u32 = 3_600_000;


/// Tile color
///
/// A color is fixed when a tile is created. Each color is tied to the
/// power-up its star tiles unlock:
/// - **Red**: Combo-Multiplier
/// - **Blue**: Freeze-Time
/// - **Green**: Instant-Tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    Red,
    Blue,
    Green,
}

impl TileColor {
    /// All colors, in the order the random source indexes them.
    pub const ALL: [TileColor; 3] = [TileColor::Red, TileColor::Blue, TileColor::Green];

    /// Lowercase name, used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Blue => "blue",
            TileColor::Green => "green",
        }
    }

    /// The power-up a star match of this color activates.
    pub fn power_up(&self) -> PowerUp {
        match self {
            TileColor::Red => PowerUp::ComboMultiplier,
            TileColor::Blue => PowerUp::FreezeTime,
            TileColor::Green => PowerUp::InstantTiles,
        }
    }
}

/// Tile rank
///
/// Two matching tiles of the same tier and color combine into the next tier.
/// A tier-3 tile is a **star** regardless of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    One,
    Two,
    Star,
}

impl Tier {
    /// The tier produced by combining two tiles of this tier.
    ///
    /// Stars never combine; matching them triggers a power-up instead.
    pub fn upgraded(&self) -> Option<Self> {
        match self {
            Tier::One => Some(Tier::Two),
            Tier::Two => Some(Tier::Star),
            Tier::Star => None,
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self, Tier::Star)
    }
}

/// Grid coordinates of a cell
///
/// Construction through [`Coord::checked`] guarantees `col` and `row` are
/// both below [`GRID_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub col: u8,
    pub row: u8,
}

impl Coord {
    /// Bounds-checked constructor. Accepts signed values so callers can pass
    /// raw offsets without pre-validating them.
    pub fn checked(col: i32, row: i32) -> Option<Self> {
        let size = GRID_SIZE as i32;
        if col < 0 || col >= size || row < 0 || row >= size {
            return None;
        }
        Some(Self {
            col: col as u8,
            row: row as u8,
        })
    }

    /// Flat row-major index (row * GRID_SIZE + col)
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.row as usize) * (GRID_SIZE as usize) + (self.col as usize)
    }

    /// Inverse of [`Coord::index`].
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < GRID_CELLS, "cell index {index} out of range");
        Self {
            col: (index % GRID_SIZE as usize) as u8,
            row: (index / GRID_SIZE as usize) as u8,
        }
    }
}

/// Timed global effects unlocked by star matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    /// Session clock drains at a quarter of the normal rate
    FreezeTime,
    /// Raised score table; enables the red combo chain
    ComboMultiplier,
    /// Growing tiles are selectable before they are fully visible
    InstantTiles,
}

impl PowerUp {
    pub const ALL: [PowerUp; 3] = [
        PowerUp::FreezeTime,
        PowerUp::ComboMultiplier,
        PowerUp::InstantTiles,
    ];

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            PowerUp::FreezeTime => "FREEZE",
            PowerUp::ComboMultiplier => "COMBO",
            PowerUp::InstantTiles => "INSTANT",
        }
    }
}

/// Player actions produced by the input layer
///
/// Pointer clicks bypass this enum and go straight to the engine as grid
/// coordinates; these are the keyboard-driven equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the selection cursor one cell up
    CursorUp,
    /// Move the selection cursor one cell down
    CursorDown,
    /// Move the selection cursor one cell left
    CursorLeft,
    /// Move the selection cursor one cell right
    CursorRight,
    /// Select the tile under the cursor
    Select,
    /// Toggle pause (snapshot on pause, restore on resume)
    Pause,
    /// Start a fresh session
    Restart,
}

/// Outcome of resolving a selected pair.
///
/// Emitted by the engine after every resolution so hosts can play feedback
/// (sounds, flashes) without inspecting the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Two tier-1/tier-2 tiles merged; `into` holds the upgraded tile.
    Combined {
        from: Coord,
        into: Coord,
        tier: Tier,
        color: TileColor,
        points: u32,
    },
    /// Two stars matched and activated a power-up.
    StarMatched {
        color: TileColor,
        power_up: PowerUp,
        chained: bool,
        points: u32,
    },
    /// Tier or color differed; both tiles vibrate.
    Mismatch { first: Coord, second: Coord },
}

impl MatchEvent {
    /// Points awarded by this resolution (0 for a mismatch).
    pub fn points(&self) -> u32 {
        match self {
            MatchEvent::Combined { points, .. } | MatchEvent::StarMatched { points, .. } => *points,
            MatchEvent::Mismatch { .. } => 0,
        }
    }
}

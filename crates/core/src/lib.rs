//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the M4TCH rules engine: tile state, the 4x4 grid,
//! selection and pair resolution, power-ups, the combo chain and scoring.
//! It has **zero dependencies** on terminal, rendering, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or scripted colors) produces identical sessions
//! - **Testable**: Comprehensive unit tests for every rule
//! - **Portable**: Can run under any host (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`tile`]: Single cell state with growth animation and vibration flag
//! - [`grid`]: 4x4 board, spawning, replacement and pointer hit-testing
//! - [`game_state`]: Match engine: selection, combination, stars, mismatch, session clock
//! - [`power_ups`]: Freeze-Time, Combo-Multiplier, Instant-Tiles timers and the combo chain
//! - [`scoring`]: Score table keyed by tier and power-up state
//! - [`rng`]: Seeded and scripted tile color sources
//! - [`snapshot`]: Value copy of a session for pause/resume and rendering
//!
//! # Game Rules
//!
//! - **Combination**: Two tiles of the same tier and color merge; the second
//!   selected becomes the next tier, the first refills slowly with a random tier-1 tile
//! - **Stars**: Matching two tier-3 tiles starts a power-up (red: Combo-Multiplier,
//!   blue: Freeze-Time, green: Instant-Tiles) and resets both cells to tier 1
//! - **Combo Chain**: Red star matches while all three power-ups run double the
//!   score multiplier each time; it falls back to x1 after 500ms
//! - **Mismatch**: Both tiles vibrate and input is blocked for 500ms, no penalty
//!
//! # Example
//!
//! ```
//! use m4tch_core::GameState;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! // Tiles cascade in; nothing is selectable on the first frame.
//! assert!(!game.submit_selection(0, 0));
//!
//! for _ in 0..30 {
//!     game.tick(16);
//! }
//! assert!(game.submit_selection(0, 0));
//! assert_eq!(game.time_remaining_ms(), 60_000 - 30 * 16);
//! ```
//!
//! # Timing
//!
//! The host calls [`GameState::tick`](game_state::GameState::tick) every frame
//! with the elapsed milliseconds (16ms fixed timestep by default). All
//! countdowns are real-time; there are no blocking waits.

pub mod game_state;
pub mod grid;
pub mod power_ups;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tile;

pub use m4tch_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, SelectionInput};
pub use grid::Grid;
pub use power_ups::{ComboChain, PowerUpTimers};
pub use rng::{ColorRng, ColorSource, ScriptedColors, SimpleRng};
pub use scoring::{apply_multiplier, score_for, ScoreContext};
pub use snapshot::GameSnapshot;
pub use tile::{Tile, TilePhase};

//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for playing M4TCH in a terminal.
//! It avoids widget/layout libraries and instead renders a session snapshot
//! into a simple framebuffer that is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and free of rendering concerns
//! - Render purely from [`core::GameSnapshot`] values
//! - Map mouse clicks back into grid space for pointer selection

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use m4tch_core as core;
pub use m4tch_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HudState, Viewport};
pub use renderer::{dirty_span, encode_frame, TerminalRenderer};

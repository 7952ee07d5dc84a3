//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`]s
//! and terminal click positions, and tracks the keyboard selection cursor.
//! Independent of any UI framework.

pub mod cursor;
pub mod map;

pub use m4tch_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, mouse_click, should_quit};

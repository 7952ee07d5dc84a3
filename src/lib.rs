//! M4TCH (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof (`m4tch::{core, input, term,
//! types}`) and hosts the terminal runner's configuration, app state and
//! session ranking.

pub mod app;
pub mod config;
pub mod leaderboard;

pub use m4tch_core as core;
pub use m4tch_input as input;
pub use m4tch_term as term;
pub use m4tch_types as types;

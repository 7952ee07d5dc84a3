//! Host-side game state: the engine plus cursor, pause handling and the
//! ranking of finished sessions.
//!
//! Pausing snapshots the session and tears it down; resuming restores the
//! snapshot and starts ticking again. Selection and mismatch feedback do not
//! survive a pause. A session is ranked once, when its time runs out.

use log::{debug, info};

use crate::config::AppConfig;
use crate::core::{ColorRng, GameSnapshot, GameState, SelectionInput};
use crate::input::Cursor;
use crate::leaderboard::{Leaderboard, RankedScore};
use crate::term::HudState;
use crate::types::{Coord, GameAction};

pub struct App {
    game: GameState<ColorRng>,
    cursor: Cursor,
    /// Session saved when paused; `Some` while paused.
    paused: Option<GameSnapshot>,
    leaderboard: Leaderboard,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let mut game = GameState::with_colors(ColorRng::new(config.seed), config.session_ms);
        game.start();
        info!("seed {}, session {} ms", config.seed, config.session_ms);
        Self {
            game,
            cursor: Cursor::new(),
            paused: None,
            leaderboard: Leaderboard::new(),
        }
    }

    pub fn game(&self) -> &GameState<ColorRng> {
        &self.game
    }

    pub fn cursor(&self) -> Coord {
        self.cursor.coord()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn hud(&self) -> HudState {
        let over = self.game.is_session_over();
        HudState {
            cursor: (!over).then(|| self.cursor.coord()),
            paused: self.is_paused(),
            best_score: self.leaderboard.best(),
            rank: if over {
                self.leaderboard.rank_of(self.game.session_id())
            } else {
                None
            },
        }
    }

    /// Apply a keyboard action. Returns true if it changed anything.
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::CursorUp
            | GameAction::CursorDown
            | GameAction::CursorLeft
            | GameAction::CursorRight => !self.is_paused() && self.cursor.apply(action),
            GameAction::Select => {
                if self.is_paused() {
                    return false;
                }
                let Coord { col, row } = self.cursor.coord();
                self.game.queue_selection(SelectionInput::Cell {
                    col: col as i32,
                    row: row as i32,
                })
            }
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.paused = None;
                self.game.restart();
                true
            }
        }
    }

    /// Queue a pointer selection at grid-space `(x, y)`; the cursor follows
    /// the click.
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        if self.is_paused() || !self.game.queue_selection(SelectionInput::Pointer { x, y }) {
            return false;
        }
        if let Some(coord) = Coord::checked(x.floor() as i32, y.floor() as i32) {
            self.cursor.move_to(coord);
        }
        true
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.is_paused() {
            return;
        }
        let was_over = self.game.is_session_over();
        self.game.tick(elapsed_ms);
        if !was_over && self.game.is_session_over() {
            let entry = RankedScore {
                score: self.game.score(),
                session_id: self.game.session_id(),
            };
            match self.leaderboard.record(entry) {
                Some(rank) => info!("time up, score {} ranked #{}", entry.score, rank + 1),
                None => info!("time up, score {} unranked", entry.score),
            }
        }
    }

    /// Returns false when there is nothing to pause (time is up).
    fn toggle_pause(&mut self) -> bool {
        match self.paused.take() {
            Some(saved) => {
                self.game.restore(&saved);
                self.game.start();
                debug!("resumed");
            }
            None => {
                if self.game.is_session_over() {
                    return false;
                }
                self.paused = Some(self.game.snapshot());
                self.game.teardown();
                debug!("paused");
            }
        }
        true
    }
}

//! Game state module - the match engine
//!
//! Owns the grid, the selection, the power-up and combo timers, the score and
//! the session clock. It handles selection, pair resolution (combination,
//! star power-ups, mismatch feedback) and the session lifecycle.
//!
//! Selection flow:
//!
//! ```text
//! Idle --select--> OneSelected --select--> match?    --> Idle
//!                                          mismatch  --> Resolving (500ms) --> Idle
//! ```
//!
//! While resolving, selections are dropped rather than queued.

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::grid::Grid;
use crate::power_ups::{ComboChain, PowerUpTimers};
use crate::rng::{ColorRng, ColorSource};
use crate::scoring::{apply_multiplier, score_for, ScoreContext};
use crate::snapshot::GameSnapshot;
use crate::tile::Tile;
use m4tch_types::{
    Coord, MatchEvent, PowerUp, Tier, TileColor, FREEZE_DRAIN_DIVISOR, MISMATCH_COOLDOWN_MS,
    REFILL_SPEED, SESSION_MS,
};

/// A selection waiting for the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionInput {
    /// Grid cell coordinates (keyboard cursor)
    Cell { col: i32, row: i32 },
    /// Grid-space point (mouse/touch), hit-tested in scan order
    Pointer { x: f32, y: f32 },
}

/// Complete match engine state
#[derive(Debug, Clone)]
pub struct GameState<C: ColorSource = ColorRng> {
    grid: Grid,
    colors: C,
    selection: ArrayVec<Coord, 2>,
    /// At most one input per frame; applied by the next `tick`.
    pending: Option<SelectionInput>,
    input_block_ms: u32,
    power_ups: PowerUpTimers,
    combo: ComboChain,
    score: u32,
    session_length_ms: u32,
    time_remaining_ms: u32,
    session_ms: u32,
    /// Sub-divisor remainder of the frozen drain.
    freeze_carry_ms: u32,
    /// Monotonic session id (increments on restart).
    session_id: u32,
    last_event: Option<MatchEvent>,
    session_over: bool,
    started: bool,
}

impl GameState<ColorRng> {
    /// Create a 60-second session with seeded random colors
    pub fn new(seed: u32) -> Self {
        Self::with_colors(ColorRng::new(seed), SESSION_MS)
    }
}

impl Default for GameState<ColorRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<C: ColorSource> GameState<C> {
    /// Create a session drawing tile colors from `colors`.
    pub fn with_colors(mut colors: C, session_length_ms: u32) -> Self {
        let grid = Grid::initialize(&mut colors);
        Self::with_grid(grid, colors, session_length_ms)
    }

    /// Create a session on a prepared board. `colors` supplies every tile
    /// spawned from here on.
    pub fn with_grid(grid: Grid, colors: C, session_length_ms: u32) -> Self {
        debug_assert!(session_length_ms > 0, "session length must be positive");
        let session_length_ms = session_length_ms.max(1);
        Self {
            grid,
            colors,
            selection: ArrayVec::new(),
            pending: None,
            input_block_ms: 0,
            power_ups: PowerUpTimers::default(),
            combo: ComboChain::new(),
            score: 0,
            session_length_ms,
            time_remaining_ms: session_length_ms,
            session_ms: 0,
            freeze_carry_ms: 0,
            session_id: 0,
            last_event: None,
            session_over: false,
            started: false,
        }
    }

    /// Begin ticking the session
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            "session {} started ({} ms)",
            self.session_id, self.session_length_ms
        );
    }

    /// Stop the session. Ticks and selections become no-ops until `start`
    /// or `restart`.
    pub fn teardown(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        self.pending = None;
        self.clear_selection();
        info!("session {} torn down, score {}", self.session_id, self.score);
    }

    /// Fresh board, score and timers; the color stream continues.
    pub fn restart(&mut self) {
        self.grid = Grid::initialize(&mut self.colors);
        self.selection.clear();
        self.pending = None;
        self.input_block_ms = 0;
        self.power_ups = PowerUpTimers::default();
        self.combo = ComboChain::new();
        self.score = 0;
        self.time_remaining_ms = self.session_length_ms;
        self.session_ms = 0;
        self.freeze_carry_ms = 0;
        self.session_id = self.session_id.wrapping_add(1);
        self.last_event = None;
        self.session_over = false;
        self.started = false;
        self.start();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_session_over(&self) -> bool {
        self.session_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining_ms(&self) -> u32 {
        self.time_remaining_ms
    }

    pub fn session_length_ms(&self) -> u32 {
        self.session_length_ms
    }

    pub fn session_ms(&self) -> u32 {
        self.session_ms
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tile at `(col, row)`; `None` if out of bounds
    pub fn tile(&self, col: i32, row: i32) -> Option<&Tile> {
        self.grid.get_at(col, row)
    }

    pub fn power_ups(&self) -> &PowerUpTimers {
        &self.power_ups
    }

    pub fn is_power_up_active(&self, power_up: PowerUp) -> bool {
        self.power_ups.is_active(power_up)
    }

    pub fn combo(&self) -> &ComboChain {
        &self.combo
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo.multiplier()
    }

    /// Selected cells in selection order
    pub fn selected(&self) -> &[Coord] {
        &self.selection
    }

    pub fn is_input_blocked(&self) -> bool {
        self.input_block_ms > 0
    }

    pub fn input_block_ms(&self) -> u32 {
        self.input_block_ms
    }

    pub fn pending_selection(&self) -> Option<SelectionInput> {
        self.pending
    }

    pub fn last_event(&self) -> Option<MatchEvent> {
        self.last_event
    }

    /// Consume the last resolution event
    pub fn take_last_event(&mut self) -> Option<MatchEvent> {
        self.last_event.take()
    }

    pub fn colors(&self) -> &C {
        &self.colors
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = self.grid;
        out.score = self.score;
        out.time_remaining_ms = self.time_remaining_ms;
        out.session_length_ms = self.session_length_ms;
        out.session_ms = self.session_ms;
        out.power_ups = self.power_ups;
        out.combo = self.combo;
        out.session_over = self.session_over;
        out.last_event = self.last_event;
        out.session_id = self.session_id;
        out.selected = [self.selection.first().copied(), self.selection.get(1).copied()];
        out.input_blocked = self.is_input_blocked();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid,
            score: self.score,
            time_remaining_ms: self.time_remaining_ms,
            session_length_ms: self.session_length_ms,
            session_ms: self.session_ms,
            power_ups: self.power_ups,
            combo: self.combo,
            session_over: self.session_over,
            last_event: self.last_event,
            session_id: self.session_id,
            selected: [self.selection.first().copied(), self.selection.get(1).copied()],
            input_blocked: self.is_input_blocked(),
        }
    }

    /// Roll the session back to `snapshot`.
    ///
    /// Selection, queued input and mismatch feedback are cleared; everything
    /// else (board, score, clocks, power-ups, combo chain) is copied back.
    pub fn restore(&mut self, snapshot: &GameSnapshot) {
        self.grid = snapshot.grid;
        for coord in Grid::scan_order() {
            self.grid.get_mut(coord).mark_vibrating(false);
        }
        self.score = snapshot.score;
        self.session_length_ms = snapshot.session_length_ms.max(1);
        self.time_remaining_ms = snapshot.time_remaining_ms;
        self.session_ms = snapshot.session_ms;
        self.power_ups = snapshot.power_ups;
        self.combo = snapshot.combo;
        self.session_over = snapshot.session_over;
        self.last_event = snapshot.last_event;
        self.session_id = snapshot.session_id;
        self.selection.clear();
        self.pending = None;
        self.input_block_ms = 0;
        self.freeze_carry_ms = 0;
        debug!(
            "session {} restored: score {}, {} ms left",
            self.session_id, self.score, self.time_remaining_ms
        );
    }

    /// Advance the session by `elapsed_ms`.
    ///
    /// Order: power-up and combo timers, session clock (drain reduced while
    /// Freeze-Time is still running), mismatch cooldown, tile growth, then
    /// the queued selection.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.started || self.session_over {
            return;
        }

        self.combo.tick(elapsed_ms);
        self.power_ups.tick(elapsed_ms);

        let drain = self.drain_for(elapsed_ms);
        self.time_remaining_ms = self.time_remaining_ms.saturating_sub(drain);
        self.session_ms = self.session_ms.saturating_add(elapsed_ms);

        if self.time_remaining_ms == 0 {
            self.session_over = true;
            self.pending = None;
            self.clear_selection();
            self.input_block_ms = 0;
            info!(
                "session {} over, final score {}",
                self.session_id, self.score
            );
            return;
        }

        if self.input_block_ms > 0 {
            self.input_block_ms = self.input_block_ms.saturating_sub(elapsed_ms);
            if self.input_block_ms == 0 {
                self.clear_selection();
            }
        }

        self.grid.advance_all(self.session_ms);

        match self.pending.take() {
            Some(SelectionInput::Cell { col, row }) => {
                self.submit_selection(col, row);
            }
            Some(SelectionInput::Pointer { x, y }) => {
                self.submit_pointer(x, y);
            }
            None => {}
        }
    }

    /// Hold one selection for the next tick.
    ///
    /// Returns false when the input is dropped: another input is already
    /// queued this frame, mismatch feedback is running, or the session is not
    /// live.
    pub fn queue_selection(&mut self, input: SelectionInput) -> bool {
        if !self.accepts_input() || self.pending.is_some() {
            trace!("dropped queued selection {:?}", input);
            return false;
        }
        self.pending = Some(input);
        true
    }

    /// Select the tile at `(col, row)`. Resolves the pair when this is the
    /// second selection.
    ///
    /// Returns true if the tile was selected. Out-of-range cells, the already
    /// selected tile and tiles still growing (without Instant-Tiles) are
    /// ignored.
    pub fn submit_selection(&mut self, col: i32, row: i32) -> bool {
        if !self.accepts_input() {
            trace!("selection ({col}, {row}) ignored: input not accepted");
            return false;
        }
        let Some(coord) = Coord::checked(col, row) else {
            trace!("selection ({col}, {row}) ignored: out of range");
            return false;
        };
        if self.selection.contains(&coord) {
            trace!("selection ({col}, {row}) ignored: already selected");
            return false;
        }
        if !self.is_selectable(self.grid.get(coord)) {
            trace!("selection ({col}, {row}) ignored: tile not visible");
            return false;
        }
        self.select(coord);
        true
    }

    /// Select the first eligible tile in scan order whose bounds contain the
    /// grid-space point `(x, y)`.
    pub fn submit_pointer(&mut self, x: f32, y: f32) -> bool {
        if !self.accepts_input() {
            trace!("pointer ({x}, {y}) ignored: input not accepted");
            return false;
        }
        let instant = self.power_ups.is_active(PowerUp::InstantTiles);
        let hit = self
            .grid
            .pointer_hit(x, y, |t| t.is_fully_visible() || instant);
        match hit {
            Some(coord) => self.submit_selection(coord.col as i32, coord.row as i32),
            None => {
                trace!("pointer ({x}, {y}) hit no eligible tile");
                false
            }
        }
    }

    fn accepts_input(&self) -> bool {
        self.started && !self.session_over && self.input_block_ms == 0
    }

    fn is_selectable(&self, tile: &Tile) -> bool {
        tile.is_fully_visible() || self.power_ups.is_active(PowerUp::InstantTiles)
    }

    fn select(&mut self, coord: Coord) {
        debug_assert!(!self.selection.is_full(), "selection holds at most two tiles");
        self.selection.push(coord);
        if self.selection.len() == 2 {
            self.resolve_pair();
        }
    }

    fn resolve_pair(&mut self) {
        let (first, second) = (self.selection[0], self.selection[1]);
        let a = *self.grid.get(first);
        let b = *self.grid.get(second);

        if !a.matches(&b) {
            self.grid.get_mut(first).mark_vibrating(true);
            self.grid.get_mut(second).mark_vibrating(true);
            self.input_block_ms = MISMATCH_COOLDOWN_MS;
            self.last_event = Some(MatchEvent::Mismatch { first, second });
            debug!(
                "mismatch at ({}, {}) and ({}, {})",
                first.col, first.row, second.col, second.row
            );
            return;
        }

        let event = if a.is_star() {
            self.resolve_stars(first, second, a.color())
        } else {
            self.combine(first, second, a.tier(), a.color())
        };
        self.selection.clear();
        self.score = self.score.saturating_add(event.points());
        self.last_event = Some(event);
    }

    /// Two stars: start the color's power-up and replace both with tier-1
    /// tiles.
    fn resolve_stars(&mut self, first: Coord, second: Coord, color: TileColor) -> MatchEvent {
        let power_up = color.power_up();
        let all_active_before = self.power_ups.all_active();
        self.power_ups.activate(power_up);

        let chained = color == TileColor::Red && all_active_before;
        if chained {
            self.combo.escalate();
        }

        let ctx = ScoreContext::from_timers(&self.power_ups, chained);
        let points = apply_multiplier(score_for(Tier::Star, color, ctx), self.combo.multiplier());

        for coord in [first, second] {
            let fresh = self.colors.next_color();
            self.grid.replace(coord, Tier::One, fresh, self.session_ms);
        }

        debug!(
            "{} stars matched: {:?} for {} ms, chain x{}, +{}",
            color.as_str(),
            power_up,
            self.power_ups.remaining_ms(power_up),
            self.combo.multiplier(),
            points
        );
        MatchEvent::StarMatched {
            color,
            power_up,
            chained,
            points,
        }
    }

    /// Tier-1/tier-2 pair: the second cell upgrades, the first refills
    /// slowly with a random tier-1 tile.
    fn combine(&mut self, first: Coord, second: Coord, tier: Tier, color: TileColor) -> MatchEvent {
        let ctx = ScoreContext::from_timers(&self.power_ups, false);
        let points = apply_multiplier(score_for(tier, color, ctx), self.combo.multiplier());

        let upgraded = tier.upgraded().unwrap_or(Tier::Star);
        debug_assert!(!tier.is_star(), "stars resolve through resolve_stars");
        self.grid.replace(second, upgraded, color, self.session_ms);

        let refill = Tile::new(Tier::One, self.colors.next_color(), first, self.session_ms)
            .with_speed(REFILL_SPEED);
        self.grid.replace_tile(refill);

        if !(color == TileColor::Red && self.power_ups.all_active()) {
            self.combo.refresh_window();
        }

        debug!(
            "combined {} {:?} into {:?} at ({}, {}), +{}",
            color.as_str(),
            tier,
            upgraded,
            second.col,
            second.row,
            points
        );
        MatchEvent::Combined {
            from: first,
            into: second,
            tier: upgraded,
            color,
            points,
        }
    }

    /// Session-clock drain for one frame. Frozen frames drain a quarter of
    /// the delta, carrying the remainder into the next frame.
    fn drain_for(&mut self, elapsed_ms: u32) -> u32 {
        if !self.power_ups.is_active(PowerUp::FreezeTime) {
            self.freeze_carry_ms = 0;
            return elapsed_ms;
        }
        let total = self.freeze_carry_ms.saturating_add(elapsed_ms);
        self.freeze_carry_ms = total % FREEZE_DRAIN_DIVISOR;
        total / FREEZE_DRAIN_DIVISOR
    }

    fn clear_selection(&mut self) {
        for coord in self.selection.drain(..) {
            self.grid.get_mut(coord).mark_vibrating(false);
        }
    }
}

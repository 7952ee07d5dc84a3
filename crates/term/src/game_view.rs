//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write;

use arrayvec::ArrayString;

use crate::core::{GameSnapshot, Tile};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Coord, MatchEvent, PowerUp, Tier, TileColor, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Host-side state drawn on top of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudState {
    /// Keyboard cursor cell, if the cursor is shown.
    pub cursor: Option<Coord>,
    pub paused: bool,
    /// Best finished-session score so far.
    pub best_score: Option<u32>,
    /// 0-based leaderboard position of the session that just ended.
    pub rank: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board frame placement inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const SELECTED_BG: Rgb = Rgb::new(90, 90, 120);

/// A lightweight terminal renderer for the M4TCH grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 6x3 leaves a one-column gutter on each side and a blank row below
        // every tile.
        Self {
            cell_w: 6,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(3),
            cell_h: cell_h.max(2),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (GRID_SIZE as u16) * self.cell_w + 2;
        let h = (GRID_SIZE as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    /// Convert a terminal cell position into grid space.
    ///
    /// The result addresses the center of the terminal cell, so cell `(c, r)`
    /// of the grid spans `[c, c + 1] x [r, r + 1]`. Returns `None` outside the
    /// board area.
    pub fn pointer_to_grid(&self, viewport: Viewport, column: u16, row: u16) -> Option<(f32, f32)> {
        let frame = self.frame(viewport);
        let (ox, oy) = (frame.x + 1, frame.y + 1);
        let board_w = (GRID_SIZE as u16) * self.cell_w;
        let board_h = (GRID_SIZE as u16) * self.cell_h;
        if column < ox || row < oy || column >= ox + board_w || row >= oy + board_h {
            return None;
        }
        let x = ((column - ox) as f32 + 0.5) / self.cell_w as f32;
        let y = ((row - oy) as f32 + 0.5) / self.cell_h as f32;
        Some((x, y))
    }

    /// Render a session snapshot into an existing framebuffer.
    ///
    /// Allocation-free; callers reuse one framebuffer across frames and only
    /// resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &HudState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', bg);
        self.draw_border(fb, frame, border);

        // Vibration alternates every 50ms of session time.
        let jitter = (snap.session_ms / 50) % 2 == 1;
        for tile in snap.grid.tiles() {
            let selected = snap.is_selected(tile.coord());
            self.draw_tile(fb, frame, tile, selected, jitter);
        }

        if let Some(cursor) = hud.cursor {
            self.draw_cursor(fb, frame, cursor);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if hud.paused {
            self.draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.session_over {
            self.draw_time_up(fb, frame, snap, hud);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Top-left terminal position of a grid cell.
    fn cell_origin(&self, frame: Frame, coord: Coord) -> (u16, u16) {
        (
            frame.x + 1 + coord.col as u16 * self.cell_w,
            frame.y + 1 + coord.row as u16 * self.cell_h,
        )
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, frame: Frame, tile: &Tile, selected: bool, jitter: bool) {
        let (px, py) = self.cell_origin(frame, tile.coord());
        let mut style = CellStyle::new(tile_rgb(tile.color()), if selected { SELECTED_BG } else { BOARD_BG });
        if selected {
            style = style.bold();
        }

        let w = self.cell_w - 2;
        let h = self.cell_h - 1;
        let scale = tile.scale();
        if scale < 0.5 {
            if selected {
                fb.fill_rect(px + 1, py, w, h, ' ', style);
            }
            // Seed: a single dot in the middle of the slot.
            if scale > 0.0 || selected {
                fb.put_char(px + self.cell_w / 2, py + h / 2, '·', style.dim());
            }
            return;
        }
        if !tile.is_fully_visible() {
            fb.fill_rect(px + 1, py + h / 2, w, 1, tier_glyph(tile.tier()), style.dim());
            return;
        }

        let x = match (tile.is_vibrating(), jitter) {
            (true, true) => px + 2,
            (true, false) => px,
            (false, _) => px + 1,
        };
        fb.fill_rect(x, py, w, h, tier_glyph(tile.tier()), style);
        if tile.is_star() {
            fb.put_char(x + w / 2, py + h / 2, '*', style.bold());
        }
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, frame: Frame, cursor: Coord) {
        let (px, py) = self.cell_origin(frame, cursor);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BOARD_BG).bold();
        for dy in 0..self.cell_h - 1 {
            fb.put_char(px, py + dy, '[', style);
            fb.put_char(px + self.cell_w - 1, py + dy, ']', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let inactive = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.time_remaining_secs(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "POWER-UPS", label);
        y = y.saturating_add(1);
        for power_up in PowerUp::ALL {
            let remaining = snap.power_ups.remaining_ms(power_up);
            if remaining > 0 {
                let end = fb.put_str(panel_x, y, power_up.label(), power_up_style(power_up));
                fb.put_u32(end + 1, y, remaining.div_ceil(1000), value);
            } else {
                fb.put_str(panel_x, y, power_up.label(), inactive);
            }
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "COMBO", label);
        y = y.saturating_add(1);
        let end = fb.put_str(panel_x, y, "x", value);
        fb.put_u32(end, y, snap.combo.multiplier(), value);
        y = y.saturating_add(2);

        if let Some(event) = snap.last_event {
            if y < viewport.height {
                self.draw_last_event(fb, panel_x, y, event, value);
            }
        }
    }

    fn draw_last_event(&self, fb: &mut FrameBuffer, x: u16, y: u16, event: MatchEvent, style: CellStyle) {
        match event {
            MatchEvent::Combined { points, .. } => {
                let end = fb.put_str(x, y, "+", style);
                fb.put_u32(end, y, points, style);
            }
            MatchEvent::StarMatched { power_up, chained, points, .. } => {
                let end = fb.put_str(x, y, "+", style.bold());
                let end = fb.put_u32(end, y, points, style.bold());
                let label = if chained { "CHAIN" } else { power_up.label() };
                fb.put_str(end + 1, y, label, power_up_style(power_up));
            }
            MatchEvent::Mismatch { .. } => {
                fb.put_str(x, y, "MISS", style.dim());
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        self.draw_centered(fb, frame, mid_y, text, overlay_style());
    }

    /// Game-over summary: final score, best score and the new rank if the
    /// session made the leaderboard.
    fn draw_time_up(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot, hud: &HudState) {
        let y = frame.y.saturating_add(frame.h / 2).saturating_sub(1);
        let style = overlay_style();
        self.draw_centered(fb, frame, y, "TIME UP", style);

        let mut line = ArrayString::<24>::new();
        let _ = write!(line, "SCORE {}", snap.score);
        self.draw_centered(fb, frame, y + 1, &line, style);

        if let Some(best) = hud.best_score {
            line.clear();
            let _ = write!(line, "BEST {best}");
            self.draw_centered(fb, frame, y + 2, &line, style);
        }
        if let Some(rank) = hud.rank {
            line.clear();
            let _ = write!(line, "RANK #{}", rank + 1);
            self.draw_centered(fb, frame, y + 3, &line, style);
        }
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

fn overlay_style() -> CellStyle {
    CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold()
}

fn tile_rgb(color: TileColor) -> Rgb {
    match color {
        TileColor::Red => Rgb::new(220, 70, 70),
        TileColor::Blue => Rgb::new(80, 120, 230),
        TileColor::Green => Rgb::new(90, 200, 110),
    }
}

fn tier_glyph(tier: Tier) -> char {
    match tier {
        Tier::One => '░',
        Tier::Two => '▒',
        Tier::Star => '▓',
    }
}

fn power_up_style(power_up: PowerUp) -> CellStyle {
    let color = match power_up {
        PowerUp::ComboMultiplier => TileColor::Red,
        PowerUp::FreezeTime => TileColor::Blue,
        PowerUp::InstantTiles => TileColor::Green,
    };
    CellStyle::new(tile_rgb(color), PANEL_BG).bold()
}

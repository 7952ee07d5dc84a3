//! Tile module - a single grid cell's state machine
//!
//! A tile never changes identity: when a slot is matched, the grid builds a
//! brand-new `Tile` in its place. What does change over a tile's lifetime is
//! its presentation state:
//!
//! - **Spawning**: `scale < 1`, not selectable (unless Instant-Tiles is active)
//! - **Visible**: `scale == 1`, selectable
//! - **Vibrating**: overlay flag set while a mismatch is being shown
//!
//! Growth is gated on the session clock: nothing happens before the tile's
//! appear time, afterwards each update tick adds a fixed step scaled by the
//! tile's speed multiplier.

use serde::{Deserialize, Serialize};

use m4tch_types::{Coord, Tier, TileColor, APPEAR_COL_STAGGER_MS, APPEAR_ROW_STAGGER_MS, TILE_GROWTH_STEP};

/// Presentation phase derived from a tile's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilePhase {
    Spawning,
    Visible,
    Vibrating,
}

/// One occupied grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    tier: Tier,
    color: TileColor,
    coord: Coord,
    scale: f32,
    appear_at_ms: u32,
    speed: f32,
    fully_visible: bool,
    vibrating: bool,
}

impl Tile {
    /// Create a tile that starts growing once the session clock reaches
    /// `appear_at_ms`.
    pub fn new(tier: Tier, color: TileColor, coord: Coord, appear_at_ms: u32) -> Self {
        Self {
            tier,
            color,
            coord,
            scale: 0.0,
            appear_at_ms,
            speed: 1.0,
            fully_visible: false,
            vibrating: false,
        }
    }

    /// Create a tile that is already fully grown and selectable.
    pub fn grown(tier: Tier, color: TileColor, coord: Coord) -> Self {
        Self {
            scale: 1.0,
            fully_visible: true,
            ..Self::new(tier, color, coord, 0)
        }
    }

    /// Override the growth speed multiplier (1.0 = normal).
    pub fn with_speed(mut self, speed: f32) -> Self {
        debug_assert!(speed > 0.0, "tile speed must be positive");
        self.speed = speed;
        self
    }

    /// Appear time used when the board is first populated: rows cascade in
    /// one after another, columns ripple within a row.
    pub fn cascade_appear_ms(coord: Coord) -> u32 {
        coord.row as u32 * APPEAR_ROW_STAGGER_MS + coord.col as u32 * APPEAR_COL_STAGGER_MS
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn appear_at_ms(&self) -> u32 {
        self.appear_at_ms
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_fully_visible(&self) -> bool {
        self.fully_visible
    }

    pub fn is_vibrating(&self) -> bool {
        self.vibrating
    }

    pub fn is_star(&self) -> bool {
        self.tier.is_star()
    }

    pub fn phase(&self) -> TilePhase {
        if self.vibrating {
            TilePhase::Vibrating
        } else if self.fully_visible {
            TilePhase::Visible
        } else {
            TilePhase::Spawning
        }
    }

    /// Same tier and same color.
    pub fn matches(&self, other: &Tile) -> bool {
        self.tier == other.tier && self.color == other.color
    }

    /// One update tick of the growth animation.
    pub fn advance(&mut self, session_ms: u32) {
        if self.fully_visible || session_ms < self.appear_at_ms {
            return;
        }
        self.scale += TILE_GROWTH_STEP * self.speed;
        if self.scale >= 1.0 {
            self.scale = 1.0;
            self.fully_visible = true;
        }
    }

    pub fn mark_vibrating(&mut self, vibrating: bool) {
        self.vibrating = vibrating;
    }

    /// Re-arm the spawn animation.
    pub fn reset_appearance(&mut self, appear_at_ms: u32) {
        self.scale = 0.0;
        self.fully_visible = false;
        self.appear_at_ms = appear_at_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(col: i32, row: i32) -> Coord {
        Coord::checked(col, row).unwrap()
    }

    #[test]
    fn test_new_tile_is_spawning() {
        let t = Tile::new(Tier::One, TileColor::Red, coord(0, 0), 0);
        assert_eq!(t.scale(), 0.0);
        assert!(!t.is_fully_visible());
        assert_eq!(t.phase(), TilePhase::Spawning);
    }

    #[test]
    fn test_growth_waits_for_appear_time() {
        let mut t = Tile::new(Tier::One, TileColor::Blue, coord(1, 2), 100);
        t.advance(50);
        assert_eq!(t.scale(), 0.0);
        t.advance(100);
        assert!(t.scale() > 0.0);
    }

    #[test]
    fn test_growth_saturates_and_flips_visibility() {
        let mut t = Tile::new(Tier::One, TileColor::Green, coord(0, 0), 0);
        for _ in 0..200 {
            t.advance(0);
        }
        assert_eq!(t.scale(), 1.0);
        assert!(t.is_fully_visible());
        assert_eq!(t.phase(), TilePhase::Visible);
    }

    #[test]
    fn test_slow_tile_grows_slower() {
        let mut normal = Tile::new(Tier::One, TileColor::Red, coord(0, 0), 0);
        let mut slow = Tile::new(Tier::One, TileColor::Red, coord(0, 0), 0).with_speed(0.2);
        for _ in 0..10 {
            normal.advance(0);
            slow.advance(0);
        }
        assert!(slow.scale() < normal.scale());
    }

    #[test]
    fn test_vibration_does_not_touch_visibility() {
        let mut t = Tile::grown(Tier::Two, TileColor::Red, coord(3, 3));
        t.mark_vibrating(true);
        assert!(t.is_fully_visible());
        assert_eq!(t.phase(), TilePhase::Vibrating);
        t.mark_vibrating(false);
        assert_eq!(t.phase(), TilePhase::Visible);
    }

    #[test]
    fn test_reset_appearance() {
        let mut t = Tile::grown(Tier::One, TileColor::Red, coord(0, 1));
        t.reset_appearance(500);
        assert_eq!(t.scale(), 0.0);
        assert!(!t.is_fully_visible());
        assert_eq!(t.appear_at_ms(), 500);
    }

    #[test]
    fn test_cascade_staggers_rows_then_columns() {
        assert_eq!(Tile::cascade_appear_ms(coord(0, 0)), 0);
        assert_eq!(Tile::cascade_appear_ms(coord(1, 0)), APPEAR_COL_STAGGER_MS);
        assert_eq!(Tile::cascade_appear_ms(coord(0, 1)), APPEAR_ROW_STAGGER_MS);
        assert!(Tile::cascade_appear_ms(coord(3, 0)) < Tile::cascade_appear_ms(coord(0, 1)));
    }

    #[test]
    fn test_cascade_is_strictly_row_major() {
        let times: Vec<u32> = (0..4)
            .flat_map(|row| (0..4).map(move |col| Tile::cascade_appear_ms(coord(col, row))))
            .collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]), "{times:?}");
    }
}

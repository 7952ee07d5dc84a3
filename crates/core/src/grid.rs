//! Grid module - the 4x4 board of tiles
//!
//! The grid owns exactly one live tile per cell. Tiles are never removed,
//! only swapped for freshly built ones, so the board is fully populated at
//! every observable point.
//! Uses a flat array (row-major, `row * GRID_SIZE + col`) like any small
//! fixed board.
//!
//! Pointer coordinates arrive in grid space: cell `(col, row)` covers
//! `[col, col + 1] x [row, row + 1]`, bounds inclusive. A point on a shared
//! edge therefore touches several cells; [`Grid::scan_order`] decides which
//! one wins.

use serde::{Deserialize, Serialize};

use crate::rng::ColorSource;
use crate::tile::Tile;
use m4tch_types::{Coord, Tier, TileColor, GRID_CELLS, GRID_SIZE};

/// The game grid - 4 columns x 4 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    tiles: [Tile; GRID_CELLS],
}

impl Grid {
    /// Populate all cells with tier-1 tiles of uniformly random color.
    ///
    /// No adjacency rule is applied: a fresh board may already contain
    /// matching pairs, and solvability is not checked.
    pub fn initialize(colors: &mut dyn ColorSource) -> Self {
        let tiles = std::array::from_fn(|i| {
            let coord = Coord::from_index(i);
            Tile::new(Tier::One, colors.next_color(), coord, Tile::cascade_appear_ms(coord))
        });
        Self { tiles }
    }

    /// Build a grid from explicit tiles (row-major).
    pub fn from_tiles(tiles: [Tile; GRID_CELLS]) -> Self {
        debug_assert!(
            tiles.iter().enumerate().all(|(i, t)| t.coord().index() == i),
            "tile coordinates must match their slot"
        );
        Self { tiles }
    }

    pub fn get(&self, coord: Coord) -> &Tile {
        &self.tiles[coord.index()]
    }

    pub fn get_mut(&mut self, coord: Coord) -> &mut Tile {
        &mut self.tiles[coord.index()]
    }

    /// Get tile at `(col, row)`; `None` if out of bounds
    pub fn get_at(&self, col: i32, row: i32) -> Option<&Tile> {
        Coord::checked(col, row).map(|c| self.get(c))
    }

    pub fn tiles(&self) -> &[Tile; GRID_CELLS] {
        &self.tiles
    }

    /// Swap the tile at `tile.coord()` for `tile`, returning the old one.
    pub fn replace_tile(&mut self, tile: Tile) -> Tile {
        std::mem::replace(&mut self.tiles[tile.coord().index()], tile)
    }

    /// Swap a cell's tile for a freshly spawned one.
    pub fn replace(&mut self, coord: Coord, tier: Tier, color: TileColor, appear_at_ms: u32) -> Tile {
        self.replace_tile(Tile::new(tier, color, coord, appear_at_ms))
    }

    /// Advance every tile's growth animation by one tick.
    pub fn advance_all(&mut self, session_ms: u32) {
        for tile in &mut self.tiles {
            tile.advance(session_ms);
        }
    }

    /// Cells in hit-test order: rows bottom to top (row 3 first), then
    /// columns left to right.
    pub fn scan_order() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE)
            .rev()
            .flat_map(|row| (0..GRID_SIZE).map(move |col| Coord { col, row }))
    }

    /// First cell in scan order whose bounds contain `(x, y)` and whose tile
    /// passes `eligible`.
    pub fn pointer_hit(&self, x: f32, y: f32, eligible: impl Fn(&Tile) -> bool) -> Option<Coord> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Self::scan_order().find(|&c| {
            let (left, top) = (c.col as f32, c.row as f32);
            let inside = x >= left && x <= left + 1.0 && y >= top && y <= top + 1.0;
            inside && eligible(self.get(c))
        })
    }

    /// Number of tiles at the given tier
    pub fn count_tier(&self, tier: Tier) -> usize {
        self.tiles.iter().filter(|t| t.tier() == tier).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ColorRng, ScriptedColors};

    #[test]
    fn test_initialize_fills_every_cell_with_tier_one() {
        let grid = Grid::initialize(&mut ColorRng::new(3));
        for (i, tile) in grid.tiles().iter().enumerate() {
            assert_eq!(tile.tier(), Tier::One);
            assert_eq!(tile.coord().index(), i);
            assert!(!tile.is_fully_visible());
        }
        assert_eq!(grid.count_tier(Tier::One), GRID_CELLS);
    }

    #[test]
    fn test_initialize_draws_colors_in_row_major_order() {
        let mut colors = ScriptedColors::new(vec![TileColor::Red, TileColor::Blue, TileColor::Green]);
        let grid = Grid::initialize(&mut colors);
        assert_eq!(grid.get_at(0, 0).unwrap().color(), TileColor::Red);
        assert_eq!(grid.get_at(1, 0).unwrap().color(), TileColor::Blue);
        assert_eq!(grid.get_at(2, 0).unwrap().color(), TileColor::Green);
        assert_eq!(grid.get_at(3, 0).unwrap().color(), TileColor::Red);
    }

    #[test]
    fn test_get_at_out_of_bounds() {
        let grid = Grid::initialize(&mut ColorRng::new(1));
        assert!(grid.get_at(-1, 0).is_none());
        assert!(grid.get_at(0, 4).is_none());
        assert!(grid.get_at(3, 3).is_some());
    }

    #[test]
    fn test_replace_swaps_only_the_target_cell() {
        let mut grid = Grid::initialize(&mut ScriptedColors::constant(TileColor::Red));
        let c = Coord::checked(2, 1).unwrap();
        let old = grid.replace(c, Tier::Star, TileColor::Green, 0);

        assert_eq!(old.tier(), Tier::One);
        assert_eq!(grid.get(c).tier(), Tier::Star);
        assert_eq!(grid.get(c).color(), TileColor::Green);
        assert_eq!(grid.get(c).coord(), c);
        assert_eq!(grid.count_tier(Tier::One), GRID_CELLS - 1);
    }

    #[test]
    fn test_scan_order_bottom_row_first() {
        let order: Vec<Coord> = Grid::scan_order().collect();
        assert_eq!(order.len(), GRID_CELLS);
        assert_eq!(order[0], Coord { col: 0, row: 3 });
        assert_eq!(order[1], Coord { col: 1, row: 3 });
        assert_eq!(order[4], Coord { col: 0, row: 2 });
        assert_eq!(order[15], Coord { col: 3, row: 0 });
    }

    #[test]
    fn test_pointer_hit_shared_corner_uses_scan_order() {
        let grid = Grid::initialize(&mut ColorRng::new(1));
        // (1, 2) touches cells (0,1), (1,1), (0,2), (1,2); row 2 scans first.
        assert_eq!(grid.pointer_hit(1.0, 2.0, |_| true), Some(Coord { col: 0, row: 2 }));
        assert_eq!(grid.pointer_hit(1.5, 2.5, |_| true), Some(Coord { col: 1, row: 2 }));
        assert_eq!(grid.pointer_hit(4.5, 0.5, |_| true), None);
        assert_eq!(grid.pointer_hit(f32::NAN, 0.5, |_| true), None);
    }

    #[test]
    fn test_pointer_hit_skips_ineligible_tiles() {
        let grid = Grid::initialize(&mut ColorRng::new(1));
        let hit = grid.pointer_hit(1.0, 2.0, |t| t.coord() != Coord { col: 0, row: 2 });
        assert_eq!(hit, Some(Coord { col: 1, row: 2 }));
    }
}

//! Grid and tile-space primitives shared by every generation stage.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, TileKind};

/// Dense `row * width + col` tile buffer owned by a single generation call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Rectangle whose outer ring is `border` and everything inside is `interior`.
    pub fn bordered(width: usize, height: usize, border: TileKind, interior: TileKind) -> Self {
        let mut grid = Self::filled(width, height, interior);
        for y in 0..height {
            for x in 0..width {
                if grid.is_border_cell(x, y) {
                    grid.tiles[y * width + x] = border;
                }
            }
        }
        grid
    }

    /// Rebuilds a grid from an exported buffer. `None` when the length disagrees.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileKind>) -> Option<Self> {
        (tiles.len() == width * height).then_some(Self { width, height, tiles })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x >= 1
            && pos.y >= 1
            && (pos.x as usize) < self.width.saturating_sub(1)
            && (pos.y as usize) < self.height.saturating_sub(1)
    }

    pub fn is_border_cell(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Out-of-bounds reads report walls.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let index = self.index(pos);
        self.tiles[index] = tile;
    }

    pub fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub fn pos_at(&self, index: usize) -> Pos {
        Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 }
    }

    pub fn center(&self) -> Pos {
        Pos { y: (self.height / 2) as i32, x: (self.width / 2) as i32 }
    }

    /// Interior positions holding exactly `tile`, in row-major order.
    pub fn interior_positions_of(&self, tile: TileKind) -> Vec<Pos> {
        let mut positions = Vec::new();
        for y in 1..self.height.saturating_sub(1) {
            for x in 1..self.width.saturating_sub(1) {
                if self.tiles[y * self.width + x] == tile {
                    positions.push(Pos { y: y as i32, x: x as i32 });
                }
            }
        }
        positions
    }

    /// Flat indices of every tile matching `predicate`, ascending.
    pub fn indices_where(&self, predicate: impl Fn(TileKind) -> bool) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| predicate(**tile))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn count_where(&self, predicate: impl Fn(TileKind) -> bool) -> usize {
        self.tiles.iter().filter(|tile| predicate(**tile)).count()
    }
}

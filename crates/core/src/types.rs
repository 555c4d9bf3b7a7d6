use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn offset(self, delta: (i32, i32)) -> Pos {
        Pos { y: self.y + delta.0, x: self.x + delta.1 }
    }
}

/// Cardinal steps as `(dy, dx)` in up, left, right, down order.
pub const CARDINALS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    StairsDown,
    Lava,
    Water,
    TallGrass,
    RestFloor,
    BossGate,
    Doorway,
}

impl TileKind {
    /// Anything the player can stand on. Boss gates stay sealed for generation purposes.
    pub fn is_floor_like(self) -> bool {
        !matches!(self, Self::Wall | Self::Lava | Self::Water | Self::BossGate)
    }

    pub fn is_collision(self) -> bool {
        matches!(self, Self::Wall | Self::BossGate)
    }

    pub fn is_hazard(self) -> bool {
        matches!(self, Self::Lava | Self::Water)
    }

    pub fn is_encounter(self) -> bool {
        self == Self::TallGrass
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Wall => 0,
            Self::Floor => 1,
            Self::StairsDown => 2,
            Self::Lava => 3,
            Self::Water => 4,
            Self::TallGrass => 5,
            Self::RestFloor => 6,
            Self::BossGate => 7,
            Self::Doorway => 8,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => '.',
            Self::StairsDown => '>',
            Self::Lava => '~',
            Self::Water => '=',
            Self::TallGrass => '"',
            Self::RestFloor => ',',
            Self::BossGate => '+',
            Self::Doorway => 'D',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloorKind {
    Procedural,
    Fallback,
    Rest,
    Boss,
    LegendaryRoom,
}

impl FloorKind {
    pub fn border_tile(self) -> TileKind {
        match self {
            Self::Boss => TileKind::BossGate,
            _ => TileKind::Wall,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Procedural => 0,
            Self::Fallback => 1,
            Self::Rest => 2,
            Self::Boss => 3,
            Self::LegendaryRoom => 4,
        }
    }
}

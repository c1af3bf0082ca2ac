use serde::{Deserialize, Serialize};

/// Grid coordinate; `y` is the row and `x` the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dy, dx) = direction.delta();
        Self { y: self.y + dy * distance, x: self.x + dx * distance }
    }

    pub fn is_room(self) -> bool {
        self.y % 2 == 1 && self.x % 2 == 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise from north; also the bit order of wall masks.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }
}

/// Pixel-space bounding box of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl PixelRect {
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (i64::from(px), i64::from(py));
        let (x, y, size) = (i64::from(self.x), i64::from(self.y), i64::from(self.size));
        px >= x && py >= y && px < x + size && py < y + size
    }
}

//! Public data models for cells and finished mazes.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use super::grid::Grid;
use crate::types::{Direction, PixelRect, Pos};

/// Which orthogonal neighbors of a wall are passages, north in the high bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallMask(u8);

impl WallMask {
    pub const EMPTY: Self = Self(0);

    pub const fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::North => 0b1000,
            Direction::East => 0b0100,
            Direction::South => 0b0010,
            Direction::West => 0b0001,
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn with(self, direction: Direction) -> Self {
        Self(self.0 | Self::bit(direction))
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    /// Asset key such as `"1010"`, in north, east, south, west order.
    pub fn key(self) -> String {
        format!("{:04b}", self.0)
    }
}

impl fmt::Display for WallMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall { mask: WallMask },
    Passage {
        has_item: bool,
        #[serde(skip)]
        checked: bool,
    },
    Exit { accessible: bool },
}

impl CellKind {
    pub const WALL: Self = Self::Wall { mask: WallMask::EMPTY };
    pub const PASSAGE: Self = Self::Passage { has_item: false, checked: false };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub rect: PixelRect,
}

impl Cell {
    pub fn is_wall(&self) -> bool {
        matches!(self.kind, CellKind::Wall { .. })
    }

    pub fn is_passage(&self) -> bool {
        matches!(self.kind, CellKind::Passage { .. })
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.kind, CellKind::Exit { .. })
    }

    pub fn wall_mask(&self) -> Option<WallMask> {
        match self.kind {
            CellKind::Wall { mask } => Some(mask),
            CellKind::Passage { .. } | CellKind::Exit { .. } => None,
        }
    }

    pub fn wall_key(&self) -> Option<String> {
        self.wall_mask().map(WallMask::key)
    }

    pub fn has_item(&self) -> bool {
        matches!(self.kind, CellKind::Passage { has_item: true, .. })
    }

    pub fn is_accessible(&self) -> bool {
        matches!(self.kind, CellKind::Exit { accessible: true })
    }

    /// Sets the item flag on a passage. Returns `false` for any other kind.
    pub fn set_item(&mut self, value: bool) -> bool {
        match &mut self.kind {
            CellKind::Passage { has_item, .. } => {
                *has_item = value;
                true
            }
            CellKind::Wall { .. } | CellKind::Exit { .. } => false,
        }
    }

    /// Sets the accessible flag on the exit. Returns `false` for any other kind.
    pub fn set_accessible(&mut self, value: bool) -> bool {
        match &mut self.kind {
            CellKind::Exit { accessible } => {
                *accessible = value;
                true
            }
            CellKind::Wall { .. } | CellKind::Passage { .. } => false,
        }
    }
}

/// A finished level: carved, exit-marked, item-placed and wall-classified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    pub grid: Grid,
    pub start: Pos,
    pub exit: Pos,
    pub keys: Vec<Pos>,
    pub seed: u64,
    pub attempts: u32,
}

impl Maze {
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn set_exit_accessible(&mut self, accessible: bool) -> bool {
        self.grid.cell_mut(self.exit).is_some_and(|cell| cell.set_accessible(accessible))
    }

    pub fn remaining_items(&self) -> usize {
        self.keys.iter().filter(|&&pos| self.grid.cell(pos).is_some_and(Cell::has_item)).count()
    }

    /// Layout-only byte encoding. Pixel rects and the attempt count are left
    /// out so re-originating a grid keeps its fingerprint.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.size() as u32).to_le_bytes());
        for cell in self.grid.cells() {
            match cell.kind {
                CellKind::Wall { mask } => {
                    bytes.push(0);
                    bytes.push(mask.bits());
                }
                CellKind::Passage { has_item, .. } => {
                    bytes.push(1);
                    bytes.push(u8::from(has_item));
                }
                CellKind::Exit { accessible } => {
                    bytes.push(2);
                    bytes.push(u8::from(accessible));
                }
            }
        }
        bytes.extend(self.start.y.to_le_bytes());
        bytes.extend(self.start.x.to_le_bytes());
        bytes.extend(self.exit.y.to_le_bytes());
        bytes.extend(self.exit.x.to_le_bytes());

        bytes.extend((self.keys.len() as u32).to_le_bytes());
        for key in &self.keys {
            bytes.extend(key.y.to_le_bytes());
            bytes.extend(key.x.to_le_bytes());
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

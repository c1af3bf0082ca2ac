//! Square cell grid with pixel-space bookkeeping.

use serde::{Deserialize, Serialize};

use super::model::{Cell, CellKind};
use crate::types::{PixelRect, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cell_size: u32,
    border: u32,
    origin: (i32, i32),
    cells: Vec<Cell>,
}

pub fn normalize_size(size: usize) -> usize {
    if size % 2 == 0 { size + 1 } else { size }
}

impl Grid {
    /// All-wall grid; cell `(row, col)` sits at pixel `(col * cell_size, row * cell_size)`.
    pub fn new(cell_size: u32, border: u32, size: usize) -> Self {
        let size = normalize_size(size);
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell {
                    kind: CellKind::WALL,
                    rect: PixelRect {
                        x: pixel_offset(col, cell_size),
                        y: pixel_offset(row, cell_size),
                        size: cell_size,
                    },
                });
            }
        }
        Self { size, cell_size, border, origin: (0, 0), cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    /// Width and height in pixels, frame included. Saturates at `u32::MAX`.
    pub fn pixel_extent(&self) -> u32 {
        let extent = self.size as u64 * u64::from(self.cell_size) + 2 * u64::from(self.border);
        u32::try_from(extent).unwrap_or(u32::MAX)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(super) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x >= 1 && pos.y >= 1 && (pos.x as usize) < self.size - 1 && (pos.y as usize) < self.size - 1
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = self.index(pos);
        self.cells.get_mut(index)
    }

    /// Out-of-range positions read as walls.
    pub fn kind_at(&self, pos: Pos) -> CellKind {
        self.cell(pos).map_or(CellKind::WALL, |cell| cell.kind)
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| !cell.is_wall())
    }

    pub(super) fn set_kind(&mut self, pos: Pos, kind: CellKind) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.kind = kind;
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Pos { y, x }))
    }

    pub fn passage_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_passage()).count()
    }

    pub fn cell_containing(&self, px: i32, py: i32) -> Option<Pos> {
        let local_x = i64::from(px) - i64::from(self.origin.0);
        let local_y = i64::from(py) - i64::from(self.origin.1);
        if local_x < 0 || local_y < 0 || self.cell_size == 0 {
            return None;
        }
        let cell_size = i64::from(self.cell_size);
        let pos = Pos {
            y: i32::try_from(local_y / cell_size).ok()?,
            x: i32::try_from(local_x / cell_size).ok()?,
        };
        self.in_bounds(pos).then_some(pos)
    }

    /// Moves every cell's pixel box so the grid's top-left corner lands on `origin`.
    pub fn set_origin(&mut self, origin: (i32, i32)) {
        let dx = i64::from(origin.0) - i64::from(self.origin.0);
        let dy = i64::from(origin.1) - i64::from(self.origin.1);
        for cell in &mut self.cells {
            cell.rect.x = clamp_pixel(i64::from(cell.rect.x) + dx);
            cell.rect.y = clamp_pixel(i64::from(cell.rect.y) + dy);
        }
        self.origin = origin;
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.size + (pos.x as usize)
    }
}

fn pixel_offset(index: usize, cell_size: u32) -> i32 {
    clamp_pixel((index as i64).saturating_mul(i64::from(cell_size)))
}

fn clamp_pixel(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

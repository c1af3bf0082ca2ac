//! Plain-text dump of a maze for terminals and bug reports.

use maze_core::{CellKind, Maze, Pos};

pub const WALL: char = '#';
pub const PASSAGE: char = ' ';
pub const START: char = 'S';
pub const EXIT: char = 'E';
pub const KEY: char = 'k';

pub fn render(maze: &Maze) -> String {
    let size = maze.size();
    let mut out = String::with_capacity(size * (size + 1));
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            out.push(glyph(maze, Pos { y, x }));
        }
        out.push('\n');
    }
    out
}

fn glyph(maze: &Maze, pos: Pos) -> char {
    if pos == maze.start {
        return START;
    }
    match maze.grid.kind_at(pos) {
        CellKind::Wall { .. } => WALL,
        CellKind::Exit { .. } => EXIT,
        CellKind::Passage { has_item: true, .. } => KEY,
        CellKind::Passage { has_item: false, .. } => PASSAGE,
    }
}

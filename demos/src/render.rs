//! Terminal drawing of a map and the state of a search over it.
//!
//! Cells still in the open set are green, expanded cells red, and cells on
//! the final path are drawn as `.` in cyan. Start and end keep their letters.

use std::collections::HashSet;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use tilestar_paths::{Coord, GridSearch, Path, Terrain, Tile};

/// Character used for path cells.
pub const PATH_CHAR: char = '.';

/// Whether to emit colour escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Plain,
    Ansi,
}

/// Draw the whole map at the current cursor position.
pub fn draw<W: Write, P>(
    out: &mut W,
    terrain: &Terrain,
    search: &GridSearch<P>,
    path: Option<&Path>,
    palette: Palette,
) -> io::Result<()> {
    let on_path: HashSet<Coord> = path
        .map(|p| p.cells.iter().copied().collect())
        .unwrap_or_default();
    let dims = terrain.dims();

    for row in 0..dims.rows {
        for col in 0..dims.cols {
            let c = Coord::new(row, col);
            let Some(tile) = terrain.tile(c) else {
                continue;
            };
            let marked = on_path.contains(&c) && matches!(tile, Tile::Empty);
            let ch = if marked { PATH_CHAR } else { tile.to_char() };

            let color = match search.cell(c) {
                _ if marked => Some(Color::Cyan),
                Some(s) if s.closed => Some(Color::Red),
                Some(s) if s.visited => Some(Color::Green),
                _ => None,
            };
            match (palette, color) {
                (Palette::Ansi, Some(color)) => queue!(
                    out,
                    SetAttribute(Attribute::Bold),
                    SetForegroundColor(color),
                    Print(ch),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?,
                _ => queue!(out, Print(ch))?,
            }
        }
        queue!(out, Print('\n'))?;
    }
    out.flush()
}

/// Redraw from the top-left corner for one animation frame, then pause.
pub fn frame<W: Write, P>(
    out: &mut W,
    terrain: &Terrain,
    search: &GridSearch<P>,
    palette: Palette,
    delay: Duration,
) -> io::Result<()> {
    queue!(out, MoveTo(0, 0))?;
    draw(out, terrain, search, None, palette)?;
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    Ok(())
}

use anyhow::{bail, Result};

use crate::Coords;

/// Side length of one grid cell, in pixel units.
pub const CELL_SIZE: i32 = 20;

/// Board geometry. Positions are pixel-aligned: every cell sits at a multiple
/// of `CELL_SIZE` on both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: i32,
    rows: i32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let columns = (width / CELL_SIZE as u32) as i32;
        let rows = (height / CELL_SIZE as u32) as i32;

        if columns == 0 || rows == 0 {
            bail!("a {}x{} board cannot hold a single {}px cell", width, height, CELL_SIZE);
        }

        Ok(Grid { columns, rows })
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Board width in pixel units.
    pub fn width(&self) -> i32 {
        self.columns * CELL_SIZE
    }

    /// Board height in pixel units.
    pub fn height(&self) -> i32 {
        self.rows * CELL_SIZE
    }

    pub fn center(&self) -> Coords {
        ((self.columns / 2) * CELL_SIZE, (self.rows / 2) * CELL_SIZE)
    }

    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.width() && pos.1 < self.height()
            && pos.0 % CELL_SIZE == 0 && pos.1 % CELL_SIZE == 0
    }

    /// Every cell of the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| {
            (0..columns).map(move |col| (col * CELL_SIZE, row * CELL_SIZE))
        })
    }

    /// Moves `pos` one cell along `delta`, re-entering from the opposite edge
    /// when it leaves the board.
    pub fn step(&self, pos: Coords, delta: (i32, i32)) -> Coords {
        (
            wrap(pos.0 + delta.0 * CELL_SIZE, self.width()),
            wrap(pos.1 + delta.1 * CELL_SIZE, self.height()),
        )
    }
}

/// Toroidal wraparound of a pixel coordinate into `[0, extent)`.
pub fn wrap(coordinate: i32, extent: i32) -> i32 {
    coordinate.rem_euclid(extent)
}

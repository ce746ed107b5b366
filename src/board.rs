use rand::Rng;

use crate::config::GameConfig;

/// Largest pixel width or height a board may have. Keeps every coordinate,
/// plus one cell of movement, inside `i32`.
pub const MAX_PIXEL_EXTENT: i32 = 1 << 30;

/// A pixel-aligned grid cell. Both coordinates are multiples of the board's cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// Fixed-size playfield. Movement wraps around every edge, each axis independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    columns: i32,
    rows: i32,
    cell_size: i32,
}

impl Board {
    /// Panics if either pixel side exceeds `MAX_PIXEL_EXTENT`.
    /// `GameConfig::validate` rejects such boards up front.
    pub fn new(columns: u16, rows: u16, cell_size: u16) -> Self {
        let (columns, rows, cell_size) = (columns as i64, rows as i64, cell_size as i64);
        assert!(
            columns * cell_size <= MAX_PIXEL_EXTENT as i64
                && rows * cell_size <= MAX_PIXEL_EXTENT as i64,
            "board of {}x{} cells of {} px is too large",
            columns, rows, cell_size
        );

        Board { columns: columns as i32, rows: rows as i32, cell_size: cell_size as i32 }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Board::new(config.board_width, config.board_height, config.cell_size)
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn pixel_width(&self) -> i32 {
        self.columns * self.cell_size
    }

    pub fn pixel_height(&self) -> i32 {
        self.rows * self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Middle cell, rounded down to the grid. (320, 240) on the default 640x480 field.
    pub fn center(&self) -> Cell {
        self.cell_at(self.columns / 2, self.rows / 2)
    }

    /// Moves `cell` by `(dx, dy)` whole cells, wrapping at the edges.
    pub fn offset(&self, cell: Cell, dx: i32, dy: i32) -> Cell {
        Cell::new(
            (cell.x + dx * self.cell_size).rem_euclid(self.pixel_width()),
            (cell.y + dy * self.cell_size).rem_euclid(self.pixel_height()),
        )
    }

    pub fn cell_at(&self, column: i32, row: i32) -> Cell {
        Cell::new(column * self.cell_size, row * self.cell_size)
    }

    /// Column and row index of a cell, for renderers working in grid units.
    pub fn grid_index(&self, cell: Cell) -> (i32, i32) {
        (cell.x / self.cell_size, cell.y / self.cell_size)
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        self.cell_at(rng.gen_range(0..self.columns), rng.gen_range(0..self.rows))
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| self.cell_at(col, row)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::from_config(&GameConfig::default())
    }
}

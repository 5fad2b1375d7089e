use std::fmt;

use crate::error::{BoardError, MoveError};

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of cells in a winning line and in every scoring window.
pub const WINDOW: usize = 4;

/// Row/column steps of the four axes: horizontal, vertical, diagonal down-right,
/// diagonal down-left.
const DIRECTIONS: [(usize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Human,
    Ai,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Ai => 'O',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty standard 6x7 board
    pub fn new() -> Self {
        Board {
            rows: ROWS,
            cols: COLS,
            cells: vec![Cell::Empty; ROWS * COLS],
        }
    }

    /// Create an empty board of the given size. Both dimensions must leave room
    /// for four in a row.
    pub fn with_size(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows < WINDOW || cols < WINDOW {
            return Err(BoardError::TooSmall { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column that earns the center bonus.
    pub fn center_column(&self) -> usize {
        self.cols / 2
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row `rows - 1` is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    pub fn is_valid_move(&self, col: usize) -> bool {
        !self.is_column_full(col)
    }

    /// Playable columns in ascending order. The order is the search's
    /// tie-break priority.
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.is_valid_move(col)).collect()
    }

    /// Row a piece dropped into `col` would land on.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.next_open_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.set(row, col, player.to_cell());
        Ok(row)
    }

    /// Drop a piece for `player`. Returns false without touching the board if
    /// the column is full or out of range.
    pub fn place(&mut self, col: usize, player: Player) -> bool {
        self.drop_piece(col, player).is_ok()
    }

    /// Remove the topmost piece of `col`. Must pair with an earlier `place` on
    /// the same column; empty or out-of-range columns are left alone.
    pub fn undo(&mut self, col: usize) {
        if col >= self.cols {
            return;
        }
        if let Some(row) = (0..self.rows).find(|&row| self.get(row, col) != Cell::Empty) {
            self.set(row, col, Cell::Empty);
        }
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Check whether `player` owns any four consecutive cells on any axis.
    pub fn has_four_in_row(&self, player: Player) -> bool {
        let cell = player.to_cell();
        self.windows()
            .any(|window| window.iter().all(|&c| c == cell))
    }

    /// Every run of four cells along the four axes.
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WINDOW]> + '_ {
        DIRECTIONS.into_iter().flat_map(move |(dr, dc)| {
            let row_end = self.rows - (WINDOW - 1) * dr;
            let (col_start, col_end) = match dc {
                1 => (0, self.cols - (WINDOW - 1)),
                -1 => (WINDOW - 1, self.cols),
                _ => (0, self.cols),
            };
            (0..row_end).flat_map(move |row| {
                (col_start..col_end).map(move |col| self.window(row, col, dr, dc))
            })
        })
    }

    fn window(&self, row: usize, col: usize, dr: usize, dc: isize) -> [Cell; WINDOW] {
        std::array::from_fn(|i| {
            let c = col as isize + dc * i as isize;
            self.get(row + dr * i, c as usize)
        })
    }

    /// Build a board from text rows, top row first, using `.`, `X`, `O`.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let mut board = Board::with_size(rows.len(), rows[0].len()).unwrap();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'X' => Cell::Human,
                    'O' => Cell::Ai,
                    _ => Cell::Empty,
                };
                board.set(row, col, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (0..self.cols).map(|c| c.to_string()).collect();
        writeln!(f, "   {}", header.join(" "))?;
        writeln!(f, "  {}", "-".repeat(self.cols * 2 - 1))?;
        for row in 0..self.rows {
            write!(f, "| ")?;
            for col in 0..self.cols {
                write!(f, "{} ", self.get(row, col).symbol())?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "  {}", "-".repeat(self.cols * 2 - 1))
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const BOARD_SIZE: usize = 8;

/// The four diagonal step directions as (row, col) deltas.
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

impl Color {
    pub fn opponent(&self) -> Color {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }

    /// Row delta a man of this color advances by. Black starts at the top
    /// of the grid and moves toward higher rows, Red the other way.
    pub fn forward(&self) -> i32 {
        match self {
            Color::Black => 1,
            Color::Red => -1,
        }
    }

    /// Far row where a man of this color is crowned.
    pub fn promotion_row(&self) -> usize {
        match self {
            Color::Black => BOARD_SIZE - 1,
            Color::Red => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::Man,
        }
    }

    pub fn king(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::King,
        }
    }

    /// One-character board glyph: men lowercase, kings uppercase.
    pub fn glyph(&self) -> char {
        match (self.color, self.rank) {
            (Color::Black, Rank::Man) => 'b',
            (Color::Black, Rank::King) => 'B',
            (Color::Red, Rank::Man) => 'r',
            (Color::Red, Rank::King) => 'R',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Steps by the given deltas, or `None` when that walks off the board.
    /// All directional scans go through here, so positions built from an
    /// in-bounds start are in bounds by construction.
    pub fn offset(&self, dr: i32, dc: i32) -> Option<Position> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single capture hop: where the piece lands and which enemy it removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub to: Position,
    pub captured: Position,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("position ({row}, {col}) is outside the {BOARD_SIZE}x{BOARD_SIZE} board")]
    OutOfBounds { row: usize, col: usize },
}

/// An 8x8 grid of cells, row 0 at the top. Pure state plus move queries;
/// legality across turns is the game's responsibility, not the board's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Standard starting layout: twelve men per side on the dark squares,
    /// Black on rows 0-2, Red on rows 5-7.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 == 0 {
                    continue;
                }
                board.cells[row][col] = match row {
                    0..=2 => Some(Piece::man(Color::Black)),
                    5..=7 => Some(Piece::man(Color::Red)),
                    _ => None,
                };
            }
        }
        board
    }

    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Reads a cell. Out-of-range coordinates are a caller bug, reported as
    /// `OutOfBounds` rather than conflated with an empty cell.
    pub fn get(&self, pos: Position) -> Result<Option<Piece>, GameError> {
        if pos.row < BOARD_SIZE && pos.col < BOARD_SIZE {
            Ok(self.cells[pos.row][pos.col])
        } else {
            Err(GameError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            })
        }
    }

    /// Writes a cell with no legality checks; callers own the rules.
    pub fn set(&mut self, pos: Position, cell: Option<Piece>) -> Result<(), GameError> {
        if pos.row < BOARD_SIZE && pos.col < BOARD_SIZE {
            self.cells[pos.row][pos.col] = cell;
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            })
        }
    }

    /// Unchecked read for positions already known to be in bounds.
    pub(crate) fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.row][pos.col]
    }

    /// Unchecked write for positions already known to be in bounds.
    pub(crate) fn put(&mut self, pos: Position, cell: Option<Piece>) {
        self.cells[pos.row][pos.col] = cell;
    }

    pub fn count_pieces(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, Some(piece) if piece.color == color))
            .count()
    }

    /// Non-capturing destinations for the piece at `from`: one forward
    /// diagonal step for a man, a slide through empty cells for a king.
    /// Empty when `from` holds no piece.
    pub fn simple_targets(&self, from: Position) -> Vec<Position> {
        let Ok(Some(piece)) = self.get(from) else {
            return Vec::new();
        };

        let mut targets = Vec::new();
        match piece.rank {
            Rank::Man => {
                let dr = piece.color.forward();
                for dc in [-1, 1] {
                    if let Some(to) = from.offset(dr, dc) {
                        if self.piece_at(to).is_none() {
                            targets.push(to);
                        }
                    }
                }
            }
            Rank::King => {
                for &(dr, dc) in &DIAGONALS {
                    let mut cur = from;
                    while let Some(next) = cur.offset(dr, dc) {
                        if self.piece_at(next).is_some() {
                            break;
                        }
                        targets.push(next);
                        cur = next;
                    }
                }
            }
        }
        targets
    }

    /// Capture hops for the piece at `from`, using its color and rank as
    /// found on the board. Empty when `from` holds no piece.
    pub fn captures_from(&self, from: Position) -> Vec<Capture> {
        match self.get(from) {
            Ok(Some(piece)) => self.captures_for(from, piece.color, piece.rank),
            _ => Vec::new(),
        }
    }

    /// Capture hops from `from` under an explicit color/rank policy. The
    /// game uses this mid-chain, where the policy rank can differ from the
    /// rank currently on the board.
    pub fn captures_for(&self, from: Position, color: Color, rank: Rank) -> Vec<Capture> {
        match rank {
            Rank::Man => self.man_captures(from, color),
            Rank::King => self.king_captures(from, color),
        }
    }

    /// Men capture in all four diagonals, not just forward: an adjacent
    /// enemy with an empty cell directly beyond it.
    fn man_captures(&self, from: Position, color: Color) -> Vec<Capture> {
        let mut captures = Vec::new();
        for &(dr, dc) in &DIAGONALS {
            let Some(mid) = from.offset(dr, dc) else {
                continue;
            };
            let Some(to) = mid.offset(dr, dc) else {
                continue;
            };
            let holds_enemy = matches!(self.piece_at(mid), Some(piece) if piece.color != color);
            if holds_enemy && self.piece_at(to).is_none() {
                captures.push(Capture { to, captured: mid });
            }
        }
        captures
    }

    /// Flying captures: scan outward along each diagonal; after exactly one
    /// enemy, every empty cell until the next obstruction is a landing
    /// square. A second enemy or an own piece ends the scan.
    fn king_captures(&self, from: Position, color: Color) -> Vec<Capture> {
        let mut captures = Vec::new();
        for &(dr, dc) in &DIAGONALS {
            let mut found_enemy: Option<Position> = None;
            let mut cur = from;
            while let Some(next) = cur.offset(dr, dc) {
                match self.piece_at(next) {
                    None => {
                        if let Some(captured) = found_enemy {
                            captures.push(Capture { to: next, captured });
                        }
                    }
                    Some(piece) if piece.color != color => {
                        if found_enemy.is_some() {
                            break;
                        }
                        found_enemy = Some(next);
                    }
                    Some(_) => break,
                }
                cur = next;
            }
        }
        captures
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:2} ", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{:2} ", row)?;
            for col in 0..BOARD_SIZE {
                let c = match self.cells[row][col] {
                    Some(piece) => piece.glyph(),
                    None if (row + col) % 2 == 1 => '.',
                    None => ' ',
                };
                write!(f, " {} ", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

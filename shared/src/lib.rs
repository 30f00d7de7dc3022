use std::fmt;

use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// State of one board cell. Carried on the wire as the integers
/// 0 (empty), 1 (player one) and 2 (player two); nothing else is
/// accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl CellState {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(CellState::Empty),
            1 => Some(CellState::PlayerOne),
            2 => Some(CellState::PlayerTwo),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::PlayerOne => 1,
            CellState::PlayerTwo => 2,
        }
    }
}

impl Serialize for CellState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_raw())
    }
}

impl<'de> Deserialize<'de> for CellState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        CellState::from_raw(raw).ok_or_else(|| {
            D::Error::invalid_value(Unexpected::Unsigned(u64::from(raw)), &"a cell state 0, 1 or 2")
        })
    }
}

/// A cell position, row-major.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coord {
    pub row: u32,
    pub col: u32,
}

impl Coord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Wholesale board push from the collaborator: the full grid as nested
/// arrays plus the coordinate of the move that produced it.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub grid: Vec<Vec<CellState>>,
    #[serde(default)]
    pub last_move: Option<Coord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    SizeMismatch { expected: u32, actual: usize },
    RaggedRow { row: usize, len: usize, expected: u32 },
    LastMoveOutOfBounds { row: u32, col: u32, size: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::SizeMismatch { expected, actual } => {
                write!(f, "snapshot has {actual} rows, board is {expected}x{expected}")
            }
            SnapshotError::RaggedRow { row, len, expected } => {
                write!(f, "snapshot row {row} has {len} cells, expected {expected}")
            }
            SnapshotError::LastMoveOutOfBounds { row, col, size } => {
                write!(f, "last move ({row}, {col}) outside {size}x{size} board")
            }
        }
    }
}

impl BoardSnapshot {
    /// Validates the snapshot against the configured board size and
    /// flattens it into a [`Grid`]. Rejects the whole push on any
    /// geometry violation so callers can keep their previous state.
    pub fn into_grid(self, expected_size: u32) -> Result<(Grid, Option<Coord>), SnapshotError> {
        if self.grid.len() != expected_size as usize {
            return Err(SnapshotError::SizeMismatch {
                expected: expected_size,
                actual: self.grid.len(),
            });
        }
        for (row, cells) in self.grid.iter().enumerate() {
            if cells.len() != expected_size as usize {
                return Err(SnapshotError::RaggedRow {
                    row,
                    len: cells.len(),
                    expected: expected_size,
                });
            }
        }
        if let Some(coord) = self.last_move {
            if coord.row >= expected_size || coord.col >= expected_size {
                return Err(SnapshotError::LastMoveOutOfBounds {
                    row: coord.row,
                    col: coord.col,
                    size: expected_size,
                });
            }
        }
        let mut cells = Vec::with_capacity((expected_size as usize).pow(2));
        for row in &self.grid {
            cells.extend_from_slice(row);
        }
        Ok((
            Grid {
                size: expected_size,
                cells,
            },
            self.last_move,
        ))
    }
}

/// The authoritative `size x size` cell matrix, stored row-major.
/// Only replaced wholesale; there is no per-cell mutation API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn empty(size: u32) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; (size as usize).pow(2)],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Bounds-checked read; out-of-range coordinates are `None` so a
    /// mismatched read degrades to a no-op instead of a panic.
    pub fn cell(&self, coord: Coord) -> Option<CellState> {
        if !self.contains(coord) {
            return None;
        }
        let index = coord.row as usize * self.size as usize + coord.col as usize;
        self.cells.get(index).copied()
    }
}

use serde::{Deserialize, Serialize};

use crate::GameError;

/// Two-tone state of a single cell, `0` or `1` outside the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    #[default]
    Off,
    On,
}

impl Cell {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    pub fn flip(&mut self) {
        *self = self.flipped();
    }

    pub const fn value(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.value()
    }
}

impl TryFrom<u8> for Cell {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            other => Err(GameError::InvalidCell(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipping_twice_restores_the_cell() {
        let mut cell = Cell::Off;

        cell.flip();
        assert_eq!(cell, Cell::On);
        cell.flip();
        assert_eq!(cell, Cell::Off);
    }

    #[test]
    fn only_zero_and_one_are_cells() {
        assert_eq!(Cell::try_from(0), Ok(Cell::Off));
        assert_eq!(Cell::try_from(1), Ok(Cell::On));
        assert_eq!(Cell::try_from(2), Err(GameError::InvalidCell(2)));
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&[Cell::On, Cell::Off]).unwrap(), "[1,0]");
        assert!(serde_json::from_str::<Cell>("3").is_err());
    }
}

use serde::{Deserialize, Serialize};

use crate::*;

/// Indices of every flip applied to the current game, oldest first.
///
/// The scramble flips of a new game are recorded too, so undoing the whole history brings the grid back to all off.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<CellIndex>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_moves(moves: Vec<CellIndex>) -> Self {
        Self { moves }
    }

    pub fn push(&mut self, index: CellIndex) {
        self.moves.push(index);
    }

    /// Most recent move, which is the next one to undo.
    pub fn pop(&mut self) -> Option<CellIndex> {
        self.moves.pop()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[CellIndex] {
        &self.moves
    }

    /// Checks every recorded move against a grid, so undoing them later cannot go out of range.
    pub fn validate_for(&self, grid: &Grid) -> Result<()> {
        self.moves
            .iter()
            .try_for_each(|&index| grid.validate_index(index).map(|_| ()))
    }

    /// Undoes the most recent move on `grid`. Returns the undone index, `None` once the history is empty.
    pub fn undo_last(&mut self, grid: &mut Grid) -> Option<CellIndex> {
        let index = self.pop()?;
        if let Err(err) = grid.flip(index) {
            log::warn!("Skipping unreplayable move: {}", err);
        }
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_is_last_in_first_out() {
        let mut grid = Grid::new(4);
        let mut history = MoveHistory::new();
        for index in [0, 5, 10] {
            grid.flip(index).unwrap();
            history.push(index);
        }

        assert_eq!(history.undo_last(&mut grid), Some(10));
        assert_eq!(history.undo_last(&mut grid), Some(5));
        assert_eq!(history.as_slice(), &[0]);
    }

    #[test]
    fn undoing_everything_clears_the_grid() {
        let mut grid = Grid::new(5);
        let mut history = MoveHistory::new();
        for index in [3, 3, 24, 12, 0, 7] {
            grid.flip(index).unwrap();
            history.push(index);
        }

        while history.undo_last(&mut grid).is_some() {}

        assert!(history.is_empty());
        assert_eq!(grid, Grid::new(5));
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut grid = Grid::new(4);
        grid.flip(6).unwrap();
        let before = grid.clone();

        assert_eq!(MoveHistory::new().undo_last(&mut grid), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn validate_rejects_moves_outside_grid() {
        let history = MoveHistory::from_moves(vec![1, 16]);

        assert_eq!(
            history.validate_for(&Grid::new(4)),
            Err(GameError::OutOfRange {
                index: 16,
                cells: 16
            })
        );
        assert_eq!(history.validate_for(&Grid::new(5)), Ok(()));
    }

    #[test]
    fn serializes_as_plain_list() {
        let history = MoveHistory::from_moves(vec![4, 0, 9]);

        assert_eq!(serde_json::to_string(&history).unwrap(), "[4,0,9]");
    }
}

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Where the cells used to scramble a new game come from.
pub trait MoveSource {
    /// Picks an index uniformly from `0..cells`.
    fn pick(&mut self, cells: CellCount) -> CellIndex;
}

/// Clears the grid and history, then applies `SCRAMBLE_FLIPS` picked flips, recording each one.
///
/// Every scramble flip lands in the history, so the resulting game can always be solved by undoing it.
pub fn scramble(grid: &mut Grid, history: &mut MoveHistory, source: &mut impl MoveSource) {
    grid.clear();
    history.clear();

    let cells = grid.cell_count();
    for _ in 0..SCRAMBLE_FLIPS {
        let picked = source.pick(cells);
        let index = match grid.validate_index(picked) {
            Ok(index) => index,
            Err(err) => {
                log::warn!("Move source picked outside the grid, wrapping around: {}", err);
                picked % cells
            }
        };
        grid.flip_valid(index);
        history.push(index);
    }
    log::debug!(
        "Scrambled a {}x{} grid with {} flips",
        grid.edge(),
        grid.edge(),
        history.len()
    );
}

use super::*;

/// Replays a fixed list of picks, cycling when it runs out. An empty list always picks `0`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedMoves {
    picks: Vec<CellIndex>,
    next: usize,
}

impl ScriptedMoves {
    pub fn new(picks: Vec<CellIndex>) -> Self {
        Self { picks, next: 0 }
    }
}

impl MoveSource for ScriptedMoves {
    fn pick(&mut self, _cells: CellCount) -> CellIndex {
        let Some(&index) = self.picks.get(self.next) else {
            return 0;
        };
        self.next = (self.next + 1) % self.picks.len();
        index
    }
}

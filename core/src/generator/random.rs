use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform picks from a small seedable generator.
#[derive(Clone, Debug)]
pub struct RandomMoveSource {
    rng: SmallRng,
}

impl RandomMoveSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for RandomMoveSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MoveSource for RandomMoveSource {
    fn pick(&mut self, cells: CellCount) -> CellIndex {
        if cells == 0 {
            return 0;
        }
        self.rng.random_range(0..cells)
    }
}

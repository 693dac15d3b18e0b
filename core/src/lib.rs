use core::time::Duration;

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use history::*;
pub use progression::*;
pub use records::*;
pub use schedule::*;
pub use session::*;
pub use snapshot::*;
pub use timer::*;
pub use types::*;

pub use flip_protocol::{PeerMessage, ProtocolError};

mod cell;
mod error;
mod generator;
mod grid;
mod history;
mod progression;
mod records;
mod schedule;
mod session;
mod snapshot;
mod timer;
mod types;

/// Smallest grid edge, the first level.
pub const MIN_EDGE: Edge = 4;

/// Largest grid edge, the last level.
pub const MAX_EDGE: Edge = 7;

/// Number of levels, one per edge in `MIN_EDGE..=MAX_EDGE`.
pub const LEVEL_COUNT: usize = (MAX_EDGE - MIN_EDGE + 1) as usize;

/// Wins kept at one edge before the grid grows.
pub const MAX_COUNT: u8 = 3;

/// Random flips used to scramble a new game.
pub const SCRAMBLE_FLIPS: usize = 2 * MAX_EDGE as usize;

/// Best time assumed for a level that has no record yet, in seconds.
pub const DEFAULT_BEST_TIME: u32 = 180;

pub const SOLVE_STEP_DELAY: Duration = Duration::from_millis(750);

pub const ADVANCE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The game was already won, the click was dropped.
    NoChange,
    Flipped,
    Won,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flipped => true,
            Self::Won => true,
        }
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Why a remote message was applied or not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// A new grid replaced the local one.
    Replaced,
    /// A remote click was replayed.
    Clicked(ClickOutcome),
    /// The message does not apply to this role and was ignored.
    Ignored,
}

use serde::{Deserialize, Serialize};

use crate::*;

/// What a win did to the grid size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Same edge, the win streak grew.
    Stay,
    /// The streak passed `MAX_COUNT` and the grid grew by one.
    LevelUp,
    /// A win on the largest grid, back to the smallest one.
    Restart,
}

impl Progress {
    pub const fn is_level_up(self) -> bool {
        matches!(self, Self::LevelUp)
    }
}

/// Grid size policy across consecutive wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionTracker {
    edge: Edge,
    consecutive_wins: u8,
}

impl ProgressionTracker {
    pub const fn new() -> Self {
        Self {
            edge: MIN_EDGE,
            consecutive_wins: 0,
        }
    }

    pub fn with_edge(edge: Edge) -> Self {
        Self {
            edge: edge.clamp(MIN_EDGE, MAX_EDGE),
            consecutive_wins: 0,
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn consecutive_wins(&self) -> u8 {
        self.consecutive_wins
    }

    pub fn record_win(&mut self) -> Progress {
        self.consecutive_wins += 1;

        if self.edge < MAX_EDGE {
            if self.consecutive_wins > MAX_COUNT {
                self.edge += 1;
                self.consecutive_wins = 0;
                log::debug!("Level up, grid edge is now {}", self.edge);
                Progress::LevelUp
            } else {
                Progress::Stay
            }
        } else {
            self.edge = MIN_EDGE;
            self.consecutive_wins = 0;
            log::debug!("Won on the largest grid, back to edge {}", self.edge);
            Progress::Restart
        }
    }

    /// Follows an edge decided elsewhere, such as a grid received from the leader. The streak restarts when the edge
    /// changes.
    pub fn adopt_edge(&mut self, edge: Edge) {
        let edge = edge.clamp(MIN_EDGE, MAX_EDGE);
        if edge != self.edge {
            self.edge = edge;
            self.consecutive_wins = 0;
        }
    }
}

impl Default for ProgressionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_smallest_grid() {
        let tracker = ProgressionTracker::new();

        assert_eq!(tracker.edge(), 4);
        assert_eq!(tracker.consecutive_wins(), 0);
    }

    #[test]
    fn fourth_win_levels_up() {
        let mut tracker = ProgressionTracker::new();

        assert_eq!(tracker.record_win(), Progress::Stay);
        assert_eq!(tracker.record_win(), Progress::Stay);
        assert_eq!(tracker.record_win(), Progress::Stay);
        assert_eq!(tracker.consecutive_wins(), MAX_COUNT);
        assert_eq!(tracker.edge(), 4);

        assert_eq!(tracker.record_win(), Progress::LevelUp);
        assert_eq!(tracker.edge(), 5);
        assert_eq!(tracker.consecutive_wins(), 0);
    }

    #[test]
    fn climbs_every_level() {
        let mut tracker = ProgressionTracker::new();

        let level_ups = (0..12).filter(|_| tracker.record_win().is_level_up()).count();

        assert_eq!(level_ups, 3);
        assert_eq!(tracker.edge(), MAX_EDGE);
    }

    #[test]
    fn any_win_on_largest_grid_restarts() {
        let mut tracker = ProgressionTracker::with_edge(MAX_EDGE);

        assert_eq!(tracker.record_win(), Progress::Restart);
        assert_eq!(tracker.edge(), MIN_EDGE);
        assert_eq!(tracker.consecutive_wins(), 0);
    }

    #[test]
    fn adopting_a_new_edge_resets_the_streak() {
        let mut tracker = ProgressionTracker::new();
        tracker.record_win();
        tracker.record_win();

        tracker.adopt_edge(4);
        assert_eq!(tracker.consecutive_wins(), 2);

        tracker.adopt_edge(6);
        assert_eq!(tracker.edge(), 6);
        assert_eq!(tracker.consecutive_wins(), 0);
    }
}

use serde::{Deserialize, Serialize};

use crate::*;

/// Best time per level in whole seconds, indexed by `edge - MIN_EDGE`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestTimes([u32; LEVEL_COUNT]);

impl BestTimes {
    pub const STORAGE_KEY: &'static str = "flip.best_times";

    pub const fn new(times: [u32; LEVEL_COUNT]) -> Self {
        Self(times)
    }

    pub fn get(&self, edge: Edge) -> u32 {
        level_of(edge)
            .and_then(|level| self.0.get(level))
            .copied()
            .unwrap_or(DEFAULT_BEST_TIME)
    }

    pub fn as_array(&self) -> [u32; LEVEL_COUNT] {
        self.0
    }

    /// Keeps `elapsed` as the best time for the level when it is not worse than the stored one, ties included.
    /// Returns whether the record was written.
    pub fn record(&mut self, edge: Edge, elapsed: u32) -> bool {
        let Some(best) = level_of(edge).and_then(|level| self.0.get_mut(level)) else {
            log::warn!("No time record for edge {}", edge);
            return false;
        };

        if elapsed <= *best {
            log::debug!("New best time for edge {}: {}s (was {}s)", edge, elapsed, best);
            *best = elapsed;
            true
        } else {
            false
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        // a fixed-size list of integers always serializes
        serde_json::to_vec(self).unwrap_or_default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|err| GameError::CorruptPersistedState(err.to_string()))
    }

    /// Reads a stored table, falling back to defaults when it is missing or unreadable.
    pub fn load_or_default(bytes: Option<&[u8]>) -> Self {
        match bytes.map(Self::from_bytes) {
            Some(Ok(times)) => times,
            Some(Err(err)) => {
                log::warn!("Ignoring stored best times: {}", err);
                Self::default()
            }
            None => Self::default(),
        }
    }
}

impl Default for BestTimes {
    fn default() -> Self {
        Self([DEFAULT_BEST_TIME; LEVEL_COUNT])
    }
}

fn level_of(edge: Edge) -> Option<usize> {
    edge.checked_sub(MIN_EDGE).map(usize::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_three_minutes_everywhere() {
        assert_eq!(BestTimes::default().as_array(), [180, 180, 180, 180]);
    }

    #[test]
    fn faster_time_replaces_record() {
        let mut times = BestTimes::new([50, 180, 180, 180]);

        assert!(times.record(4, 45));
        assert_eq!(times.get(4), 45);
    }

    #[test]
    fn tie_replaces_record() {
        let mut times = BestTimes::new([50, 180, 180, 180]);

        assert!(times.record(4, 50));
        assert_eq!(times.get(4), 50);
    }

    #[test]
    fn slower_time_keeps_record() {
        let mut times = BestTimes::new([50, 180, 180, 180]);

        assert!(!times.record(4, 60));
        assert_eq!(times.get(4), 50);
    }

    #[test]
    fn records_are_per_level() {
        let mut times = BestTimes::default();

        times.record(6, 90);

        assert_eq!(times.as_array(), [180, 180, 90, 180]);
    }

    #[test]
    fn unknown_edges_are_not_recorded() {
        let mut times = BestTimes::default();

        assert!(!times.record(3, 1));
        assert!(!times.record(8, 1));
        assert_eq!(times, BestTimes::default());
    }

    #[test]
    fn stored_as_four_integers() {
        let times = BestTimes::new([12, 34, 56, 78]);

        assert_eq!(times.to_bytes(), b"[12,34,56,78]");
        assert_eq!(BestTimes::from_bytes(b"[12,34,56,78]"), Ok(times));
    }

    #[test]
    fn corrupt_or_missing_table_falls_back_to_defaults() {
        assert_eq!(BestTimes::load_or_default(None), BestTimes::default());
        assert_eq!(BestTimes::load_or_default(Some(&b"[1,2,3]"[..])), BestTimes::default());
        assert_eq!(BestTimes::load_or_default(Some(&b"garbage"[..])), BestTimes::default());
        assert_eq!(
            BestTimes::load_or_default(Some(&b"[1,2,3,4]"[..])),
            BestTimes::new([1, 2, 3, 4])
        );
    }
}

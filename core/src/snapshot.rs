use serde::{Deserialize, Serialize};

use crate::*;

/// In-progress game as persisted between runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub dot_list: Grid,
    /// Older snapshots carry no history, they restore with an empty one.
    #[serde(default)]
    pub move_list: MoveHistory,
    /// Seconds already played when the snapshot was taken.
    #[serde(default)]
    pub paused_time: u32,
    /// The saved game had already been won, it is not worth restoring.
    #[serde(default)]
    pub won: bool,
}

impl Snapshot {
    pub const STORAGE_KEY: &'static str = "flip.snapshot";

    pub fn to_bytes(&self) -> Vec<u8> {
        // cells, indices and integers, nothing here can fail to serialize
        serde_json::to_vec(self).unwrap_or_default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = serde_json::from_slice(bytes)
            .map_err(|err| GameError::CorruptPersistedState(err.to_string()))?;
        snapshot
            .move_list
            .validate_for(&snapshot.dot_list)
            .map_err(|err| GameError::CorruptPersistedState(err.to_string()))?;
        Ok(snapshot)
    }

    pub fn is_restorable(&self) -> bool {
        !self.won
    }
}

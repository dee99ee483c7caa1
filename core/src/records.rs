//! Logical save-game contract shared by the world and persistence adapters.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, GameObjectTypeId, PlayerId, UsedActions};

/// Persisted state of one object on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObjectRecord {
    /// Type of the object.
    pub kind: GameObjectTypeId,
    /// Owner of the object.
    pub owner: PlayerId,
    /// Cell the object occupies.
    pub cell: CellCoord,
    /// Remaining hit points.
    pub hit_points: i32,
    /// Actions already consumed this round.
    pub used_actions: UsedActions,
}

/// Persisted balance of one roster entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Identifier of the player.
    pub id: PlayerId,
    /// Money held by the player.
    pub money: u64,
}

/// Complete persisted world: objects in row-major grid order plus balances.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWorld {
    /// Number of columns of the saved grid.
    pub columns: u32,
    /// Number of rows of the saved grid.
    pub rows: u32,
    /// Player whose round was in progress.
    #[serde(default)]
    pub active_player: Option<PlayerId>,
    /// Balances of the roster.
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    /// Objects on the grid.
    pub objects: Vec<GameObjectRecord>,
}

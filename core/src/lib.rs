#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Skirmish rule engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod catalog;
mod records;
mod scenario;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use catalog::{CatalogError, GameObjectType, TypeCatalog};
pub use records::{GameObjectRecord, PlayerRecord, SavedWorld};
pub use scenario::{
    PlayerColor, PlayerSetup, RuleConfig, Scenario, ScenarioError, StartPlacement, MAX_MAP_CELLS,
};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets the world to the empty grid described by the scenario.
    InitScenario {
        /// Scenario supplying dimensions, roster and rules.
        scenario: Scenario,
    },
    /// Requests a starting object for a player at a random spaced-out cell.
    PlaceStartObject {
        /// Player that will own the object.
        player: PlayerId,
        /// Type of object to place.
        kind: GameObjectTypeId,
    },
    /// Hands the turn to a player and credits their income.
    StartRound {
        /// Player whose turn begins.
        player: PlayerId,
        /// Clears the used-action set of every live object when `true`.
        reenable_used_actions: bool,
    },
    /// Submits a player action for validation and execution.
    Perform {
        /// Action requested by the active player.
        action: Action,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the grid was reset to the provided dimensions.
    ScenarioInitialized {
        /// Number of columns in the new grid.
        columns: u32,
        /// Number of rows in the new grid.
        rows: u32,
    },
    /// Confirms that a starting object was placed.
    StartObjectPlaced {
        /// Handle allocated for the new object.
        object: GameObjectId,
        /// Owner of the new object.
        player: PlayerId,
        /// Type of the new object.
        kind: GameObjectTypeId,
        /// Cell chosen for the object.
        cell: CellCoord,
    },
    /// Reports that a starting object could not be placed.
    StartPlacementFailed {
        /// Player that requested the placement.
        player: PlayerId,
        /// Type that was requested.
        kind: GameObjectTypeId,
    },
    /// Announces that a player's round began.
    RoundStarted {
        /// Player that became active.
        player: PlayerId,
        /// Money credited to the player for the objects they own.
        income: u64,
    },
    /// Confirms that an object moved between two cells.
    ObjectMoved {
        /// Handle of the moved object.
        object: GameObjectId,
        /// Cell the object left.
        from: CellCoord,
        /// Cell the object now occupies.
        to: CellCoord,
    },
    /// Confirms that an object produced a new object.
    ObjectProduced {
        /// Handle of the producing object.
        producer: GameObjectId,
        /// Handle of the new object.
        object: GameObjectId,
        /// Type of the new object.
        kind: GameObjectTypeId,
        /// Owner of the new object.
        owner: PlayerId,
        /// Cell the new object occupies.
        cell: CellCoord,
        /// Price debited from the owner.
        cost: u64,
    },
    /// Reports the damage exchanged by a fight.
    AttackResolved {
        /// Handle of the attacking object.
        attacker: GameObjectId,
        /// Handle of the defending object.
        defender: GameObjectId,
        /// Damage inflicted on the defender.
        damage: u32,
        /// Hit points the defender holds after the attack.
        remaining_hp: i32,
    },
    /// Confirms that an object was destroyed and removed from the grid.
    ObjectDestroyed {
        /// Handle of the destroyed object.
        object: GameObjectId,
        /// Owner of the destroyed object.
        owner: PlayerId,
        /// Cell the object occupied.
        cell: CellCoord,
        /// Bounty credited to the active player.
        bounty: u64,
    },
    /// Announces that a player lost their last object.
    PlayerConquered {
        /// Player that destroyed the last object.
        conqueror: PlayerId,
        /// Player that was eliminated.
        loser: PlayerId,
        /// Balance moved from the loser to the conqueror.
        transferred: u64,
    },
    /// Reports that a submitted action was rejected.
    ActionRejected {
        /// Action that failed validation.
        action: Action,
        /// First precondition that failed.
        reason: ActionRejection,
    },
}

/// Kinds of actions an object may consume once per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    /// Relocation to an empty cell.
    Move,
    /// Attack against an object in range.
    Fight,
    /// Construction of a new object in an empty cell.
    Produce,
}

impl ActionKind {
    /// Every action kind in declaration order.
    pub const ALL: [ActionKind; 3] = [ActionKind::Move, ActionKind::Fight, ActionKind::Produce];

    const fn bit(self) -> u8 {
        match self {
            Self::Move => 1,
            Self::Fight => 1 << 1,
            Self::Produce => 1 << 2,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Move => "move",
            Self::Fight => "fight",
            Self::Produce => "produce",
        };
        f.write_str(label)
    }
}

/// Set of action kinds an object already consumed this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ActionKind>", into = "Vec<ActionKind>")]
pub struct UsedActions(u8);

impl UsedActions {
    /// Creates an empty set.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Creates a set containing every action kind.
    #[must_use]
    pub const fn all() -> Self {
        Self(ActionKind::Move.bit() | ActionKind::Fight.bit() | ActionKind::Produce.bit())
    }

    /// Reports whether `kind` was consumed.
    #[must_use]
    pub const fn contains(&self, kind: ActionKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Marks `kind` as consumed.
    pub fn insert(&mut self, kind: ActionKind) {
        self.0 |= kind.bit();
    }

    /// Forgets every consumed action.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Reports whether every action kind was consumed.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.0 == Self::all().0
    }

    /// Reports whether no action kind was consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the consumed kinds in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl From<Vec<ActionKind>> for UsedActions {
    fn from(kinds: Vec<ActionKind>) -> Self {
        let mut used = Self::none();
        for kind in kinds {
            used.insert(kind);
        }
        used
    }
}

impl From<UsedActions> for Vec<ActionKind> {
    fn from(used: UsedActions) -> Self {
        used.iter().collect()
    }
}

/// Request descriptor submitted by the active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Relocates the object at `from` to the empty cell `to`.
    Move {
        /// Cell holding the object that moves.
        from: CellCoord,
        /// Empty destination cell.
        to: CellCoord,
    },
    /// Attacks the object at `to` with the object at `from`.
    Fight {
        /// Cell holding the attacker.
        from: CellCoord,
        /// Cell holding the defender.
        to: CellCoord,
    },
    /// Builds an object of type `kind` at `to` using the producer at `from`.
    Produce {
        /// Cell holding the producer.
        from: CellCoord,
        /// Empty cell receiving the new object.
        to: CellCoord,
        /// Type of the object to build.
        kind: GameObjectTypeId,
    },
}

impl Action {
    /// Kind of action consumed when this request executes.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Move { .. } => ActionKind::Move,
            Self::Fight { .. } => ActionKind::Fight,
            Self::Produce { .. } => ActionKind::Produce,
        }
    }

    /// Cell holding the acting object.
    #[must_use]
    pub const fn from(&self) -> CellCoord {
        match self {
            Self::Move { from, .. } | Self::Fight { from, .. } | Self::Produce { from, .. } => {
                *from
            }
        }
    }

    /// Cell targeted by the action.
    #[must_use]
    pub const fn to(&self) -> CellCoord {
        match self {
            Self::Move { to, .. } | Self::Fight { to, .. } | Self::Produce { to, .. } => *to,
        }
    }
}

/// Reasons an action may be rejected by the world.
///
/// Rejections are the expected outcome of untrusted input and never leave the
/// world partially mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionRejection {
    /// A coordinate lies outside the grid.
    OutOfBounds,
    /// No object occupies the start cell.
    MissingActor,
    /// The destination cell is already occupied.
    DestinationOccupied,
    /// No object occupies the target cell.
    MissingTarget,
    /// The target lies beyond the relevant radius of the actor.
    OutOfRange,
    /// The actor already consumed this action kind this round.
    AlreadyUsed,
    /// The producer's type cannot build the requested type.
    NotProducible,
    /// The requested type is absent from the catalog.
    UnknownType,
    /// The active player cannot afford the requested type.
    InsufficientFunds,
    /// No round has been started.
    NoActivePlayer,
    /// The actor belongs to a player other than the active one.
    NotActivePlayersObject,
    /// The target belongs to the attacker's owner.
    FriendlyTarget,
}

impl fmt::Display for ActionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::OutOfBounds => "coordinate outside the map",
            Self::MissingActor => "no object at the start cell",
            Self::DestinationOccupied => "destination is occupied",
            Self::MissingTarget => "no object at the target cell",
            Self::OutOfRange => "target is out of range",
            Self::AlreadyUsed => "action already used this round",
            Self::NotProducible => "object cannot produce that type",
            Self::UnknownType => "unknown object type",
            Self::InsufficientFunds => "not enough money",
            Self::NoActivePlayer => "no active player",
            Self::NotActivePlayersObject => "object belongs to another player",
            Self::FriendlyTarget => "target is owned by the same player",
        };
        f.write_str(message)
    }
}

/// Unique identifier assigned to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Stable handle of a live object inside the world's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameObjectId(u32);

impl GameObjectId {
    /// Creates a new object handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of an entry in the [`TypeCatalog`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameObjectTypeId(u32);

impl GameObjectTypeId {
    /// Creates a new type identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell.
///
/// Coordinates are signed so that any input, including positions left of or
/// above the map, can be expressed and then rejected by bounds checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Chebyshev distance, `max(|dx|, |dy|)`, between two cells.
    #[must_use]
    pub const fn chebyshev_distance(self, other: CellCoord) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy {
            dx
        } else {
            dy
        }
    }

    /// Reports whether the cell lies inside a `columns` x `rows` grid.
    #[must_use]
    pub fn is_within(self, columns: u32, rows: u32) -> bool {
        u32::try_from(self.x).is_ok_and(|x| x < columns)
            && u32::try_from(self.y).is_ok_and(|y| y < rows)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

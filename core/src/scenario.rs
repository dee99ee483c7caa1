//! Scenario and rule configuration supplied by the caller at world construction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GameObjectTypeId, PlayerId};

const DEFAULT_START_MIN_DISTANCE: u32 = 2;
const DEFAULT_MAX_START_ATTEMPTS: u32 = 10_000;

/// Largest number of cells a map may hold.
pub const MAX_MAP_CELLS: u64 = 1 << 20;

/// Tunable rule parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Chebyshev distance that must separate a starting object from every other object.
    pub start_min_distance: u32,
    /// Number of random cells sampled before starting placement gives up.
    pub max_start_attempts: u32,
    /// Restricts actions to objects owned by the active player.
    pub require_active_owner: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            start_min_distance: DEFAULT_START_MIN_DISTANCE,
            max_start_attempts: DEFAULT_MAX_START_ATTEMPTS,
            require_active_owner: false,
        }
    }
}

/// Colour used by presentation layers to tint a player's objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl PlayerColor {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Identity and starting balance of a participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Identifier referenced by objects and commands.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Display colour.
    pub color: PlayerColor,
    /// Balance credited when the scenario initialises.
    #[serde(default)]
    pub starting_money: u64,
}

/// One entry of the initial-placement recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPlacement {
    /// Player receiving the object.
    pub player: PlayerId,
    /// Type of the object.
    pub kind: GameObjectTypeId,
}

/// Map dimensions, roster and placement recipe for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Seed for the starting placement generator.
    #[serde(default)]
    pub seed: u64,
    /// Rule parameters.
    #[serde(default)]
    pub rules: RuleConfig,
    /// Participants in turn order.
    pub players: Vec<PlayerSetup>,
    /// Starting objects, placed in order.
    #[serde(default)]
    pub placements: Vec<StartPlacement>,
}

/// Structural problems detected in a [`Scenario`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// The grid would contain no cells.
    #[error("map dimensions {columns}x{rows} must both be positive")]
    EmptyMap {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The map exceeds [`MAX_MAP_CELLS`] or the signed coordinate range.
    #[error("map dimensions {columns}x{rows} exceed the supported size")]
    MapTooLarge {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Two roster entries share an identifier.
    #[error("player {0:?} appears more than once in the roster")]
    DuplicatePlayer(PlayerId),
    /// A placement names a player absent from the roster.
    #[error("placement references unknown player {0:?}")]
    UnknownPlayer(PlayerId),
}

impl Scenario {
    /// Checks dimensions and roster consistency.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ScenarioError::EmptyMap {
                columns: self.columns,
                rows: self.rows,
            });
        }
        let cells = u64::from(self.columns) * u64::from(self.rows);
        if cells > MAX_MAP_CELLS
            || i32::try_from(self.columns).is_err()
            || i32::try_from(self.rows).is_err()
        {
            return Err(ScenarioError::MapTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }

        let mut seen = BTreeSet::new();
        for player in &self.players {
            if !seen.insert(player.id) {
                return Err(ScenarioError::DuplicatePlayer(player.id));
            }
        }

        if let Some(stray) = self
            .placements
            .iter()
            .find(|placement| !seen.contains(&placement.player))
        {
            return Err(ScenarioError::UnknownPlayer(stray.player));
        }

        Ok(())
    }
}

//! Static object type definitions supplied as configuration data.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GameObjectTypeId;

/// Immutable description of an object type.
///
/// Combat, cost and radius values are configuration; the world only reads them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObjectType {
    /// Identifier referenced by actions, saves and producible lists.
    pub id: GameObjectTypeId,
    /// Human readable name.
    pub name: String,
    /// Chebyshev radius reachable with a move.
    #[serde(default)]
    pub movement_radius: u32,
    /// Chebyshev radius in which new objects can be produced.
    #[serde(default)]
    pub production_radius: u32,
    /// Chebyshev radius in which other objects can be attacked.
    #[serde(default)]
    pub attack_radius: u32,
    /// Price paid by the active player to produce the type.
    #[serde(default)]
    pub cost: u64,
    /// Money credited to the owner at the start of each of their rounds.
    #[serde(default)]
    pub income_per_round: u64,
    /// Money credited to the destroying player.
    #[serde(default)]
    pub bounty: u64,
    /// Hit points of a freshly created object.
    pub max_hit_points: i32,
    /// Damage dealt to targets without a specific override.
    #[serde(default)]
    pub attack_damage: u32,
    /// Damage dealt to specific target types.
    #[serde(default)]
    pub damage_overrides: BTreeMap<GameObjectTypeId, u32>,
    /// Types this type is able to produce.
    #[serde(default)]
    pub producible: BTreeSet<GameObjectTypeId>,
}

impl GameObjectType {
    /// Damage an object of this type deals to an object of type `target`.
    #[must_use]
    pub fn damage_against(&self, target: GameObjectTypeId) -> u32 {
        self.damage_overrides
            .get(&target)
            .copied()
            .unwrap_or(self.attack_damage)
    }

    /// Reports whether this type can produce `kind`.
    #[must_use]
    pub fn can_produce(&self, kind: GameObjectTypeId) -> bool {
        self.producible.contains(&kind)
    }
}

/// Errors raised while assembling a [`TypeCatalog`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two entries share an identifier.
    #[error("object type {0:?} is defined more than once")]
    DuplicateType(GameObjectTypeId),
    /// An entry would create objects that are dead on arrival.
    #[error("object type {0:?} must have positive max hit points")]
    NonPositiveHitPoints(GameObjectTypeId),
    /// A producible list or damage override names an undefined type.
    #[error("object type {owner:?} references undefined type {missing:?}")]
    UnknownReference {
        /// Entry holding the dangling reference.
        owner: GameObjectTypeId,
        /// Identifier that is not defined.
        missing: GameObjectTypeId,
    },
}

/// Validated registry of every object type available to a match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GameObjectType>", into = "Vec<GameObjectType>")]
pub struct TypeCatalog {
    entries: BTreeMap<GameObjectTypeId, GameObjectType>,
}

impl TypeCatalog {
    /// Builds a catalog, rejecting duplicate ids and dangling references.
    pub fn new(types: impl IntoIterator<Item = GameObjectType>) -> Result<Self, CatalogError> {
        let mut entries = BTreeMap::new();
        for entry in types {
            if entry.max_hit_points <= 0 {
                return Err(CatalogError::NonPositiveHitPoints(entry.id));
            }
            let id = entry.id;
            if entries.insert(id, entry).is_some() {
                return Err(CatalogError::DuplicateType(id));
            }
        }

        for entry in entries.values() {
            let referenced = entry
                .producible
                .iter()
                .chain(entry.damage_overrides.keys());
            for missing in referenced {
                if !entries.contains_key(missing) {
                    return Err(CatalogError::UnknownReference {
                        owner: entry.id,
                        missing: *missing,
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// Looks up the type registered under `id`.
    #[must_use]
    pub fn get(&self, id: GameObjectTypeId) -> Option<&GameObjectType> {
        self.entries.get(&id)
    }

    /// Looks up a type by its name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&GameObjectType> {
        self.entries
            .values()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Reports whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: GameObjectTypeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Iterator over every registered type in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObjectType> {
        self.entries.values()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<GameObjectType>> for TypeCatalog {
    type Error = CatalogError;

    fn try_from(types: Vec<GameObjectType>) -> Result<Self, Self::Error> {
        Self::new(types)
    }
}

impl From<TypeCatalog> for Vec<GameObjectType> {
    fn from(catalog: TypeCatalog) -> Self {
        catalog.entries.into_values().collect()
    }
}

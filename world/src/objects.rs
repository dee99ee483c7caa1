//! Object instances and the arena that owns them.

use std::collections::BTreeMap;

use skirmish_core::{
    ActionKind, CellCoord, GameObjectId, GameObjectRecord, GameObjectType, GameObjectTypeId,
    PlayerId, UsedActions,
};

/// Unit placed on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameObject {
    id: GameObjectId,
    kind: GameObjectTypeId,
    owner: PlayerId,
    cell: CellCoord,
    hit_points: i32,
    used_actions: UsedActions,
}

impl GameObject {
    pub(crate) fn spawn(
        id: GameObjectId,
        object_type: &GameObjectType,
        owner: PlayerId,
        cell: CellCoord,
    ) -> Self {
        Self {
            id,
            kind: object_type.id,
            owner,
            cell,
            hit_points: object_type.max_hit_points,
            used_actions: UsedActions::none(),
        }
    }

    pub(crate) fn from_record(id: GameObjectId, record: &GameObjectRecord) -> Self {
        Self {
            id,
            kind: record.kind,
            owner: record.owner,
            cell: record.cell,
            hit_points: record.hit_points,
            used_actions: record.used_actions,
        }
    }

    pub(crate) fn to_record(&self) -> GameObjectRecord {
        GameObjectRecord {
            kind: self.kind,
            owner: self.owner,
            cell: self.cell,
            hit_points: self.hit_points,
            used_actions: self.used_actions,
        }
    }

    /// Arena handle of the object.
    #[must_use]
    pub const fn id(&self) -> GameObjectId {
        self.id
    }

    /// Type of the object.
    #[must_use]
    pub const fn kind(&self) -> GameObjectTypeId {
        self.kind
    }

    /// Player owning the object.
    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Cell the object believes it occupies.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Remaining hit points. Values at or below zero mean the object must be removed.
    #[must_use]
    pub const fn hit_points(&self) -> i32 {
        self.hit_points
    }

    /// Actions consumed this round.
    #[must_use]
    pub const fn used_actions(&self) -> UsedActions {
        self.used_actions
    }

    /// Reports whether `kind` was already consumed this round.
    #[must_use]
    pub const fn was_used(&self, kind: ActionKind) -> bool {
        self.used_actions.contains(kind)
    }

    /// Marks `kind` as consumed.
    pub fn use_action(&mut self, kind: ActionKind) {
        self.used_actions.insert(kind);
    }

    /// Marks every action kind as consumed.
    pub fn use_all_actions(&mut self) {
        self.used_actions = UsedActions::all();
    }

    /// Restores every action kind.
    pub fn reset_used_actions(&mut self) {
        self.used_actions.clear();
    }

    /// Reports whether `target` lies within the movement radius.
    #[must_use]
    pub fn can_move_to(&self, object_type: &GameObjectType, target: CellCoord) -> bool {
        self.cell.chebyshev_distance(target) <= object_type.movement_radius
    }

    /// Reports whether `target` lies within the production radius.
    #[must_use]
    pub fn can_produce_to(&self, object_type: &GameObjectType, target: CellCoord) -> bool {
        self.cell.chebyshev_distance(target) <= object_type.production_radius
    }

    /// Reports whether `other` is a hostile object within the attack radius.
    #[must_use]
    pub fn can_fight(&self, object_type: &GameObjectType, other: &GameObject) -> bool {
        other.owner != self.owner
            && self.cell.chebyshev_distance(other.cell) <= object_type.attack_radius
    }

    /// Applies this object's damage to `other` and returns the signed hit point delta.
    ///
    /// The delta is never positive. The defender is not removed here; callers
    /// check [`GameObject::hit_points`] afterwards.
    pub fn fight(&self, object_type: &GameObjectType, other: &mut GameObject) -> i32 {
        let damage = object_type.damage_against(other.kind);
        other.take_damage(damage)
    }

    fn take_damage(&mut self, damage: u32) -> i32 {
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        let before = self.hit_points;
        self.hit_points = before.saturating_sub(damage);
        self.hit_points - before
    }

    pub(crate) fn relocate(&mut self, cell: CellCoord) {
        self.cell = cell;
    }
}

/// Registry that stores live objects and manages handle allocation.
#[derive(Clone, Debug, Default)]
pub(crate) struct ObjectArena {
    entries: BTreeMap<GameObjectId, GameObject>,
    next_object_id: u32,
}

impl ObjectArena {
    /// Creates an empty arena with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate_id(&mut self) -> GameObjectId {
        let id = GameObjectId::new(self.next_object_id);
        self.next_object_id = self.next_object_id.saturating_add(1);
        id
    }

    pub(crate) fn insert(&mut self, object: GameObject) {
        let _ = self.entries.insert(object.id, object);
    }

    pub(crate) fn remove(&mut self, id: GameObjectId) -> Option<GameObject> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: GameObjectId) -> Option<&GameObject> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.entries.values_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn owned_by(&self, owner: PlayerId) -> impl Iterator<Item = &GameObject> {
        self.entries
            .values()
            .filter(move |object| object.owner == owner)
    }
}

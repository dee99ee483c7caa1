//! Logical save and load of the world state.

use std::collections::BTreeSet;

use log::{info, warn};
use skirmish_core::{PlayerRecord, SavedWorld};

use crate::{grid::OccupancyGrid, objects::ObjectArena, GameObject, World, WorldError};

impl World {
    /// Captures the world as a [`SavedWorld`].
    ///
    /// Fails if any object's stored position disagrees with the grid cell
    /// referencing it, or if a live object is not on the grid at all.
    pub fn save(&self) -> Result<SavedWorld, WorldError> {
        let mut objects = Vec::with_capacity(self.objects.len());
        for (slot, id) in self.grid.occupied() {
            let object = self
                .objects
                .get(id)
                .ok_or(WorldError::DanglingCell { cell: slot, object: id })?;
            if object.cell() != slot {
                warn!(
                    "refusing to save: {id:?} records {} but occupies {slot}",
                    object.cell()
                );
                return Err(WorldError::PositionMismatch {
                    object: id,
                    stored: object.cell(),
                    slot,
                });
            }
            objects.push(object.to_record());
        }

        if objects.len() != self.objects.len() {
            if let Some(orphan) = self
                .objects
                .iter()
                .find(|object| self.grid.occupant(object.cell()) != Some(object.id()))
            {
                warn!("refusing to save: {:?} is not on the grid", orphan.id());
                return Err(WorldError::OrphanObject(orphan.id()));
            }
        }

        let (columns, rows) = self.grid.dimensions();
        let players = self
            .players
            .iter()
            .map(|player| PlayerRecord {
                id: player.id(),
                money: player.money(),
            })
            .collect();
        info!("saved {} objects", objects.len());
        Ok(SavedWorld {
            columns,
            rows,
            active_player: self.active_player,
            players,
            objects,
        })
    }

    /// Replaces the grid, objects, balances and active player with `saved`.
    ///
    /// Everything is validated against a fresh grid first; the world is only
    /// modified when the whole save is consistent.
    pub fn load(&mut self, saved: &SavedWorld) -> Result<(), WorldError> {
        let (columns, rows) = self.grid.dimensions();
        if saved.columns != columns || saved.rows != rows {
            return Err(WorldError::DimensionMismatch {
                saved_columns: saved.columns,
                saved_rows: saved.rows,
                columns,
                rows,
            });
        }

        let mut players = self.players.clone();
        let mut seen = BTreeSet::new();
        for record in &saved.players {
            if !seen.insert(record.id) {
                return Err(WorldError::DuplicatePlayerRecord(record.id));
            }
            players
                .get_mut(record.id)
                .ok_or(WorldError::UnknownPlayer(record.id))?
                .set_money(record.money);
        }
        if let Some(active) = saved.active_player {
            if !players.contains(active) {
                return Err(WorldError::UnknownPlayer(active));
            }
        }

        let mut grid = OccupancyGrid::new(columns, rows)?;
        let mut objects = ObjectArena::new();
        for record in &saved.objects {
            let object_type = self
                .catalog
                .get(record.kind)
                .ok_or(WorldError::UnknownType(record.kind))?;
            if !players.contains(record.owner) {
                return Err(WorldError::UnknownPlayer(record.owner));
            }
            if !grid.contains(record.cell) {
                return Err(WorldError::OutOfBounds(record.cell));
            }
            if !grid.is_free(record.cell) {
                return Err(WorldError::PositionConflict(record.cell));
            }
            if record.hit_points <= 0 || record.hit_points > object_type.max_hit_points {
                return Err(WorldError::InvalidHitPoints {
                    cell: record.cell,
                    hit_points: record.hit_points,
                    max: object_type.max_hit_points,
                });
            }

            let id = objects.allocate_id();
            objects.insert(GameObject::from_record(id, record));
            grid.occupy(id, record.cell);
        }

        self.grid = grid;
        self.objects = objects;
        self.players = players;
        self.active_player = saved.active_player;
        info!("loaded {} objects", saved.objects.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use skirmish_core::{
        CellCoord, GameObjectRecord, GameObjectType, GameObjectTypeId, PlayerColor, PlayerId,
        PlayerSetup, RuleConfig, Scenario, TypeCatalog, UsedActions,
    };

    use crate::{query, World, WorldError};

    fn world() -> World {
        let catalog = TypeCatalog::new([GameObjectType {
            id: GameObjectTypeId::new(1),
            name: "Scout".to_owned(),
            max_hit_points: 4,
            ..GameObjectType::default()
        }])
        .expect("valid catalog");
        let scenario = Scenario {
            columns: 6,
            rows: 6,
            seed: 3,
            rules: RuleConfig::default(),
            players: vec![PlayerSetup {
                id: PlayerId::new(1),
                name: "Blue".to_owned(),
                color: PlayerColor::from_rgb(0x58, 0x47, 0xff),
                starting_money: 10,
            }],
            placements: Vec::new(),
        };
        World::new(catalog, &scenario).expect("world")
    }

    fn record(x: i32, y: i32, hit_points: i32) -> GameObjectRecord {
        GameObjectRecord {
            kind: GameObjectTypeId::new(1),
            owner: PlayerId::new(1),
            cell: CellCoord::new(x, y),
            hit_points,
            used_actions: UsedActions::none(),
        }
    }

    #[test]
    fn save_detects_position_mismatch() {
        let mut world = world();
        let id = world
            .add_start_game_objects(PlayerId::new(1), GameObjectTypeId::new(1))
            .expect("placed");
        let slot = world.objects.get(id).expect("live").cell();
        let stored = CellCoord::new((slot.x() + 1) % 6, slot.y());
        world.objects.get_mut(id).expect("live").relocate(stored);

        assert_eq!(
            world.save(),
            Err(WorldError::PositionMismatch {
                object: id,
                stored,
                slot,
            })
        );
    }

    #[test]
    fn save_detects_orphan_objects() {
        let mut world = world();
        let id = world
            .add_start_game_objects(PlayerId::new(1), GameObjectTypeId::new(1))
            .expect("placed");
        let cell = world.objects.get(id).expect("live").cell();
        let _ = world.grid.vacate(cell);

        assert_eq!(world.save(), Err(WorldError::OrphanObject(id)));
    }

    #[test]
    fn conflicting_records_fail_without_touching_the_world() {
        let mut world = world();
        let mut saved = world.save().expect("empty world saves");
        saved.objects = vec![record(1, 1, 4), record(1, 1, 2)];

        assert_eq!(
            world.load(&saved),
            Err(WorldError::PositionConflict(CellCoord::new(1, 1)))
        );
        assert_eq!(query::objects(&world).count(), 0);
    }

    #[test]
    fn malformed_records_are_rejected() {
        let mut world = world();
        let base = world.save().expect("empty world saves");

        let mut unknown_type = base.clone();
        let mut bad = record(0, 0, 1);
        bad.kind = GameObjectTypeId::new(7);
        unknown_type.objects = vec![bad];
        assert_eq!(
            world.load(&unknown_type),
            Err(WorldError::UnknownType(GameObjectTypeId::new(7)))
        );

        let mut unknown_owner = base.clone();
        let mut bad = record(0, 0, 1);
        bad.owner = PlayerId::new(5);
        unknown_owner.objects = vec![bad];
        assert_eq!(
            world.load(&unknown_owner),
            Err(WorldError::UnknownPlayer(PlayerId::new(5)))
        );

        let mut outside = base.clone();
        outside.objects = vec![record(6, 0, 1)];
        assert_eq!(
            world.load(&outside),
            Err(WorldError::OutOfBounds(CellCoord::new(6, 0)))
        );

        let mut dead = base.clone();
        dead.objects = vec![record(0, 0, 0)];
        assert_eq!(
            world.load(&dead),
            Err(WorldError::InvalidHitPoints {
                cell: CellCoord::new(0, 0),
                hit_points: 0,
                max: 4,
            })
        );

        let mut wrong_size = base;
        wrong_size.columns = 5;
        assert!(matches!(
            world.load(&wrong_size),
            Err(WorldError::DimensionMismatch { .. })
        ));
    }
}

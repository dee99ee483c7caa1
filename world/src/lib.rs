#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Skirmish.
//!
//! The [`World`] owns the grid, the arena of live objects, the player roster
//! and the active player. Every mutating action is split into a pure
//! `check_*` / `can_*` predicate and an executing operation that re-validates
//! before touching state, so presentation layers can query legality freely.

mod grid;
mod objects;
mod persistence;
mod players;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skirmish_core::{
    Action, ActionKind, ActionRejection, CellCoord, Command, Event, GameObjectId, GameObjectType,
    GameObjectTypeId, PlayerId, RuleConfig, Scenario, ScenarioError, TypeCatalog,
};
use thiserror::Error;

use grid::OccupancyGrid;
use objects::ObjectArena;
use players::PlayerRoster;

pub use objects::GameObject;
pub use players::Player;

/// Failures that are not ordinary action rejections.
///
/// These cover configuration mistakes, integrity violations and malformed
/// persisted state. The world is never left partially mutated when one is
/// returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The scenario is structurally invalid.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    /// The player is absent from the roster.
    #[error("unknown player {0:?}")]
    UnknownPlayer(PlayerId),
    /// The object type is absent from the catalog.
    #[error("unknown object type {0:?}")]
    UnknownType(GameObjectTypeId),
    /// The cell lies outside the map.
    #[error("cell {0} lies outside the map")]
    OutOfBounds(CellCoord),
    /// The cell holds no object.
    #[error("cell {0} holds no object")]
    EmptyCell(CellCoord),
    /// Rejection sampling found no cell far enough from existing objects.
    #[error("no valid start position for player {player:?} after {attempts} attempts")]
    NoStartPosition {
        /// Player whose object could not be placed.
        player: PlayerId,
        /// Number of cells sampled.
        attempts: u32,
    },
    /// An object's stored position disagrees with the grid slot referencing it.
    #[error("object {object:?} records position {stored} but occupies {slot}")]
    PositionMismatch {
        /// Offending object.
        object: GameObjectId,
        /// Position stored on the object.
        stored: CellCoord,
        /// Grid cell referencing the object.
        slot: CellCoord,
    },
    /// A live object is not referenced by its grid cell.
    #[error("object {0:?} is live but missing from the grid")]
    OrphanObject(GameObjectId),
    /// A grid cell references an object missing from the arena.
    #[error("cell {cell} references missing object {object:?}")]
    DanglingCell {
        /// Cell holding the stale handle.
        cell: CellCoord,
        /// Handle without an arena entry.
        object: GameObjectId,
    },
    /// A save was produced for a map of different size.
    #[error("saved map is {saved_columns}x{saved_rows} but the world is {columns}x{rows}")]
    DimensionMismatch {
        /// Columns recorded in the save.
        saved_columns: u32,
        /// Rows recorded in the save.
        saved_rows: u32,
        /// Columns of the world.
        columns: u32,
        /// Rows of the world.
        rows: u32,
    },
    /// Two saved objects claim the same cell.
    #[error("more than one saved object occupies {0}")]
    PositionConflict(CellCoord),
    /// A saved object holds hit points outside `1..=max`.
    #[error("saved object at {cell} has {hit_points} hit points, expected 1..={max}")]
    InvalidHitPoints {
        /// Cell of the offending record.
        cell: CellCoord,
        /// Recorded hit points.
        hit_points: i32,
        /// Maximum allowed by the object's type.
        max: i32,
    },
    /// A save lists the same player twice.
    #[error("player {0:?} appears more than once in the save")]
    DuplicatePlayerRecord(PlayerId),
}

/// Result of a successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Object that moved.
    pub object: GameObjectId,
    /// Cell the object left.
    pub from: CellCoord,
    /// Cell the object now occupies.
    pub to: CellCoord,
}

/// Result of a successful production.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductionReport {
    /// Object that produced.
    pub producer: GameObjectId,
    /// Newly created object.
    pub object: GameObjectId,
    /// Type of the new object.
    pub kind: GameObjectTypeId,
    /// Owner of the new object, always the active player.
    pub owner: PlayerId,
    /// Cell of the new object.
    pub cell: CellCoord,
    /// Money debited from the owner.
    pub cost: u64,
}

/// Balance transfer triggered by eliminating a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conquest {
    /// Active player that destroyed the last object.
    pub conqueror: PlayerId,
    /// Player left without objects.
    pub loser: PlayerId,
    /// Money moved from the loser to the conqueror.
    pub transferred: u64,
}

/// Result of a successful fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FightReport {
    /// Attacking object.
    pub attacker: GameObjectId,
    /// Defending object.
    pub defender: GameObjectId,
    /// Owner of the defending object.
    pub defender_owner: PlayerId,
    /// Cell of the defending object.
    pub cell: CellCoord,
    /// Signed hit point change of the defender, never positive.
    pub hp_delta: i32,
    /// Damage inflicted.
    pub damage: u32,
    /// Hit points of the defender after the attack.
    pub remaining_hp: i32,
    /// Whether the defender was removed.
    pub destroyed: bool,
    /// Bounty credited to the active player.
    pub bounty: u64,
    /// Set when the defender's owner lost their last object.
    pub conquest: Option<Conquest>,
}

/// Outcome of an executed [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A move was applied.
    Moved(MoveReport),
    /// A production was applied.
    Produced(ProductionReport),
    /// A fight was applied.
    Fought(FightReport),
}

/// Represents the authoritative Skirmish world state.
#[derive(Debug)]
pub struct World {
    catalog: TypeCatalog,
    rules: RuleConfig,
    grid: OccupancyGrid,
    objects: ObjectArena,
    players: PlayerRoster,
    active_player: Option<PlayerId>,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world for `scenario` using the object types in `catalog`.
    pub fn new(catalog: TypeCatalog, scenario: &Scenario) -> Result<Self, WorldError> {
        let mut world = Self {
            catalog,
            rules: RuleConfig::default(),
            grid: OccupancyGrid::default(),
            objects: ObjectArena::new(),
            players: PlayerRoster::default(),
            active_player: None,
            rng: ChaCha8Rng::seed_from_u64(scenario.seed),
        };
        world.init_scenario(scenario)?;
        Ok(world)
    }

    /// Resets the world to the empty grid, roster and rules of `scenario`.
    ///
    /// The world is untouched when the scenario is rejected.
    pub fn init_scenario(&mut self, scenario: &Scenario) -> Result<(), WorldError> {
        scenario.validate()?;
        if let Some(placement) = scenario
            .placements
            .iter()
            .find(|placement| !self.catalog.contains(placement.kind))
        {
            return Err(WorldError::UnknownType(placement.kind));
        }

        let grid = OccupancyGrid::new(scenario.columns, scenario.rows)?;

        self.rules = scenario.rules;
        self.grid = grid;
        self.objects = ObjectArena::new();
        self.players = PlayerRoster::from_setups(&scenario.players);
        self.active_player = None;
        self.rng = ChaCha8Rng::seed_from_u64(scenario.seed);
        info!(
            "initialised {}x{} map for {} players",
            scenario.columns,
            scenario.rows,
            scenario.players.len()
        );
        Ok(())
    }

    /// Places a new object for `player` on a random cell far enough from every other object.
    pub fn add_start_game_objects(
        &mut self,
        player: PlayerId,
        kind: GameObjectTypeId,
    ) -> Result<GameObjectId, WorldError> {
        if !self.players.contains(player) {
            return Err(WorldError::UnknownPlayer(player));
        }
        let object_type = self
            .catalog
            .get(kind)
            .ok_or(WorldError::UnknownType(kind))?;

        let (columns, rows) = self.grid.dimensions();
        let max_x = i32::try_from(columns).unwrap_or(i32::MAX);
        let max_y = i32::try_from(rows).unwrap_or(i32::MAX);
        let attempts = self.rules.max_start_attempts;
        if max_x > 0 && max_y > 0 {
            for _ in 0..attempts {
                let cell = CellCoord::new(self.rng.gen_range(0..max_x), self.rng.gen_range(0..max_y));
                if !self.can_add_start_game_object(cell) {
                    continue;
                }

                let id = self.objects.allocate_id();
                self.objects
                    .insert(GameObject::spawn(id, object_type, player, cell));
                self.grid.occupy(id, cell);
                debug!("placed start object {id:?} for {player:?} at {cell}");
                return Ok(id);
            }
        }

        warn!("gave up placing a start object for {player:?} after {attempts} attempts");
        Err(WorldError::NoStartPosition { player, attempts })
    }

    fn can_add_start_game_object(&self, cell: CellCoord) -> bool {
        let spacing = self.rules.start_min_distance;
        self.grid.contains(cell)
            && self
                .grid
                .occupied()
                .all(|(occupied, _)| occupied.chebyshev_distance(cell) > spacing)
    }

    /// Hands the turn to `player`, optionally restoring every object's actions, and pays income.
    ///
    /// Returns the income credited.
    pub fn start_round(
        &mut self,
        player: PlayerId,
        reenable_used_actions: bool,
    ) -> Result<u64, WorldError> {
        if !self.players.contains(player) {
            return Err(WorldError::UnknownPlayer(player));
        }

        self.active_player = Some(player);
        if reenable_used_actions {
            for object in self.objects.iter_mut() {
                object.reset_used_actions();
            }
        }

        let income = self.income_of(player);
        if let Some(active) = self.players.get_mut(player) {
            active.credit(income);
        }
        info!("round started for {player:?}, income {income}");
        Ok(income)
    }

    /// Money `player` receives at the start of their round.
    #[must_use]
    pub fn income_of(&self, player: PlayerId) -> u64 {
        self.objects_on_grid()
            .filter(|object| object.owner() == player)
            .filter_map(|object| self.catalog.get(object.kind()))
            .fold(0, |total, object_type| {
                total.saturating_add(object_type.income_per_round)
            })
    }

    /// Reports whether `player` owns at least one object on the grid.
    #[must_use]
    pub fn is_player_still_alive(&self, player: PlayerId) -> bool {
        self.objects_on_grid().any(|object| object.owner() == player)
    }

    /// Reports whether the object at `cell` consumed every action kind this round.
    pub fn exhausted(&self, cell: CellCoord) -> Result<bool, WorldError> {
        if !self.grid.contains(cell) {
            return Err(WorldError::OutOfBounds(cell));
        }
        self.object_at(cell)
            .map(|object| object.used_actions().is_full())
            .ok_or(WorldError::EmptyCell(cell))
    }

    /// Explains why moving the object at `from` to `to` is illegal, if it is.
    pub fn check_move(&self, from: CellCoord, to: CellCoord) -> Result<(), ActionRejection> {
        let actor = self.actor(from, to)?;
        let actor_type = self.type_of(actor)?;
        if !self.grid.is_free(to) {
            return Err(ActionRejection::DestinationOccupied);
        }
        if !actor.can_move_to(actor_type, to) {
            return Err(ActionRejection::OutOfRange);
        }
        if actor.was_used(ActionKind::Move) {
            return Err(ActionRejection::AlreadyUsed);
        }
        Ok(())
    }

    /// Reports whether the object at `from` may move to `to`.
    #[must_use]
    pub fn can_move(&self, from: CellCoord, to: CellCoord) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// Moves the object at `from` to `to`.
    pub fn move_object(
        &mut self,
        from: CellCoord,
        to: CellCoord,
    ) -> Result<MoveReport, ActionRejection> {
        self.check_move(from, to)?;

        let id = self
            .grid
            .vacate(from)
            .ok_or(ActionRejection::MissingActor)?;
        self.grid.occupy(id, to);
        if let Some(object) = in_sync(self.objects.get_mut(id), id, to) {
            object.relocate(to);
            object.use_action(ActionKind::Move);
        }
        debug!("{id:?} moved {from} -> {to}");
        Ok(MoveReport {
            object: id,
            from,
            to,
        })
    }

    /// Explains why producing `kind` at `to` with the object at `from` is illegal, if it is.
    pub fn check_produce(
        &self,
        from: CellCoord,
        to: CellCoord,
        kind: GameObjectTypeId,
    ) -> Result<(), ActionRejection> {
        let actor = self.actor(from, to)?;
        let actor_type = self.type_of(actor)?;
        if !self.grid.is_free(to) {
            return Err(ActionRejection::DestinationOccupied);
        }
        if !actor.can_produce_to(actor_type, to) {
            return Err(ActionRejection::OutOfRange);
        }
        if !actor_type.can_produce(kind) {
            return Err(ActionRejection::NotProducible);
        }
        let product = self
            .catalog
            .get(kind)
            .ok_or(ActionRejection::UnknownType)?;
        let payer = self
            .active_player
            .and_then(|id| self.players.get(id))
            .ok_or(ActionRejection::NoActivePlayer)?;
        if payer.money() < product.cost {
            return Err(ActionRejection::InsufficientFunds);
        }
        if actor.was_used(ActionKind::Produce) {
            return Err(ActionRejection::AlreadyUsed);
        }
        Ok(())
    }

    /// Reports whether the object at `from` may produce `kind` at `to`.
    #[must_use]
    pub fn can_produce(&self, from: CellCoord, to: CellCoord, kind: GameObjectTypeId) -> bool {
        self.check_produce(from, to, kind).is_ok()
    }

    /// Produces a new object of `kind` at `to` for the active player.
    ///
    /// The new object cannot act until the next round reset.
    pub fn produce(
        &mut self,
        from: CellCoord,
        to: CellCoord,
        kind: GameObjectTypeId,
    ) -> Result<ProductionReport, ActionRejection> {
        self.check_produce(from, to, kind)?;

        let owner = self.active_player.ok_or(ActionRejection::NoActivePlayer)?;
        let producer = self
            .grid
            .occupant(from)
            .ok_or(ActionRejection::MissingActor)?;
        let product = self
            .catalog
            .get(kind)
            .ok_or(ActionRejection::UnknownType)?;
        let cost = product.cost;
        let payer = self
            .players
            .get_mut(owner)
            .ok_or(ActionRejection::NoActivePlayer)?;
        if !payer.debit(cost) {
            return Err(ActionRejection::InsufficientFunds);
        }

        let id = self.objects.allocate_id();
        let mut object = GameObject::spawn(id, product, owner, to);
        object.use_all_actions();
        self.objects.insert(object);
        self.grid.occupy(id, to);
        if let Some(source) = in_sync(self.objects.get_mut(producer), producer, from) {
            source.use_action(ActionKind::Produce);
        }
        debug!("{producer:?} produced {id:?} ({kind:?}) at {to} for {cost}");
        Ok(ProductionReport {
            producer,
            object: id,
            kind,
            owner,
            cell: to,
            cost,
        })
    }

    /// Explains why the object at `from` may not attack the object at `to`, if it may not.
    pub fn check_fight(&self, from: CellCoord, to: CellCoord) -> Result<(), ActionRejection> {
        let actor = self.actor(from, to)?;
        let actor_type = self.type_of(actor)?;
        let target = self.object_at(to).ok_or(ActionRejection::MissingTarget)?;
        if target.owner() == actor.owner() {
            return Err(ActionRejection::FriendlyTarget);
        }
        if !actor.can_fight(actor_type, target) {
            return Err(ActionRejection::OutOfRange);
        }
        if self.active_player.is_none() {
            return Err(ActionRejection::NoActivePlayer);
        }
        if actor.was_used(ActionKind::Fight) {
            return Err(ActionRejection::AlreadyUsed);
        }
        Ok(())
    }

    /// Reports whether the object at `from` may attack the object at `to`.
    #[must_use]
    pub fn can_fight(&self, from: CellCoord, to: CellCoord) -> bool {
        self.check_fight(from, to).is_ok()
    }

    /// Attacks the object at `to` with the object at `from`.
    ///
    /// A defender reduced to zero or fewer hit points is removed and its bounty
    /// paid to the active player; if that was its owner's last object, the
    /// owner's whole balance moves to the active player as well.
    pub fn fight(&mut self, from: CellCoord, to: CellCoord) -> Result<FightReport, ActionRejection> {
        self.check_fight(from, to)?;

        let conqueror = self.active_player.ok_or(ActionRejection::NoActivePlayer)?;
        let attacker_id = self
            .grid
            .occupant(from)
            .ok_or(ActionRejection::MissingActor)?;
        let defender_id = self
            .grid
            .occupant(to)
            .ok_or(ActionRejection::MissingTarget)?;
        let attacker = self
            .objects
            .get(attacker_id)
            .cloned()
            .ok_or(ActionRejection::MissingActor)?;
        let attacker_type = self
            .catalog
            .get(attacker.kind())
            .ok_or(ActionRejection::UnknownType)?;
        let defender = self
            .objects
            .get_mut(defender_id)
            .ok_or(ActionRejection::MissingTarget)?;

        let hp_delta = attacker.fight(attacker_type, defender);
        let mut report = FightReport {
            attacker: attacker_id,
            defender: defender_id,
            defender_owner: defender.owner(),
            cell: to,
            hp_delta,
            damage: hp_delta.unsigned_abs(),
            remaining_hp: defender.hit_points(),
            destroyed: false,
            bounty: 0,
            conquest: None,
        };
        let defender_kind = defender.kind();
        debug!(
            "{attacker_id:?} hit {defender_id:?} for {}, {} hp left",
            report.damage, report.remaining_hp
        );

        if report.remaining_hp <= 0 {
            let vacated = self.grid.vacate(to).filter(|id| *id == defender_id);
            let _ = in_sync(vacated, defender_id, to);
            let _ = in_sync(self.objects.remove(defender_id), defender_id, to);
            let bounty = self
                .catalog
                .get(defender_kind)
                .map_or(0, |object_type| object_type.bounty);
            if let Some(active) = self.players.get_mut(conqueror) {
                active.credit(bounty);
            }
            report.destroyed = true;
            report.bounty = bounty;
            debug!("{defender_id:?} destroyed, bounty {bounty} paid to {conqueror:?}");

            if !self.is_player_still_alive(report.defender_owner) {
                report.conquest = Some(self.conquer_player(conqueror, report.defender_owner));
            }
        }

        if let Some(attacker) = in_sync(self.objects.get_mut(attacker_id), attacker_id, from) {
            attacker.use_action(ActionKind::Fight);
        }
        Ok(report)
    }

    fn conquer_player(&mut self, conqueror: PlayerId, loser: PlayerId) -> Conquest {
        let transferred = self.players.get_mut(loser).map_or(0, Player::take_all);
        if let Some(winner) = self.players.get_mut(conqueror) {
            winner.credit(transferred);
        }
        info!("{conqueror:?} conquered {loser:?} and seized {transferred}");
        Conquest {
            conqueror,
            loser,
            transferred,
        }
    }

    /// Validates and executes `action`.
    pub fn execute(&mut self, action: &Action) -> Result<ActionOutcome, ActionRejection> {
        let outcome = match *action {
            Action::Move { from, to } => self.move_object(from, to).map(ActionOutcome::Moved),
            Action::Fight { from, to } => self.fight(from, to).map(ActionOutcome::Fought),
            Action::Produce { from, to, kind } => {
                self.produce(from, to, kind).map(ActionOutcome::Produced)
            }
        };
        if let Err(reason) = &outcome {
            debug!("rejected {action:?}: {reason}");
        }
        outcome
    }

    /// Validates and executes `action`, reporting whether it was applied.
    pub fn do_action(&mut self, action: &Action) -> bool {
        self.execute(action).is_ok()
    }

    fn actor(&self, from: CellCoord, to: CellCoord) -> Result<&GameObject, ActionRejection> {
        if !self.grid.contains(from) || !self.grid.contains(to) {
            return Err(ActionRejection::OutOfBounds);
        }
        let actor = self.object_at(from).ok_or(ActionRejection::MissingActor)?;
        if self.rules.require_active_owner && self.active_player != Some(actor.owner()) {
            return Err(ActionRejection::NotActivePlayersObject);
        }
        Ok(actor)
    }

    fn type_of(&self, object: &GameObject) -> Result<&GameObjectType, ActionRejection> {
        self.catalog
            .get(object.kind())
            .ok_or(ActionRejection::UnknownType)
    }

    fn object_at(&self, cell: CellCoord) -> Option<&GameObject> {
        self.grid
            .occupant(cell)
            .and_then(|id| self.objects.get(id))
    }

    fn objects_on_grid(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.grid
            .occupied()
            .filter_map(|(_, id)| self.objects.get(id))
    }
}

/// Passes `value` through, flagging a grid and arena disagreement about `id`.
fn in_sync<T>(value: Option<T>, id: GameObjectId, cell: CellCoord) -> Option<T> {
    if value.is_none() {
        warn!("grid and object arena out of sync for {id:?} at {cell}");
    }
    debug_assert!(
        value.is_some(),
        "grid and object arena out of sync for {id:?} at {cell}"
    );
    value
}

/// Applies the provided command to the world, reporting the result as events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::InitScenario { scenario } => match world.init_scenario(&scenario) {
            Ok(()) => out_events.push(Event::ScenarioInitialized {
                columns: scenario.columns,
                rows: scenario.rows,
            }),
            Err(error) => warn!("scenario rejected: {error}"),
        },
        Command::PlaceStartObject { player, kind } => {
            match world.add_start_game_objects(player, kind) {
                Ok(object) => {
                    if let Some(placed) = world.objects.get(object) {
                        out_events.push(Event::StartObjectPlaced {
                            object,
                            player,
                            kind,
                            cell: placed.cell(),
                        });
                    }
                }
                Err(error) => {
                    warn!("start placement failed: {error}");
                    out_events.push(Event::StartPlacementFailed { player, kind });
                }
            }
        }
        Command::StartRound {
            player,
            reenable_used_actions,
        } => match world.start_round(player, reenable_used_actions) {
            Ok(income) => out_events.push(Event::RoundStarted { player, income }),
            Err(error) => warn!("round start rejected: {error}"),
        },
        Command::Perform { action } => match world.execute(&action) {
            Ok(outcome) => push_outcome_events(outcome, out_events),
            Err(reason) => out_events.push(Event::ActionRejected { action, reason }),
        },
    }
}

fn push_outcome_events(outcome: ActionOutcome, out_events: &mut Vec<Event>) {
    match outcome {
        ActionOutcome::Moved(report) => out_events.push(Event::ObjectMoved {
            object: report.object,
            from: report.from,
            to: report.to,
        }),
        ActionOutcome::Produced(report) => out_events.push(Event::ObjectProduced {
            producer: report.producer,
            object: report.object,
            kind: report.kind,
            owner: report.owner,
            cell: report.cell,
            cost: report.cost,
        }),
        ActionOutcome::Fought(report) => {
            out_events.push(Event::AttackResolved {
                attacker: report.attacker,
                defender: report.defender,
                damage: report.damage,
                remaining_hp: report.remaining_hp,
            });
            if report.destroyed {
                out_events.push(Event::ObjectDestroyed {
                    object: report.defender,
                    owner: report.defender_owner,
                    cell: report.cell,
                    bounty: report.bounty,
                });
            }
            if let Some(conquest) = report.conquest {
                out_events.push(Event::PlayerConquered {
                    conqueror: conquest.conqueror,
                    loser: conquest.loser,
                    transferred: conquest.transferred,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use skirmish_core::{CellCoord, GameObjectId, PlayerId, RuleConfig, TypeCatalog};

    use super::{GameObject, Player, World};

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Object types available to the match.
    #[must_use]
    pub fn catalog(world: &World) -> &TypeCatalog {
        &world.catalog
    }

    /// Rule parameters in force.
    #[must_use]
    pub fn rules(world: &World) -> RuleConfig {
        world.rules
    }

    /// Object occupying `cell`, if any.
    #[must_use]
    pub fn object_at(world: &World, cell: CellCoord) -> Option<&GameObject> {
        world.object_at(cell)
    }

    /// Object registered under `id`, if it is still alive.
    #[must_use]
    pub fn object(world: &World, id: GameObjectId) -> Option<&GameObject> {
        world.objects.get(id)
    }

    /// Every live object in handle order.
    pub fn objects(world: &World) -> impl Iterator<Item = &GameObject> {
        world.objects.iter()
    }

    /// Live objects owned by `player` in handle order.
    pub fn objects_owned_by(world: &World, player: PlayerId) -> impl Iterator<Item = &GameObject> {
        world.objects.owned_by(player)
    }

    /// Roster entry for `player`.
    #[must_use]
    pub fn player(world: &World, player: PlayerId) -> Option<&Player> {
        world.players.get(player)
    }

    /// Roster in turn order.
    pub fn players(world: &World) -> impl Iterator<Item = &Player> {
        world.players.iter()
    }

    /// Income `player` would receive if their round started now.
    #[must_use]
    pub fn income(world: &World, player: PlayerId) -> u64 {
        world.income_of(player)
    }

    /// Player whose round is in progress.
    #[must_use]
    pub fn active_player(world: &World) -> Option<PlayerId> {
        world.active_player
    }

    /// Players still owning at least one object, in turn order.
    #[must_use]
    pub fn living_players(world: &World) -> Vec<PlayerId> {
        world
            .players
            .iter()
            .map(Player::id)
            .filter(|id| world.is_player_still_alive(*id))
            .collect()
    }
}

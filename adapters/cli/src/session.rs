//! Drives a match by feeding commands to the world and systems.

use anyhow::{Context, Result};
use log::info;
use skirmish_core::{Command, Event, PlayerId, SavedWorld, Scenario, TypeCatalog};
use skirmish_system_bootstrap::Bootstrap;
use skirmish_system_turn_order::TurnOrder;
use skirmish_world::{self as world, query, World};

use crate::script::Step;

/// World plus the systems orchestrating it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    turns: TurnOrder,
}

impl Session {
    /// Creates the world, places the starting objects and opens the first round.
    pub(crate) fn start(catalog: TypeCatalog, scenario: &Scenario) -> Result<(Self, Vec<Event>)> {
        let world = World::new(catalog, scenario).context("could not create world")?;
        let mut session = Self::around(world);
        let mut commands = Vec::new();
        Bootstrap.handle(scenario, &mut commands);
        let events = session.run(commands);
        session.observe(&events);
        Ok((session, events))
    }

    /// Restores a saved match without starting a round.
    pub(crate) fn restore(
        catalog: TypeCatalog,
        scenario: &Scenario,
        saved: &SavedWorld,
    ) -> Result<Self> {
        let mut world = World::new(catalog, scenario).context("could not create world")?;
        world
            .load(saved)
            .context("save does not match the scenario")?;
        Ok(Self::around(world))
    }

    /// Continues the saved active player's round, or opens the first
    /// player's round when the save has none.
    pub(crate) fn resume(&mut self) -> Vec<Event> {
        let active = query::active_player(&self.world)
            .or_else(|| query::players(&self.world).next().map(|player| player.id()));
        let Some(player) = active else {
            return Vec::new();
        };
        let mut commands = Vec::new();
        self.turns.resume(player, &mut commands);
        let events = self.run(commands);
        self.observe(&events);
        events
    }

    fn around(world: World) -> Self {
        let turns = TurnOrder::new(query::players(&world).map(|player| player.id()));
        Self { world, turns }
    }

    /// Executes script steps until they run out or a winner emerges.
    pub(crate) fn play(&mut self, steps: &[Step]) -> Vec<Event> {
        let mut played = Vec::new();
        for step in steps {
            if self.turns.winner().is_some() {
                break;
            }
            match step {
                Step::Perform(action) => {
                    let events = self.run(vec![Command::Perform { action: *action }]);
                    self.observe(&events);
                    played.extend(events);
                }
                Step::EndTurn => {
                    let mut commands = Vec::new();
                    let world = &self.world;
                    self.turns.handle(
                        &[],
                        true,
                        |player| world.is_player_still_alive(player),
                        &mut commands,
                    );
                    let events = self.run(commands);
                    self.observe(&events);
                    played.extend(events);
                }
            }
        }
        if let Some(winner) = self.turns.winner() {
            info!("{winner:?} won the match");
        }
        played
    }

    fn run(&mut self, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        events
    }

    fn observe(&mut self, events: &[Event]) {
        let mut ignored = Vec::new();
        self.turns.handle(events, false, |_| true, &mut ignored);
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn winner(&self) -> Option<PlayerId> {
        self.turns.winner()
    }
}

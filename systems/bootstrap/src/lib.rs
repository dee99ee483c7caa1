#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that turns a scenario into opening commands.

use log::debug;
use skirmish_core::{Command, Scenario};

/// Emits the commands that populate the map and open the first round.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Queues one start placement per recipe entry, in recipe order, followed
    /// by the first round of the first player in the roster.
    ///
    /// Nothing is emitted for a scenario without players.
    pub fn handle(&self, scenario: &Scenario, out: &mut Vec<Command>) {
        let Some(first) = scenario.players.first() else {
            return;
        };

        out.extend(scenario.placements.iter().map(|placement| {
            Command::PlaceStartObject {
                player: placement.player,
                kind: placement.kind,
            }
        }));
        out.push(Command::StartRound {
            player: first.id,
            reenable_used_actions: true,
        });
        debug!(
            "queued {} start placements, first round for {:?}",
            scenario.placements.len(),
            first.id
        );
    }
}

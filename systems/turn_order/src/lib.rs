#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that rotates the active player between rounds.

use std::collections::BTreeSet;

use log::{debug, info};
use skirmish_core::{Command, Event, PlayerId};

/// Tracks whose round it is and which players were eliminated.
#[derive(Debug)]
pub struct TurnOrder {
    roster: Vec<PlayerId>,
    eliminated: BTreeSet<PlayerId>,
    current: Option<PlayerId>,
}

impl TurnOrder {
    /// Creates the rotation from the roster order.
    #[must_use]
    pub fn new(roster: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            roster: roster.into_iter().collect(),
            eliminated: BTreeSet::new(),
            current: None,
        }
    }

    /// Consumes world events and, when `end_turn` is set, hands the round to
    /// the next living player.
    ///
    /// Players named in `PlayerConquered` events are dropped from the
    /// rotation, as is any player `is_alive` rejects while looking for the
    /// next one. No round is started once a winner is known.
    pub fn handle(
        &mut self,
        events: &[Event],
        end_turn: bool,
        is_alive: impl Fn(PlayerId) -> bool,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::RoundStarted { player, .. } => self.current = Some(*player),
                Event::PlayerConquered { loser, .. } => self.eliminate(*loser),
                _ => {}
            }
        }

        if !end_turn || self.winner().is_some() {
            return;
        }

        let start = self
            .current
            .and_then(|current| self.roster.iter().position(|id| *id == current))
            .map_or(0, |index| index + 1);
        let count = self.roster.len();
        for offset in 0..count {
            let candidate = self.roster[(start + offset) % count];
            if self.eliminated.contains(&candidate) {
                continue;
            }
            if !is_alive(candidate) {
                self.eliminate(candidate);
                continue;
            }
            debug!("passing the turn to {candidate:?}");
            out.push(Command::StartRound {
                player: candidate,
                reenable_used_actions: true,
            });
            return;
        }
    }

    /// Continues `player`'s round without restoring used actions.
    pub fn resume(&mut self, player: PlayerId, out: &mut Vec<Command>) {
        self.current = Some(player);
        out.push(Command::StartRound {
            player,
            reenable_used_actions: false,
        });
    }

    /// Player whose round was last started.
    #[must_use]
    pub fn current(&self) -> Option<PlayerId> {
        self.current
    }

    /// Players still in the rotation, in roster order.
    pub fn remaining(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.roster
            .iter()
            .copied()
            .filter(|id| !self.eliminated.contains(id))
    }

    /// The only player left in the rotation, if the match is decided.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let mut remaining = self.remaining();
        match (remaining.next(), remaining.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }

    fn eliminate(&mut self, player: PlayerId) {
        if self.eliminated.insert(player) {
            info!("{player:?} is out of the match");
        }
    }
}

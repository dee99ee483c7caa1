//! Economic actors taking part in a match.

use skirmish_core::{PlayerColor, PlayerId, PlayerSetup};

/// Participant with an identity and a money balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: PlayerColor,
    money: u64,
}

impl Player {
    fn from_setup(setup: &PlayerSetup) -> Self {
        Self {
            id: setup.id,
            name: setup.name.clone(),
            color: setup.color,
            money: setup.starting_money,
        }
    }

    /// Identifier of the player.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name of the player.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display colour of the player.
    #[must_use]
    pub const fn color(&self) -> PlayerColor {
        self.color
    }

    /// Current balance.
    #[must_use]
    pub const fn money(&self) -> u64 {
        self.money
    }

    pub(crate) fn credit(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    /// Removes `amount` from the balance, refusing to go negative.
    pub(crate) fn debit(&mut self, amount: u64) -> bool {
        match self.money.checked_sub(amount) {
            Some(remaining) => {
                self.money = remaining;
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_all(&mut self) -> u64 {
        std::mem::take(&mut self.money)
    }

    pub(crate) fn set_money(&mut self, money: u64) {
        self.money = money;
    }
}

/// Players of the match in turn order.
#[derive(Clone, Debug, Default)]
pub(crate) struct PlayerRoster {
    players: Vec<Player>,
}

impl PlayerRoster {
    pub(crate) fn from_setups(setups: &[PlayerSetup]) -> Self {
        Self {
            players: setups.iter().map(Player::from_setup).collect(),
        }
    }

    pub(crate) fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub(crate) fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(id: u32, money: u64) -> PlayerSetup {
        PlayerSetup {
            id: PlayerId::new(id),
            name: format!("P{id}"),
            color: PlayerColor::from_rgb(1, 2, 3),
            starting_money: money,
        }
    }

    #[test]
    fn debit_refuses_to_overdraw() {
        let mut roster = PlayerRoster::from_setups(&[setup(1, 10)]);
        let player = roster.get_mut(PlayerId::new(1)).expect("player exists");

        assert!(player.debit(4));
        assert_eq!(player.money(), 6);
        assert!(!player.debit(7));
        assert_eq!(player.money(), 6);
    }

    #[test]
    fn take_all_empties_balance() {
        let mut roster = PlayerRoster::from_setups(&[setup(1, 10)]);
        let player = roster.get_mut(PlayerId::new(1)).expect("player exists");
        player.credit(5);

        assert_eq!(player.take_all(), 15);
        assert_eq!(player.money(), 0);
    }

    #[test]
    fn roster_preserves_turn_order() {
        let roster = PlayerRoster::from_setups(&[setup(3, 0), setup(1, 0), setup(2, 0)]);
        let order: Vec<u32> = roster.iter().map(|player| player.id().get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert!(roster.contains(PlayerId::new(2)));
        assert!(!roster.contains(PlayerId::new(4)));
        assert_eq!(roster.get(PlayerId::new(1)).map(Player::name), Some("P1"));
    }
}

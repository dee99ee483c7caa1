//! Text rendering of the board, balances and world events.

use std::fmt::Write as _;

use skirmish_core::{CellCoord, Event, GameObjectTypeId, TypeCatalog};
use skirmish_world::{query, World};

const EMPTY_CELL: &str = " . ";

/// Renders the grid, one row per line, followed by every player's balance.
///
/// Occupied cells show the owner id and the first letter of the type name.
pub(crate) fn render(world: &World) -> String {
    let (columns, rows) = query::dimensions(world);
    let catalog = query::catalog(world);
    let mut out = String::new();

    out.push_str("   ");
    for x in 0..columns {
        let _ = write!(out, "{x:>3}");
    }
    out.push('\n');

    for y in 0..rows {
        let _ = write!(out, "{y:>3}");
        for x in 0..columns {
            let cell = i32::try_from(x)
                .ok()
                .zip(i32::try_from(y).ok())
                .map(|(x, y)| CellCoord::new(x, y));
            match cell.and_then(|cell| query::object_at(world, cell)) {
                Some(object) => {
                    let _ = write!(
                        out,
                        "{:>2}{}",
                        object.owner().get(),
                        initial(catalog, object.kind())
                    );
                }
                None => out.push_str(EMPTY_CELL),
            }
        }
        out.push('\n');
    }

    let active = query::active_player(world);
    for player in query::players(world) {
        let marker = if active == Some(player.id()) { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {} {}: {} money, income {}",
            player.id().get(),
            player.name(),
            player.money(),
            query::income(world, player.id())
        );
    }
    out
}

fn initial(catalog: &TypeCatalog, kind: GameObjectTypeId) -> char {
    catalog
        .get(kind)
        .and_then(|object_type| object_type.name.chars().next())
        .map_or('?', |letter| letter.to_ascii_uppercase())
}

/// One-line description of an event.
pub(crate) fn describe(event: &Event) -> String {
    match event {
        Event::ScenarioInitialized { columns, rows } => {
            format!("scenario initialised on a {columns}x{rows} map")
        }
        Event::StartObjectPlaced {
            player, kind, cell, ..
        } => format!("player {} starts with type {} at {cell}", player.get(), kind.get()),
        Event::StartPlacementFailed { player, kind } => format!(
            "no room to place type {} for player {}",
            kind.get(),
            player.get()
        ),
        Event::RoundStarted { player, income } => {
            format!("round of player {} begins, income {income}", player.get())
        }
        Event::ObjectMoved { from, to, .. } => format!("moved {from} -> {to}"),
        Event::ObjectProduced {
            kind, cell, cost, ..
        } => format!("produced type {} at {cell} for {cost}", kind.get()),
        Event::AttackResolved {
            damage,
            remaining_hp,
            ..
        } => format!("hit for {damage}, {remaining_hp} hp left"),
        Event::ObjectDestroyed { cell, bounty, .. } => {
            format!("object at {cell} destroyed, bounty {bounty}")
        }
        Event::PlayerConquered {
            conqueror,
            loser,
            transferred,
        } => format!(
            "player {} conquered player {} and took {transferred}",
            conqueror.get(),
            loser.get()
        ),
        Event::ActionRejected { action, reason } => {
            format!("{} {} -> {} rejected: {reason}", action.kind(), action.from(), action.to())
        }
    }
}

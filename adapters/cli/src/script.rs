//! Plain-text match scripts.
//!
//! One instruction per line: `move x1 y1 x2 y2`, `fight x1 y1 x2 y2`,
//! `produce x1 y1 x2 y2 TYPE` or `end`. Blank lines and text after `#` are
//! ignored. `TYPE` is a catalog name (case-insensitive) or a numeric id.

use skirmish_core::{Action, CellCoord, GameObjectTypeId, TypeCatalog};
use thiserror::Error;

/// Single instruction of a match script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Submit an action for the active player.
    Perform(Action),
    /// Finish the active player's round.
    EndTurn,
}

/// Problems found while parsing a script.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    #[error("line {line}: unknown instruction '{word}'")]
    UnknownInstruction { line: usize, word: String },
    #[error("line {line}: '{word}' expects {expected} arguments, found {found}")]
    ArgumentCount {
        line: usize,
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: '{value}' is not a coordinate")]
    InvalidCoordinate { line: usize, value: String },
    #[error("line {line}: unknown object type '{name}'")]
    UnknownType { line: usize, name: String },
}

/// Parses `text` into steps, resolving type names against `catalog`.
pub(crate) fn parse(text: &str, catalog: &TypeCatalog) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default();
        let words: Vec<&str> = content.split_whitespace().collect();
        let Some((&word, arguments)) = words.split_first() else {
            continue;
        };

        let step = match word.to_ascii_lowercase().as_str() {
            "end" => {
                expect_arguments(line, word, arguments, 0)?;
                Step::EndTurn
            }
            "move" => {
                expect_arguments(line, word, arguments, 4)?;
                let (from, to) = cells(line, arguments)?;
                Step::Perform(Action::Move { from, to })
            }
            "fight" => {
                expect_arguments(line, word, arguments, 4)?;
                let (from, to) = cells(line, arguments)?;
                Step::Perform(Action::Fight { from, to })
            }
            "produce" => {
                expect_arguments(line, word, arguments, 5)?;
                let (from, to) = cells(line, arguments)?;
                let kind = resolve_type(line, arguments[4], catalog)?;
                Step::Perform(Action::Produce { from, to, kind })
            }
            _ => {
                return Err(ScriptError::UnknownInstruction {
                    line,
                    word: word.to_owned(),
                })
            }
        };
        steps.push(step);
    }
    Ok(steps)
}

fn expect_arguments(
    line: usize,
    word: &str,
    arguments: &[&str],
    expected: usize,
) -> Result<(), ScriptError> {
    if arguments.len() == expected {
        Ok(())
    } else {
        Err(ScriptError::ArgumentCount {
            line,
            word: word.to_owned(),
            expected,
            found: arguments.len(),
        })
    }
}

fn cells(line: usize, arguments: &[&str]) -> Result<(CellCoord, CellCoord), ScriptError> {
    let mut values = [0_i32; 4];
    for (slot, value) in values.iter_mut().zip(arguments) {
        *slot = value.parse().map_err(|_| ScriptError::InvalidCoordinate {
            line,
            value: (*value).to_owned(),
        })?;
    }
    Ok((
        CellCoord::new(values[0], values[1]),
        CellCoord::new(values[2], values[3]),
    ))
}

fn resolve_type(
    line: usize,
    name: &str,
    catalog: &TypeCatalog,
) -> Result<GameObjectTypeId, ScriptError> {
    let by_id = name
        .parse::<u32>()
        .ok()
        .map(GameObjectTypeId::new)
        .filter(|id| catalog.contains(*id));
    by_id
        .or_else(|| catalog.find_by_name(name).map(|object_type| object_type.id))
        .ok_or_else(|| ScriptError::UnknownType {
            line,
            name: name.to_owned(),
        })
}

//! Single-line transfer codes for sharing saved matches.

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use skirmish_core::{GameObjectRecord, PlayerId, PlayerRecord, SavedWorld};

const CODE_DOMAIN: &str = "skirmish";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded payload.
pub(crate) const CODE_HEADER: &str = "skirmish:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

#[derive(Serialize, Deserialize)]
struct Payload {
    active_player: Option<PlayerId>,
    players: Vec<PlayerRecord>,
    objects: Vec<GameObjectRecord>,
}

/// Encodes `saved` into a string suitable for clipboard transfer.
pub(crate) fn encode(saved: &SavedWorld) -> Result<String, serde_json::Error> {
    let payload = Payload {
        active_player: saved.active_player,
        players: saved.players.clone(),
        objects: saved.objects.clone(),
    };
    let json = serde_json::to_vec(&payload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!(
        "{CODE_HEADER}{FIELD_DELIMITER}{}x{}{FIELD_DELIMITER}{encoded}",
        saved.columns, saved.rows
    ))
}

/// Decodes a transfer code back into a save.
pub(crate) fn decode(value: &str) -> Result<SavedWorld, TransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(TransferError::MissingPrefix)?;
    let version = parts.next().ok_or(TransferError::MissingVersion)?;
    let dimensions = parts.next().ok_or(TransferError::MissingDimensions)?;
    let payload = parts.next().ok_or(TransferError::MissingPayload)?;

    if domain != CODE_DOMAIN {
        return Err(TransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != CODE_VERSION {
        return Err(TransferError::UnsupportedVersion(version.to_owned()));
    }

    let (columns, rows) = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(TransferError::InvalidEncoding)?;
    let decoded: Payload =
        serde_json::from_slice(&bytes).map_err(TransferError::InvalidPayload)?;

    Ok(SavedWorld {
        columns,
        rows,
        active_player: decoded.active_player,
        players: decoded.players,
        objects: decoded.objects,
    })
}

/// Errors that can occur while decoding transfer codes.
#[derive(Debug)]
pub(crate) enum TransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing.
    MissingPrefix,
    /// The version segment was missing.
    MissingVersion,
    /// The grid dimensions were missing.
    MissingDimensions,
    /// The payload segment was missing.
    MissingPayload,
    /// The code used an unexpected prefix.
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "transfer code was empty"),
            Self::MissingPrefix => write!(f, "transfer code is missing the prefix"),
            Self::MissingVersion => write!(f, "transfer code is missing the version"),
            Self::MissingDimensions => write!(f, "transfer code is missing the map dimensions"),
            Self::MissingPayload => write!(f, "transfer code is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "transfer code version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse map dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => write!(f, "could not decode payload: {error}"),
            Self::InvalidPayload(error) => write!(f, "could not parse payload: {error}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), TransferError> {
    let invalid = || TransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;
    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;
    if columns == 0 || rows == 0 {
        return Err(invalid());
    }
    Ok((columns, rows))
}

//! Internal failure taxonomy. None of these escape the public generation entry points.

use std::time::Duration;

use thiserror::Error;

use crate::types::{Pos, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Smoothing,
    Connectivity,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Smoothing => "smoothing",
            Self::Connectivity => "connectivity",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("generation took {elapsed:?} by the end of {}, budget is {budget:?}", .phase.label())]
    Timeout { phase: Phase, elapsed: Duration, budget: Duration },
    #[error("invalid biome configuration: {0}")]
    InvalidBiome(String),
    #[error("stairs landed {distance} tiles from the player start, need at least {required}")]
    StairsTooClose { distance: u32, required: u32 },
    #[error("no walkable tile for the player start")]
    NoPlayerStart,
}

/// Why a host floor refused a legendary portal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("host tile buffer does not match its dimensions")]
    MalformedGrid,
    #[error("portal jonction has no source tile")]
    NoSourceTile,
    #[error("portal at {0:?} is not an interior tile")]
    OnBorder(Pos),
    #[error("portal at {pos:?} would replace {tile:?}, needs open floor")]
    Blocked { pos: Pos, tile: TileKind },
    #[error("portal at {0:?} is already taken by a placement")]
    Occupied(Pos),
}

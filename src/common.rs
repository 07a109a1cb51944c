//! Common types: attack outcomes and the errors returned by engine operations.

use thiserror::Error;

use crate::board::Position;
use crate::game::Phase;
use crate::player::PlayerId;
use crate::ship::ShipKind;

/// Outcome of resolving a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttackOutcome {
    /// Shot landed in open water.
    Miss,
    /// Shot hit the given ship without sinking it.
    Hit(ShipKind),
    /// Shot hit the given ship and sank it.
    Sunk(ShipKind),
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, AttackOutcome::Sunk(_))
    }

    /// Ship that was struck, if any.
    pub fn ship(&self) -> Option<ShipKind> {
        match *self {
            AttackOutcome::Miss => None,
            AttackOutcome::Hit(kind) | AttackOutcome::Sunk(kind) => Some(kind),
        }
    }

    pub fn ship_id(&self) -> Option<&'static str> {
        self.ship().map(ShipKind::id)
    }

    pub fn ship_name(&self) -> Option<&'static str> {
        self.ship().map(ShipKind::name)
    }
}

/// A resolved shot and where it landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub position: Position,
    pub outcome: AttackOutcome,
}

/// Reasons a placement is rejected. The board is never modified on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("ship placement is out of bounds")]
    OutOfBounds,
    #[error("ship placement overlaps with another ship")]
    Overlaps,
    #[error("ship placement touches another ship")]
    Adjacent,
    #[error("{0} is already placed on the board")]
    AlreadyPlaced(ShipKind),
    #[error("{0} is not placed on the board")]
    NotPlaced(ShipKind),
    #[error("unable to place {0} after exhausting all placement attempts")]
    Exhausted(ShipKind),
}

/// Errors returned by the attack resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttackError {
    #[error("target {0} is out of bounds")]
    OutOfBounds(Position),
    #[error("target {0} was already attacked")]
    AlreadyAttacked(Position),
}

/// Errors from the opponent search engine. These indicate an inconsistent
/// match state and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no unattacked cell remains to target")]
    NoCandidates,
}

/// Reasons a match action is rejected. A rejected action leaves the match
/// exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("action is not allowed during the {0:?} phase")]
    WrongPhase(Phase),
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("{0} still has ships to place")]
    FleetIncomplete(PlayerId),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Attack(#[from] AttackError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

//! Players and their pair of boards.

use alloc::string::String;
use core::fmt;

use crate::board::Board;

/// Seat of a player in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    #[cfg_attr(feature = "serde", serde(rename = "player1"))]
    One,
    #[cfg_attr(feature = "serde", serde(rename = "player2"))]
    Two,
}

impl PlayerId {
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Get the opponent of this player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerId::One => "player1",
            PlayerId::Two => "player2",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlayerKind {
    Human,
    Computer,
}

/// A participant: their own fleet and the record of their shots at the opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) kind: PlayerKind,
    pub(crate) board: Board,
    pub(crate) attack_board: Board,
    pub(crate) ready: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            board: Board::new(),
            attack_board: Board::new(),
            ready: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_computer(&self) -> bool {
        self.kind == PlayerKind::Computer
    }

    /// Own fleet board, ships visible.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tracking board of our shots at the opponent.
    pub fn attack_board(&self) -> &Board {
        &self.attack_board
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

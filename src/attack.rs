//! Attack resolution on fleet boards and mirroring onto tracking boards.

use crate::board::{Board, CellState, Position};
use crate::common::{AttackError, AttackOutcome};

impl Board {
    /// Returns `true` if a shot has already been resolved at `pos`.
    pub fn already_attacked(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|cell| cell.is_attacked())
    }

    /// Resolve a shot against this (defending) board.
    ///
    /// An occupied cell becomes `Hit` and its ship's hit counter increases;
    /// anything else becomes `Miss`. Attacked cells are terminal, so a second
    /// shot at the same cell is rejected without touching the board.
    pub fn resolve(&mut self, pos: Position) -> Result<AttackOutcome, AttackError> {
        let cell = *self.cell(pos).ok_or(AttackError::OutOfBounds(pos))?;
        if cell.is_attacked() {
            return Err(AttackError::AlreadyAttacked(pos));
        }
        let outcome = match cell.ship.and_then(|kind| self.ship_mut(kind)) {
            Some(ship) => {
                ship.register_hit();
                if ship.is_sunk() {
                    AttackOutcome::Sunk(ship.kind())
                } else {
                    AttackOutcome::Hit(ship.kind())
                }
            }
            None => AttackOutcome::Miss,
        };
        if let Some(target) = self.cell_mut(pos) {
            target.state = if outcome.is_hit() {
                CellState::Hit
            } else {
                CellState::Miss
            };
        }
        log::debug!("shot at {} resolved as {:?}", pos, outcome);
        Ok(outcome)
    }

    /// Record one of our own shots on this attack-tracking board.
    ///
    /// Only the hit/miss result is mirrored; the ship's identity is not.
    pub fn mark_attack(&mut self, pos: Position, hit: bool) -> Result<(), AttackError> {
        let cell = self.cell_mut(pos).ok_or(AttackError::OutOfBounds(pos))?;
        if cell.is_attacked() {
            return Err(AttackError::AlreadyAttacked(pos));
        }
        cell.state = if hit { CellState::Hit } else { CellState::Miss };
        cell.ship = None;
        Ok(())
    }

    /// Returns `true` when at least one ship is placed and every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_sunk())
    }

    /// Number of ships on the board that are sunk.
    pub fn sunk_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk()).count()
    }
}

//! Ship placement rules: bounds, overlap and the no-touch rule.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{adjacent_positions, ship_positions, Board, CellState, Position};
use crate::common::PlacementError;
use crate::config::{BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Ship, ShipKind};

impl Board {
    /// Returns `true` if a ship could occupy `positions`.
    ///
    /// Cells belonging to `exclude` are ignored, so a placed ship can be
    /// checked against its own new location.
    pub fn can_place(&self, positions: &[Position], exclude: Option<ShipKind>) -> bool {
        self.check_placement(positions, exclude).is_ok()
    }

    /// Like [`Board::can_place`] but reports why a placement is rejected.
    pub fn check_placement(
        &self,
        positions: &[Position],
        exclude: Option<ShipKind>,
    ) -> Result<(), PlacementError> {
        if !positions.iter().all(|p| p.is_valid()) {
            return Err(PlacementError::OutOfBounds);
        }
        let blocks = |pos: Position| match self.cell(pos).and_then(|c| c.ship) {
            Some(owner) => Some(owner) != exclude,
            None => false,
        };
        for &pos in positions {
            if blocks(pos) {
                return Err(PlacementError::Overlaps);
            }
            for adj in adjacent_positions(pos) {
                if blocks(adj) && !positions.contains(&adj) {
                    return Err(PlacementError::Adjacent);
                }
            }
        }
        Ok(())
    }

    /// Place `kind` from `anchor` in `orientation`. On error the board is unchanged.
    pub fn place(
        &mut self,
        kind: ShipKind,
        anchor: Position,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if self.ship(kind).is_some() {
            return Err(PlacementError::AlreadyPlaced(kind));
        }
        let positions = ship_positions(anchor, kind.length(), orientation);
        self.check_placement(&positions, None)?;
        self.commit(Ship::new(kind, positions, orientation));
        log::debug!("placed {} at {} ({:?})", kind, anchor, orientation);
        Ok(())
    }

    /// Move an already placed ship to a new anchor and orientation.
    pub fn relocate(
        &mut self,
        kind: ShipKind,
        anchor: Position,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if self.ship(kind).is_none() {
            return Err(PlacementError::NotPlaced(kind));
        }
        let positions = ship_positions(anchor, kind.length(), orientation);
        self.check_placement(&positions, Some(kind))?;
        self.remove(kind);
        self.commit(Ship::new(kind, positions, orientation));
        log::debug!("moved {} to {} ({:?})", kind, anchor, orientation);
        Ok(())
    }

    /// Clear the ship's cells and drop it from the board. No-op if absent.
    pub fn remove(&mut self, kind: ShipKind) -> Option<Ship> {
        let idx = self.ships.iter().position(|s| s.kind() == kind)?;
        let ship = self.ships.remove(idx);
        for &pos in ship.positions() {
            if let Some(cell) = self.cell_mut(pos) {
                cell.state = CellState::Empty;
                cell.ship = None;
            }
        }
        log::debug!("removed {}", kind);
        Some(ship)
    }

    /// Build a board holding the whole fleet at random valid positions.
    ///
    /// Ships are placed in fleet order with up to [`MAX_PLACEMENT_ATTEMPTS`]
    /// draws each. There is no backtracking: if one ship runs out of draws the
    /// whole attempt fails and the caller should start again from scratch.
    pub fn auto_place<R: Rng + ?Sized>(rng: &mut R) -> Result<Board, PlacementError> {
        let mut board = Board::new();
        for kind in FLEET {
            let (anchor, orientation) = board.random_placement(rng, kind)?;
            board.place(kind, anchor, orientation)?;
        }
        Ok(board)
    }

    /// Run [`Board::auto_place`] up to `retries` times, each from an empty board.
    ///
    /// Returns the last failure if no attempt produced a full fleet.
    pub fn auto_place_retrying<R: Rng + ?Sized>(
        rng: &mut R,
        retries: usize,
    ) -> Result<Board, PlacementError> {
        let mut last = PlacementError::Exhausted(FLEET[0]);
        for attempt in 1..=retries {
            match Board::auto_place(rng) {
                Ok(board) => return Ok(board),
                Err(e) => {
                    log::warn!("auto-placement attempt {} failed: {}", attempt, e);
                    last = e;
                }
            }
        }
        Err(last)
    }

    /// Returns a random valid (anchor, orientation) for `kind` on this board.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<(Position, Orientation), PlacementError> {
        let len = kind.length();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orientation {
                Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - len),
                Orientation::Vertical => (BOARD_SIZE - len, BOARD_SIZE - 1),
            };
            let anchor = Position::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if self.can_place(&ship_positions(anchor, len, orientation), None) {
                return Ok((anchor, orientation));
            }
        }
        Err(PlacementError::Exhausted(kind))
    }

    /// Fleet members not yet placed on this board, in fleet order.
    pub fn remaining_fleet(&self) -> Vec<ShipKind> {
        FLEET
            .into_iter()
            .filter(|kind| self.ship(*kind).is_none())
            .collect()
    }

    /// Returns `true` when every fleet member is on the board.
    pub fn fleet_complete(&self) -> bool {
        self.remaining_fleet().is_empty()
    }

    fn commit(&mut self, ship: Ship) {
        for &pos in ship.positions() {
            if let Some(cell) = self.cell_mut(pos) {
                cell.state = CellState::Ship;
                cell.ship = Some(ship.kind());
            }
        }
        self.ships.push(ship);
    }
}

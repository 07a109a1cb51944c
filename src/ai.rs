// Hunt/target search for the computer opponent.
//
// Hunting samples unattacked cells on a checkerboard parity; a hit switches to
// targeting, which works through a queue of follow-up cells around the damaged
// ship until it sinks.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::Rng;

use crate::{
    board::{Board, Position},
    common::SearchError,
    config::BOARD_SIZE,
    ship::Orientation,
};

/// Whether the search is sweeping the board or chasing a damaged ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchMode {
    Hunting,
    Targeting,
}

/// Session memory of the computer opponent. One instance lives for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentSearch {
    mode: SearchMode,
    queue: VecDeque<Position>,
    hits: Vec<Position>,
    orientation: Option<Orientation>,
}

impl OpponentSearch {
    pub fn new() -> Self {
        Self {
            mode: SearchMode::Hunting,
            queue: VecDeque::new(),
            hits: Vec::new(),
            orientation: None,
        }
    }

    /// Forget everything and go back to hunting.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Pending follow-up targets, head first.
    pub fn queue(&self) -> impl Iterator<Item = &Position> {
        self.queue.iter()
    }

    /// Confirmed hits on the ship currently being chased, oldest first.
    pub fn hit_stack(&self) -> &[Position] {
        &self.hits
    }

    /// Axis inferred for the ship being chased, once two hits line up.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Choose the next cell to fire at, given our own attack-tracking board.
    pub fn next_move<R: Rng + ?Sized>(
        &mut self,
        attack_board: &Board,
        rng: &mut R,
    ) -> Result<Position, SearchError> {
        self.queue.retain(|p| !attack_board.already_attacked(*p));
        if let Some(pos) = self.queue.pop_front() {
            log::debug!("targeting {} ({} queued)", pos, self.queue.len());
            return Ok(pos);
        }

        // Every ship is at least two cells long, so one colour of the
        // checkerboard is enough to touch each of them.
        let mut candidates = open_cells(attack_board, |pos| (pos.row + pos.col) % 2 == 0);
        if candidates.is_empty() {
            candidates = open_cells(attack_board, |_| true);
        }
        if candidates.is_empty() {
            log::error!("search exhausted: no unattacked cells remain");
            return Err(SearchError::NoCandidates);
        }
        let pos = candidates[rng.random_range(0..candidates.len())];
        log::debug!("hunting {} ({} candidates)", pos, candidates.len());
        Ok(pos)
    }

    /// Feed back the result of the shot fired at `pos`.
    pub fn observe(&mut self, pos: Position, hit: bool, sunk: bool, attack_board: &Board) {
        if sunk {
            // No-touch placement means nothing around a sunk ship is worth chasing.
            self.reset();
            return;
        }

        if hit {
            self.mode = SearchMode::Targeting;
            if let Some(prev) = self.hits.last() {
                if prev.row == pos.row {
                    self.orientation = Some(Orientation::Horizontal);
                } else if prev.col == pos.col {
                    self.orientation = Some(Orientation::Vertical);
                }
            }
            self.hits.push(pos);

            let follow_ups = match self.orientation {
                Some(o) => pos.inline_neighbors(o),
                None => pos.orthogonal_neighbors(),
            };
            self.queue.extend(
                follow_ups
                    .into_iter()
                    .filter(|p| !attack_board.already_attacked(*p)),
            );
        } else if self.mode == SearchMode::Targeting {
            // Dead end: turn around and work from the first hit the other way.
            if let (Some(first), Some(o)) = (self.hits.first(), self.orientation) {
                let opposite: Vec<Position> = first
                    .inline_neighbors(o)
                    .into_iter()
                    .filter(|p| !attack_board.already_attacked(*p))
                    .collect();
                for p in opposite.into_iter().rev() {
                    self.queue.push_front(p);
                }
            }
        }
    }
}

impl Default for OpponentSearch {
    fn default() -> Self {
        Self::new()
    }
}

fn open_cells(board: &Board, keep: impl Fn(Position) -> bool) -> Vec<Position> {
    let mut out = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            if keep(pos) && !board.already_attacked(pos) {
                out.push(pos);
            }
        }
    }
    out
}

//! Match state machine: phases, turn order, statistics and win detection.

use alloc::boxed::Box;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    ai::OpponentSearch,
    board::{Board, Position},
    common::{AttackError, AttackOutcome, AttackResult, MatchError, PlacementError},
    config::{AUTO_PLACE_RETRIES, COMPUTER_NAME, DEFAULT_SECOND_NAME},
    player::{Player, PlayerId, PlayerKind},
    ship::{Orientation, ShipKind},
};

/// Phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    Menu,
    Setup,
    /// Hand-off between two human players placing their fleets.
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameMode {
    /// One human against the computer opponent.
    #[default]
    VsComputer,
    /// Two humans sharing the same engine.
    TwoPlayer,
}

/// Per-player shooting statistics. Timestamps are milliseconds from the match clock.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchStats {
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    /// hits / shots × 100, or 0 before the first shot.
    pub accuracy: f64,
    pub ships_destroyed: u32,
    pub started_at: u64,
    pub ended_at: Option<u64>,
}

impl MatchStats {
    pub fn new(started_at: u64) -> Self {
        Self {
            shots: 0,
            hits: 0,
            misses: 0,
            accuracy: 0.0,
            ships_destroyed: 0,
            started_at,
            ended_at: None,
        }
    }

    fn record(&mut self, outcome: AttackOutcome) {
        self.shots += 1;
        if outcome.is_hit() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        if outcome.is_sunk() {
            self.ships_destroyed += 1;
        }
        self.accuracy = f64::from(self.hits) / f64::from(self.shots) * 100.0;
    }

    /// Elapsed match time, once the match has ended.
    pub fn duration_millis(&self) -> Option<u64> {
        self.ended_at.map(|end| end.saturating_sub(self.started_at))
    }
}

/// Read-only snapshot of everything a front-end needs to render a match.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub phase: Phase,
    pub mode: GameMode,
    pub players: Option<[Player; 2]>,
    /// Player whose turn it is; during setup, the player placing ships.
    pub current: PlayerId,
    pub winner: Option<PlayerId>,
    pub stats: Option<[MatchStats; 2]>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            phase: Phase::Menu,
            mode: GameMode::default(),
            players: None,
            current: PlayerId::One,
            winner: None,
            stats: None,
        }
    }
}

/// Source of match timestamps.
pub trait Clock: Send {
    fn now_millis(&self) -> u64;
}

/// Wall clock: milliseconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A single match between two players.
///
/// Every action either applies completely or returns an error and leaves the
/// match untouched.
pub struct Match {
    state: MatchState,
    search: OpponentSearch,
    rng: SmallRng,
    clock: Box<dyn Clock>,
}

impl Match {
    /// New match in the menu phase, seeded from the thread RNG.
    pub fn new() -> Self {
        let mut seed_rng = rand::rng();
        Self::from_rng(SmallRng::from_rng(&mut seed_rng))
    }

    /// New match with a fixed seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            state: MatchState::default(),
            search: OpponentSearch::new(),
            rng,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used for statistics timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn current(&self) -> PlayerId {
        self.state.current
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.players.as_ref().map(|p| &p[id.index()])
    }

    pub fn stats(&self, id: PlayerId) -> Option<&MatchStats> {
        self.state.stats.as_ref().map(|s| &s[id.index()])
    }

    /// Memory of the computer opponent.
    pub fn search(&self) -> &OpponentSearch {
        &self.search
    }

    /// Choose the game mode. Only allowed from the menu.
    pub fn set_mode(&mut self, mode: GameMode) -> Result<(), MatchError> {
        self.require(Phase::Menu)?;
        self.state.mode = mode;
        Ok(())
    }

    /// Create both players and enter setup.
    ///
    /// Against the computer, its fleet is auto-placed and it is ready at once;
    /// `second` is ignored in that mode.
    pub fn start_setup(&mut self, first: &str, second: Option<&str>) -> Result<(), MatchError> {
        self.require(Phase::Menu)?;
        let one = Player::new(PlayerId::One, first, PlayerKind::Human);
        let two = match self.state.mode {
            GameMode::VsComputer => {
                let mut computer = Player::new(PlayerId::Two, COMPUTER_NAME, PlayerKind::Computer);
                computer.board = self.auto_fleet()?;
                computer.ready = true;
                computer
            }
            GameMode::TwoPlayer => Player::new(
                PlayerId::Two,
                second.unwrap_or(DEFAULT_SECOND_NAME),
                PlayerKind::Human,
            ),
        };
        let now = self.clock.now_millis();
        log::info!(
            "setup started: {} vs {} ({:?})",
            one.name(),
            two.name(),
            self.state.mode
        );
        self.state.players = Some([one, two]);
        self.state.stats = Some([MatchStats::new(now), MatchStats::new(now)]);
        self.state.current = PlayerId::One;
        self.state.winner = None;
        self.state.phase = Phase::Setup;
        Ok(())
    }

    pub fn place_ship(
        &mut self,
        player: PlayerId,
        kind: ShipKind,
        anchor: Position,
        orientation: Orientation,
    ) -> Result<(), MatchError> {
        self.setup_seat(player)?
            .board
            .place(kind, anchor, orientation)?;
        Ok(())
    }

    /// Move a ship that is already on the acting player's board.
    pub fn move_ship(
        &mut self,
        player: PlayerId,
        kind: ShipKind,
        anchor: Position,
        orientation: Orientation,
    ) -> Result<(), MatchError> {
        self.setup_seat(player)?
            .board
            .relocate(kind, anchor, orientation)?;
        Ok(())
    }

    /// Take a ship off the board. The player is no longer ready afterwards.
    pub fn remove_ship(&mut self, player: PlayerId, kind: ShipKind) -> Result<(), MatchError> {
        let seat = self.setup_seat(player)?;
        if seat.board.ship(kind).is_none() {
            return Err(PlacementError::NotPlaced(kind).into());
        }
        seat.board.remove(kind);
        seat.ready = false;
        Ok(())
    }

    /// Replace the player's board with a randomly placed full fleet.
    pub fn auto_place_ships(&mut self, player: PlayerId) -> Result<(), MatchError> {
        self.setup_seat(player)?;
        let board = self.auto_fleet()?;
        self.setup_seat(player)?.board = board;
        Ok(())
    }

    /// Mark the acting player ready; starts play once both players are.
    pub fn player_ready(&mut self, player: PlayerId) -> Result<(), MatchError> {
        let mode = self.state.mode;
        let seat = self.setup_seat(player)?;
        if !seat.board.fleet_complete() {
            return Err(MatchError::FleetIncomplete(player));
        }
        seat.ready = true;
        log::info!("{} is ready", player);

        let all_ready = self
            .state
            .players
            .as_ref()
            .is_some_and(|p| p.iter().all(Player::is_ready));
        if all_ready {
            self.search.reset();
            self.state.current = PlayerId::One;
            self.state.phase = Phase::Playing;
            log::info!("all fleets placed, battle begins");
        } else if mode == GameMode::TwoPlayer && player == PlayerId::One {
            self.state.phase = Phase::Waiting;
        }
        Ok(())
    }

    /// Hand setup over to the second player.
    pub fn next_player_setup(&mut self) -> Result<(), MatchError> {
        self.require(Phase::Waiting)?;
        self.state.current = PlayerId::Two;
        self.state.phase = Phase::Setup;
        Ok(())
    }

    /// Fire the current (human) player's shot at `pos`.
    pub fn attack(&mut self, pos: Position) -> Result<AttackResult, MatchError> {
        self.require(Phase::Playing)?;
        let attacker = self.state.current;
        if self.player(attacker).is_some_and(Player::is_computer) {
            return Err(MatchError::NotYourTurn(attacker));
        }
        self.fire(pos)
    }

    /// Let the computer take its turn.
    pub fn ai_attack(&mut self) -> Result<AttackResult, MatchError> {
        self.require(Phase::Playing)?;
        let attacker = self.state.current;
        let players = self
            .state
            .players
            .as_ref()
            .ok_or(MatchError::WrongPhase(self.state.phase))?;
        let seat = &players[attacker.index()];
        if !seat.is_computer() {
            return Err(MatchError::NotYourTurn(attacker));
        }
        let pos = self.search.next_move(&seat.attack_board, &mut self.rng)?;

        let result = self.fire(pos)?;
        if let Some(players) = self.state.players.as_ref() {
            self.search.observe(
                pos,
                result.outcome.is_hit(),
                result.outcome.is_sunk(),
                &players[attacker.index()].attack_board,
            );
        }
        Ok(result)
    }

    /// Discard the match and return to the initial menu state.
    pub fn reset(&mut self) {
        log::info!("match reset");
        self.state = MatchState::default();
        self.search.reset();
    }

    /// Leave the match for the menu. Same effect as [`Match::reset`].
    pub fn go_to_menu(&mut self) {
        self.reset();
    }

    fn require(&self, phase: Phase) -> Result<(), MatchError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(MatchError::WrongPhase(self.state.phase))
        }
    }

    /// Mutable seat of the acting player during setup.
    fn setup_seat(&mut self, player: PlayerId) -> Result<&mut Player, MatchError> {
        self.require(Phase::Setup)?;
        if player != self.state.current {
            return Err(MatchError::NotYourTurn(player));
        }
        let phase = self.state.phase;
        let players = self
            .state
            .players
            .as_mut()
            .ok_or(MatchError::WrongPhase(phase))?;
        Ok(&mut players[player.index()])
    }

    /// Auto-place a full fleet, restarting from an empty board on failure.
    fn auto_fleet(&mut self) -> Result<Board, PlacementError> {
        Board::auto_place_retrying(&mut self.rng, AUTO_PLACE_RETRIES)
    }

    /// Resolve a shot from the current player against the other.
    fn fire(&mut self, pos: Position) -> Result<AttackResult, MatchError> {
        if !pos.is_valid() {
            return Err(AttackError::OutOfBounds(pos).into());
        }
        let attacker = self.state.current;
        let defender = attacker.opponent();
        let phase = self.state.phase;
        let players = self
            .state
            .players
            .as_mut()
            .ok_or(MatchError::WrongPhase(phase))?;
        let [first, second] = players;
        let (atk, def) = match attacker {
            PlayerId::One => (first, second),
            PlayerId::Two => (second, first),
        };
        if atk.attack_board.already_attacked(pos) || def.board.already_attacked(pos) {
            return Err(AttackError::AlreadyAttacked(pos).into());
        }

        let outcome = def.board.resolve(pos)?;
        atk.attack_board.mark_attack(pos, outcome.is_hit())?;
        let defeated = def.board.all_sunk();
        log::debug!("{} fires at {}: {:?}", attacker, pos, outcome);

        let now = self.clock.now_millis();
        if let Some(stats) = self.state.stats.as_mut() {
            let s = &mut stats[attacker.index()];
            s.record(outcome);
            if defeated {
                s.ended_at = Some(now);
            }
        }
        if defeated {
            self.state.winner = Some(attacker);
            self.state.phase = Phase::Finished;
            log::info!("{} wins, all enemy ships sunk", attacker);
        } else {
            self.state.current = defender;
        }
        Ok(AttackResult {
            position: pos,
            outcome,
        })
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

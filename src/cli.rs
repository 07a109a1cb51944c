//! Terminal front-end helpers: board rendering and command parsing.
//!
//! Nothing here mutates a match; the binary turns parsed commands into calls
//! on [`crate::Match`].

use std::fmt::Write;

use crate::{
    board::{Board, CellState, Position},
    common::{AttackOutcome, AttackResult},
    config::BOARD_SIZE,
    game::MatchStats,
    ship::{Orientation, ShipKind},
};

/// A command typed during the setup phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupCommand {
    Place(ShipKind, Position, Orientation),
    Move(ShipKind, Position, Orientation),
    Remove(ShipKind),
    Auto,
    Ready,
    Help,
}

/// Parse board notation such as `A5` or `j10` into a position.
pub fn parse_coord(input: &str) -> Result<Position, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("need a column letter and a row number (e.g. A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("no column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("invalid column '{}', must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("column '{}' out of bounds, must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("invalid row '{}', must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("row {} out of bounds, must be 1-10", row));
    }
    Ok(Position::new(row - 1, col))
}

fn parse_orientation(input: Option<&str>) -> Result<Orientation, String> {
    match input.map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("h") | Some("horizontal") => Ok(Orientation::Horizontal),
        Some("v") | Some("vertical") => Ok(Orientation::Vertical),
        Some(other) => Err(format!("invalid orientation '{}', use h or v", other)),
    }
}

fn parse_ship(input: Option<&str>) -> Result<ShipKind, String> {
    let id = input.ok_or("missing ship name")?;
    ShipKind::from_id(id).ok_or_else(|| format!("unknown ship '{}'", id))
}

/// Parse a setup command line.
pub fn parse_setup_command(line: &str) -> Result<SetupCommand, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("").to_ascii_lowercase();
    match verb.as_str() {
        "place" | "move" => {
            let kind = parse_ship(parts.next())?;
            let anchor = parse_coord(parts.next().ok_or("missing coordinate")?)?;
            let orientation = parse_orientation(parts.next())?;
            if verb == "place" {
                Ok(SetupCommand::Place(kind, anchor, orientation))
            } else {
                Ok(SetupCommand::Move(kind, anchor, orientation))
            }
        }
        "remove" => Ok(SetupCommand::Remove(parse_ship(parts.next())?)),
        "auto" => Ok(SetupCommand::Auto),
        "ready" => Ok(SetupCommand::Ready),
        "help" | "?" => Ok(SetupCommand::Help),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command '{}'", other)),
    }
}

/// Render a board as text. With `reveal`, unhit ship cells are shown as `S`.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::from("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in board.rows().enumerate() {
        let _ = write!(out, "  {:2}", r + 1);
        for cell in row.iter() {
            let ch = match cell.state {
                CellState::Hit => 'X',
                CellState::Miss => 'o',
                CellState::Ship if reveal => 'S',
                _ => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Fleet status lines for a player's own board.
pub fn render_fleet_status(board: &Board) -> String {
    let mut out = String::new();
    for ship in board.ships() {
        let status = if ship.is_sunk() { "SUNK" } else { "afloat" };
        let _ = writeln!(
            out,
            "  {} ({}) at {} {:?}: {}/{} hits, {}",
            ship.kind(),
            ship.size(),
            ship.origin(),
            ship.orientation(),
            ship.hits(),
            ship.size(),
            status
        );
    }
    for kind in board.remaining_fleet() {
        let _ = writeln!(out, "  {} ({}): not placed", kind, kind.length());
    }
    out
}

/// One-line message for a resolved shot.
pub fn describe_attack(shooter: &str, result: &AttackResult) -> String {
    match result.outcome {
        AttackOutcome::Miss => format!("{} fires at {}: miss.", shooter, result.position),
        AttackOutcome::Hit(kind) => {
            format!("{} fires at {}: hit on the {}!", shooter, result.position, kind)
        }
        AttackOutcome::Sunk(kind) => {
            format!("{} fires at {}: the {} is sunk!", shooter, result.position, kind)
        }
    }
}

pub fn describe_stats(name: &str, stats: &MatchStats) -> String {
    format!(
        "{}: {} shots, {} hits, {} misses, {:.1}% accuracy, {} ships destroyed",
        name, stats.shots, stats.hits, stats.misses, stats.accuracy, stats.ships_destroyed
    )
}

pub const SETUP_HELP: &str = "\
Setup commands:
  place <ship> <coord> [h|v]   place a ship, e.g. `place carrier A1 h`
  move <ship> <coord> [h|v]    move a placed ship
  remove <ship>                take a ship off the board
  auto                         place the whole fleet at random
  ready                        finish setup (all five ships must be placed)
Ships: carrier(5) battleship(4) cruiser(3) submarine(3) destroyer(2)
Coordinates: column A-J, row 1-10. Ships touching each other, even diagonally, are not allowed.";

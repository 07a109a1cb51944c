use crate::ship::ShipKind;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// Fleet every player places exactly once, in auto-placement order.
pub const FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random draws tried per ship before auto-placement gives up on the fleet.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Number of times a match restarts auto-placement from an empty board.
pub const AUTO_PLACE_RETRIES: usize = 16;

/// Display name given to the computer opponent.
pub const COMPUTER_NAME: &str = "Computer";

/// Display name used when the second human player gives none.
pub const DEFAULT_SECOND_NAME: &str = "Player 2";

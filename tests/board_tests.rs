use battleship_match::{
    adjacent_positions, is_valid_position, ship_positions, Board, CellState, Orientation, Position,
    ShipKind, BOARD_SIZE, FLEET, TOTAL_SHIP_CELLS,
};

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert!(board.ships().is_empty());
    assert_eq!(board.count(CellState::Empty), BOARD_SIZE * BOARD_SIZE);
    for row in board.rows() {
        for cell in row.iter() {
            assert_eq!(cell.state, CellState::Empty);
            assert!(cell.ship.is_none());
        }
    }
}

#[test]
fn test_ship_positions_horizontal_and_vertical() {
    let h = ship_positions(Position::new(2, 3), 4, Orientation::Horizontal);
    assert_eq!(
        h,
        vec![
            Position::new(2, 3),
            Position::new(2, 4),
            Position::new(2, 5),
            Position::new(2, 6)
        ]
    );
    let v = ship_positions(Position::new(7, 9), 3, Orientation::Vertical);
    assert_eq!(
        v,
        vec![Position::new(7, 9), Position::new(8, 9), Position::new(9, 9)]
    );
}

#[test]
fn test_ship_positions_not_bounds_checked() {
    let ps = ship_positions(Position::new(0, 8), 5, Orientation::Horizontal);
    assert_eq!(ps.len(), 5);
    assert_eq!(ps[4], Position::new(0, 12));
    assert!(!is_valid_position(ps[4]));
}

#[test]
fn test_valid_position_bounds() {
    assert!(is_valid_position(Position::new(0, 0)));
    assert!(is_valid_position(Position::new(9, 9)));
    assert!(!is_valid_position(Position::new(10, 0)));
    assert!(!is_valid_position(Position::new(0, 10)));
}

#[test]
fn test_adjacent_positions_clipped() {
    assert_eq!(adjacent_positions(Position::new(0, 0)).len(), 3);
    assert_eq!(adjacent_positions(Position::new(0, 5)).len(), 5);
    assert_eq!(adjacent_positions(Position::new(9, 9)).len(), 3);
    let centre = adjacent_positions(Position::new(4, 4));
    assert_eq!(centre.len(), 8);
    assert!(!centre.contains(&Position::new(4, 4)));
    assert!(centre.contains(&Position::new(3, 3)));
    assert!(centre.contains(&Position::new(5, 5)));
}

#[test]
fn test_orthogonal_and_inline_neighbors() {
    let corner = Position::new(0, 0);
    assert_eq!(
        corner.orthogonal_neighbors(),
        vec![Position::new(1, 0), Position::new(0, 1)]
    );
    let mid = Position::new(5, 5);
    assert_eq!(
        mid.orthogonal_neighbors(),
        vec![
            Position::new(4, 5),
            Position::new(6, 5),
            Position::new(5, 4),
            Position::new(5, 6)
        ]
    );
    assert_eq!(
        mid.inline_neighbors(Orientation::Horizontal),
        vec![Position::new(5, 4), Position::new(5, 6)]
    );
    assert_eq!(
        Position::new(9, 3).inline_neighbors(Orientation::Vertical),
        vec![Position::new(8, 3)]
    );
}

#[test]
fn test_position_display() {
    assert_eq!(Position::new(0, 0).to_string(), "A1");
    assert_eq!(Position::new(9, 9).to_string(), "J10");
    assert_eq!(Position::new(4, 2).to_string(), "C5");
}

#[test]
fn test_fleet_definition() {
    let lengths: Vec<usize> = FLEET.iter().map(|k| k.length()).collect();
    assert_eq!(lengths, vec![5, 4, 3, 3, 2]);
    assert_eq!(lengths.iter().sum::<usize>(), TOTAL_SHIP_CELLS);
    assert_eq!(ShipKind::from_id("carrier"), Some(ShipKind::Carrier));
    assert_eq!(ShipKind::from_id("SUBMARINE"), Some(ShipKind::Submarine));
    assert_eq!(ShipKind::from_id("rowboat"), None);
    assert_eq!(ShipKind::Destroyer.name(), "Destroyer");
}

#[test]
fn test_position_display_off_board() {
    assert_eq!(Position::new(0, 10).to_string(), "(0, 10)");
    assert_eq!(
        Position::new(usize::MAX, 0).to_string(),
        format!("({}, 0)", usize::MAX)
    );
}

#[test]
fn test_log_level_parsing() {
    use battleship_match::log_level;
    use log::LevelFilter;

    assert_eq!(log_level(None), LevelFilter::Info);
    assert_eq!(log_level(Some("debug")), LevelFilter::Debug);
    assert_eq!(log_level(Some("WARN")), LevelFilter::Warn);
    assert_eq!(log_level(Some("off")), LevelFilter::Off);
    assert_eq!(log_level(Some("loud")), LevelFilter::Info);
}

use battleship_match::{
    AttackError, AttackOutcome, Board, CellState, Orientation, Position, ShipKind,
};

fn destroyer_board() -> Board {
    let mut board = Board::new();
    board
        .place(ShipKind::Destroyer, Position::new(0, 0), Orientation::Horizontal)
        .unwrap();
    board
}

#[test]
fn test_hit_then_sunk() {
    let mut board = destroyer_board();

    let first = board.resolve(Position::new(0, 0)).unwrap();
    assert_eq!(first, AttackOutcome::Hit(ShipKind::Destroyer));
    assert!(first.is_hit());
    assert!(!first.is_sunk());
    assert_eq!(board.cell(Position::new(0, 0)).unwrap().state, CellState::Hit);
    assert!(!board.all_sunk());

    let second = board.resolve(Position::new(0, 1)).unwrap();
    assert_eq!(second, AttackOutcome::Sunk(ShipKind::Destroyer));
    assert_eq!(second.ship_id(), Some("destroyer"));
    assert_eq!(second.ship_name(), Some("Destroyer"));
    assert_eq!(board.ship(ShipKind::Destroyer).unwrap().hits(), 2);
    assert!(board.all_sunk());
    assert_eq!(board.sunk_count(), 1);
}

#[test]
fn test_miss_marks_cell() {
    let mut board = destroyer_board();
    let outcome = board.resolve(Position::new(5, 5)).unwrap();
    assert_eq!(outcome, AttackOutcome::Miss);
    assert!(!outcome.is_hit());
    assert_eq!(outcome.ship(), None);
    assert_eq!(board.cell(Position::new(5, 5)).unwrap().state, CellState::Miss);
    assert!(board.already_attacked(Position::new(5, 5)));
    assert!(!board.already_attacked(Position::new(0, 0)));
}

#[test]
fn test_attacked_cell_is_terminal() {
    let mut board = destroyer_board();
    board.resolve(Position::new(0, 0)).unwrap();
    let before = board.clone();
    assert_eq!(
        board.resolve(Position::new(0, 0)),
        Err(AttackError::AlreadyAttacked(Position::new(0, 0)))
    );
    assert_eq!(board, before);
    assert_eq!(board.ship(ShipKind::Destroyer).unwrap().hits(), 1);

    board.resolve(Position::new(3, 3)).unwrap();
    assert_eq!(
        board.resolve(Position::new(3, 3)),
        Err(AttackError::AlreadyAttacked(Position::new(3, 3)))
    );
}

#[test]
fn test_out_of_bounds_shot() {
    let mut board = destroyer_board();
    assert_eq!(
        board.resolve(Position::new(10, 0)),
        Err(AttackError::OutOfBounds(Position::new(10, 0)))
    );
}

#[test]
fn test_mark_attack_hides_ship_identity() {
    let mut tracking = Board::new();
    tracking.mark_attack(Position::new(2, 2), true).unwrap();
    tracking.mark_attack(Position::new(2, 3), false).unwrap();
    let hit = tracking.cell(Position::new(2, 2)).unwrap();
    assert_eq!(hit.state, CellState::Hit);
    assert!(hit.ship.is_none());
    assert_eq!(
        tracking.cell(Position::new(2, 3)).unwrap().state,
        CellState::Miss
    );
    assert_eq!(
        tracking.mark_attack(Position::new(2, 2), false),
        Err(AttackError::AlreadyAttacked(Position::new(2, 2)))
    );
    assert!(tracking.ships().is_empty());
}

#[test]
fn test_all_sunk_false_without_ships() {
    let mut board = Board::new();
    assert!(!board.all_sunk());
    board.resolve(Position::new(0, 0)).unwrap();
    assert!(!board.all_sunk());
}

#[test]
fn test_sinking_whole_fleet() {
    use rand::{rngs::SmallRng, SeedableRng};
    let mut board = Board::auto_place(&mut SmallRng::seed_from_u64(3)).unwrap();
    let targets: Vec<Position> = board
        .ships()
        .iter()
        .flat_map(|s| s.positions().to_vec())
        .collect();
    let mut sunk = 0;
    for pos in targets {
        assert!(!board.all_sunk());
        if board.resolve(pos).unwrap().is_sunk() {
            sunk += 1;
        }
    }
    assert_eq!(sunk, 5);
    assert!(board.all_sunk());
    assert_eq!(board.count(CellState::Hit), 17);
}

mod props {
    use battleship_match::{AttackError, Board, CellState, Position, BOARD_SIZE};
    use proptest::prelude::*;
    use rand::{rngs::SmallRng, SeedableRng};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn resolve_is_terminal(seed in any::<u64>(), row in 0..BOARD_SIZE, col in 0..BOARD_SIZE) {
            let mut board = Board::auto_place(&mut SmallRng::seed_from_u64(seed))
                .unwrap_or_default();
            let pos = Position::new(row, col);
            let before = board.cell(pos).unwrap().state;
            let outcome = board.resolve(pos).unwrap();
            let after = board.cell(pos).unwrap().state;
            match before {
                CellState::Ship => {
                    prop_assert!(outcome.is_hit());
                    prop_assert_eq!(after, CellState::Hit);
                }
                _ => {
                    prop_assert!(!outcome.is_hit());
                    prop_assert_eq!(after, CellState::Miss);
                }
            }
            let snapshot = board.clone();
            prop_assert_eq!(board.resolve(pos), Err(AttackError::AlreadyAttacked(pos)));
            prop_assert_eq!(board, snapshot);
        }
    }
}

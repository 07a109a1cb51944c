use battleship_match::{
    adjacent_positions, ship_positions, Board, CellState, Orientation, Position, FLEET,
    BOARD_SIZE, TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

fn kind() -> impl Strategy<Value = usize> {
    0..FLEET.len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ship_positions_are_contiguous(
        row in 0..BOARD_SIZE,
        col in 0..BOARD_SIZE,
        size in 1usize..=5,
        o in orientation(),
    ) {
        let ps = ship_positions(Position::new(row, col), size, o);
        prop_assert_eq!(ps.len(), size);
        prop_assert_eq!(ps[0], Position::new(row, col));
        for pair in ps.windows(2) {
            match o {
                Orientation::Horizontal => {
                    prop_assert_eq!(pair[1].row, pair[0].row);
                    prop_assert_eq!(pair[1].col, pair[0].col + 1);
                }
                Orientation::Vertical => {
                    prop_assert_eq!(pair[1].col, pair[0].col);
                    prop_assert_eq!(pair[1].row, pair[0].row + 1);
                }
            }
        }
    }

    #[test]
    fn auto_place_never_touches(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        // A single attempt may fail; when it succeeds the fleet must be valid.
        if let Ok(board) = Board::auto_place(&mut rng) {
            prop_assert!(board.fleet_complete());
            prop_assert_eq!(board.count(CellState::Ship), TOTAL_SHIP_CELLS);
            for ship in board.ships() {
                for &p in ship.positions() {
                    prop_assert!(p.is_valid());
                    for adj in adjacent_positions(p) {
                        let owner = board.cell(adj).and_then(|c| c.ship);
                        prop_assert!(owner.is_none() || owner == Some(ship.kind()));
                    }
                }
            }
        }
    }

    #[test]
    fn place_then_remove_restores_board(
        seed in any::<u64>(),
        k in kind(),
        row in 0..BOARD_SIZE,
        col in 0..BOARD_SIZE,
        o in orientation(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        let target = FLEET[k];
        for other in FLEET.into_iter().filter(|kind| *kind != target) {
            if let Ok((anchor, orient)) = board.random_placement(&mut rng, other) {
                board.place(other, anchor, orient).unwrap();
            }
        }
        let before = board.clone();
        if board.place(target, Position::new(row, col), o).is_ok() {
            prop_assert!(board.remove(target).is_some());
        }
        prop_assert_eq!(board, before);
    }

    #[test]
    fn no_touch_rule_is_symmetric(
        a in kind(),
        b in kind(),
        ar in 0..BOARD_SIZE, ac in 0..BOARD_SIZE, ao in orientation(),
        br in 0..BOARD_SIZE, bc in 0..BOARD_SIZE, bo in orientation(),
    ) {
        prop_assume!(a != b);
        let (ka, kb) = (FLEET[a], FLEET[b]);
        let (pa, pb) = (Position::new(ar, ac), Position::new(br, bc));

        let mut first = Board::new();
        let mut second = Board::new();
        prop_assume!(first.place(ka, pa, ao).is_ok());
        prop_assume!(second.place(kb, pb, bo).is_ok());

        let forward = first.place(kb, pb, bo).is_ok();
        let backward = second.place(ka, pa, ao).is_ok();
        prop_assert_eq!(forward, backward);
    }
}

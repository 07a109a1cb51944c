#![cfg(feature = "cli")]

use battleship_match::cli::{
    describe_attack, parse_coord, parse_setup_command, render_board, SetupCommand,
};
use battleship_match::{
    AttackOutcome, AttackResult, Board, Orientation, Position, ShipKind,
};

#[test]
fn test_parse_coord() {
    assert_eq!(parse_coord("A1"), Ok(Position::new(0, 0)));
    assert_eq!(parse_coord("a5"), Ok(Position::new(4, 0)));
    assert_eq!(parse_coord(" J10 "), Ok(Position::new(9, 9)));
    assert!(parse_coord("K1").is_err());
    assert!(parse_coord("A0").is_err());
    assert!(parse_coord("A11").is_err());
    assert!(parse_coord("5A").is_err());
    assert!(parse_coord("").is_err());
}

#[test]
fn test_parse_setup_commands() {
    assert_eq!(
        parse_setup_command("place carrier A1 h"),
        Ok(SetupCommand::Place(
            ShipKind::Carrier,
            Position::new(0, 0),
            Orientation::Horizontal
        ))
    );
    assert_eq!(
        parse_setup_command("PLACE Destroyer c3 v"),
        Ok(SetupCommand::Place(
            ShipKind::Destroyer,
            Position::new(2, 2),
            Orientation::Vertical
        ))
    );
    assert_eq!(
        parse_setup_command("place cruiser B2"),
        Ok(SetupCommand::Place(
            ShipKind::Cruiser,
            Position::new(1, 1),
            Orientation::Horizontal
        ))
    );
    assert_eq!(
        parse_setup_command("move submarine E5 vertical"),
        Ok(SetupCommand::Move(
            ShipKind::Submarine,
            Position::new(4, 4),
            Orientation::Vertical
        ))
    );
    assert_eq!(
        parse_setup_command("remove battleship"),
        Ok(SetupCommand::Remove(ShipKind::Battleship))
    );
    assert_eq!(parse_setup_command("auto"), Ok(SetupCommand::Auto));
    assert_eq!(parse_setup_command("ready"), Ok(SetupCommand::Ready));
    assert_eq!(parse_setup_command("?"), Ok(SetupCommand::Help));

    assert!(parse_setup_command("").is_err());
    assert!(parse_setup_command("place rowboat A1").is_err());
    assert!(parse_setup_command("place carrier").is_err());
    assert!(parse_setup_command("place carrier A1 d").is_err());
    assert!(parse_setup_command("fire A1").is_err());
}

#[test]
fn test_render_board_hides_ships() {
    let mut board = Board::new();
    board
        .place(ShipKind::Destroyer, Position::new(0, 0), Orientation::Horizontal)
        .unwrap();
    board.resolve(Position::new(0, 0)).unwrap();
    board.resolve(Position::new(5, 5)).unwrap();

    let hidden = render_board(&board, false);
    let revealed = render_board(&board, true);
    assert!(hidden.contains('X'));
    assert!(hidden.contains('o'));
    assert!(!hidden.contains('S'));
    assert_eq!(revealed.matches('S').count(), 1);
    assert_eq!(hidden.lines().count(), 11);
}

#[test]
fn test_describe_attack() {
    let result = AttackResult {
        position: Position::new(2, 1),
        outcome: AttackOutcome::Sunk(ShipKind::Cruiser),
    };
    assert_eq!(
        describe_attack("Ada", &result),
        "Ada fires at B3: the Cruiser is sunk!"
    );
}

#[test]
fn test_sim_binary_prints_json() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_battleship-match"))
        .args(["sim", "--seed", "1", "--games", "2"])
        .env("BATTLESHIP_LOG", "off")
        .output()
        .expect("failed to run binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let v: serde_json::Value = serde_json::from_str(line).expect("invalid json");
        assert!(v["winner"].is_string());
        assert!(v["player1"]["shots"].is_number());
    }
}

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail};
use battleship_match::{
    cli::{
        describe_attack, describe_stats, parse_coord, parse_setup_command, render_board,
        render_fleet_status, SetupCommand, SETUP_HELP,
    },
    init_logging, GameMode, Match, MatchError, OpponentSearch, Phase, PlayerId, BOARD_SIZE,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive match in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = "Player 1")]
        name: String,
        /// Two humans take turns at the same terminal instead of playing the computer.
        #[arg(long)]
        hotseat: bool,
        #[arg(long, requires = "hotseat")]
        second_name: Option<String>,
    },
    /// Run matches where both seats are driven by the search engine and print JSON results.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: u64,
    },
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            seed,
            name,
            hotseat,
            second_name,
        } => run_play(seed, &name, hotseat, second_name.as_deref()),
        Commands::Sim { seed, games } => run_sim(seed, games),
    }
}

fn new_match(seed: Option<u64>) -> Match {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            Match::with_seed(s)
        }
        None => Match::new(),
    }
}

fn prompt(lines: &mut Lines<'_>, msg: &str) -> anyhow::Result<Option<String>> {
    print!("{}", msg);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn run_play(
    seed: Option<u64>,
    name: &str,
    hotseat: bool,
    second_name: Option<&str>,
) -> anyhow::Result<()> {
    let mut game = new_match(seed);
    if hotseat {
        game.set_mode(GameMode::TwoPlayer)?;
    }
    game.start_setup(name, second_name)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("{}", SETUP_HELP);

    loop {
        match game.phase() {
            Phase::Setup => {
                if !setup_step(&mut game, &mut lines)? {
                    return Ok(());
                }
            }
            Phase::Waiting => {
                println!("\nFleet locked in. Hand over to the next player.");
                if prompt(&mut lines, "Press ENTER when ready... ")?.is_none() {
                    return Ok(());
                }
                game.next_player_setup()?;
            }
            Phase::Playing => {
                if !battle_step(&mut game, &mut lines)? {
                    return Ok(());
                }
            }
            Phase::Finished => {
                print_summary(&game);
                return Ok(());
            }
            Phase::Menu => return Ok(()),
        }
    }
}

/// Handle one setup command. Returns `false` when input is exhausted.
fn setup_step(game: &mut Match, lines: &mut Lines<'_>) -> anyhow::Result<bool> {
    let id = game.current();
    let player = game
        .player(id)
        .ok_or_else(|| anyhow!("no players in setup"))?;
    println!("\n{} - your fleet:", player.name());
    print!("{}", render_board(player.board(), true));
    print!("{}", render_fleet_status(player.board()));

    let Some(line) = prompt(lines, "setup> ")? else {
        return Ok(false);
    };
    let cmd = match parse_setup_command(&line) {
        Ok(cmd) => cmd,
        Err(e) => {
            println!("✗ {}", e);
            return Ok(true);
        }
    };
    let res = match cmd {
        SetupCommand::Place(kind, at, o) => game.place_ship(id, kind, at, o),
        SetupCommand::Move(kind, at, o) => game.move_ship(id, kind, at, o),
        SetupCommand::Remove(kind) => game.remove_ship(id, kind),
        SetupCommand::Auto => game.auto_place_ships(id),
        SetupCommand::Ready => game.player_ready(id),
        SetupCommand::Help => {
            println!("{}", SETUP_HELP);
            Ok(())
        }
    };
    if let Err(e) = res {
        println!("✗ {}", e);
    }
    Ok(true)
}

/// Play one turn. Returns `false` when input is exhausted.
fn battle_step(game: &mut Match, lines: &mut Lines<'_>) -> anyhow::Result<bool> {
    let id = game.current();
    let player = game
        .player(id)
        .ok_or_else(|| anyhow!("no players in battle"))?;
    let name = player.name().to_string();

    if player.is_computer() {
        let result = game.ai_attack()?;
        println!("{}", describe_attack(&name, &result));
        return Ok(true);
    }

    println!("\n{} - enemy waters:", name);
    print!("{}", render_board(player.attack_board(), false));
    println!("{} - your fleet:", name);
    print!("{}", render_board(player.board(), true));

    let Some(line) = prompt(lines, "target> ")? else {
        return Ok(false);
    };
    let pos = match parse_coord(&line) {
        Ok(pos) => pos,
        Err(e) => {
            println!("✗ Invalid coordinate: {}", e);
            return Ok(true);
        }
    };
    match game.attack(pos) {
        Ok(result) => println!("{}", describe_attack(&name, &result)),
        Err(MatchError::Attack(e)) => println!("✗ {}", e),
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

fn print_summary(game: &Match) {
    if let Some(winner) = game.winner().and_then(|id| game.player(id)) {
        println!("\nGAME OVER - {} wins!", winner.name());
    }
    for id in [PlayerId::One, PlayerId::Two] {
        if let (Some(p), Some(s)) = (game.player(id), game.stats(id)) {
            println!("{}", describe_stats(p.name(), s));
        }
    }
}

fn run_sim(seed: Option<u64>, games: u64) -> anyhow::Result<()> {
    for i in 0..games {
        let game_seed = seed.map(|s| s.wrapping_add(i));
        let mut game = match game_seed {
            Some(s) => Match::with_seed(s),
            None => Match::new(),
        };
        let mut rng = match game_seed {
            Some(s) => SmallRng::seed_from_u64(s ^ 0x5eed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let mut driver = OpponentSearch::new();

        game.start_setup("Simulator", None)?;
        game.auto_place_ships(PlayerId::One)?;
        game.player_ready(PlayerId::One)?;

        let mut turns = 0usize;
        while game.phase() == Phase::Playing {
            turns += 1;
            if turns > 2 * BOARD_SIZE * BOARD_SIZE {
                bail!("match did not finish after {} turns", turns - 1);
            }
            if game.current() == PlayerId::Two {
                game.ai_attack()?;
                continue;
            }
            let tracking = game
                .player(PlayerId::One)
                .ok_or_else(|| anyhow!("missing player"))?
                .attack_board();
            let pos = driver.next_move(tracking, &mut rng)?;
            let result = game.attack(pos)?;
            let tracking = game
                .player(PlayerId::One)
                .ok_or_else(|| anyhow!("missing player"))?
                .attack_board();
            driver.observe(pos, result.outcome.is_hit(), result.outcome.is_sunk(), tracking);
        }

        let summary = json!({
            "game": i,
            "seed": game_seed,
            "turns": turns,
            "winner": game.winner(),
            "player1": game.stats(PlayerId::One),
            "player2": game.stats(PlayerId::Two),
        });
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

//! TreeGo terminal front-end.
//!
//! A thin presentation shell over `treego-core`: renders the board as
//! text, keeps the selected piece type (leaf by default), and feeds
//! placements to the engine one line of input at a time.

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use treego_core::{GameSession, Rank, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

mod render;

use render::{board_to_string, player_name};

/// One parsed input line.
enum Command {
    Place { x: usize, y: usize },
    Pick(Rank),
    Hint,
    Json,
    Help,
    Quit,
}

fn parse_rank(word: &str) -> Option<Rank> {
    match word {
        "leaf" => Some(Rank::Leaf),
        "branch" => Some(Rank::Branch),
        "trunk" => Some(Rank::Trunk),
        _ => None,
    }
}

fn rank_name(rank: Rank) -> &'static str {
    match rank {
        Rank::Leaf => "leaf",
        Rank::Branch => "branch",
        Rank::Trunk => "trunk",
    }
}

fn parse_command(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["pick", rank] => parse_rank(rank).map(Command::Pick),
        ["hint"] => Some(Command::Hint),
        ["json"] => Some(Command::Json),
        ["help"] => Some(Command::Help),
        ["quit"] | ["q"] => Some(Command::Quit),
        ["place", x, y] | [x, y] => {
            let x = x.parse().ok()?;
            let y = y.parse().ok()?;
            Some(Command::Place { x, y })
        }
        _ => None,
    }
}

fn print_help() {
    println!("commands:");
    println!("  place X Y            place the selected piece (or just: X Y)");
    println!("  pick leaf|branch|trunk   select the piece type to place");
    println!("  hint                 list legal cells for the selected piece");
    println!("  json                 dump a JSON snapshot of the session");
    println!("  quit                 abandon the session");
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional board dimensions from the command line
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (width, height) = match args.as_slice() {
        [] => (DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT),
        [w, h] => (w.parse()?, h.parse()?),
        _ => anyhow::bail!("usage: treego [WIDTH HEIGHT]"),
    };
    anyhow::ensure!(width >= 4 && height >= 4, "board must be at least 4x4");

    let mut session = GameSession::new(width, height);
    let mut selected = Rank::Leaf;

    println!("TreeGo {width}x{height} - gray to move ('help' for commands)");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", board_to_string(&session));
        print!(
            "{} to place {} > ",
            player_name(session.current_player),
            rank_name(selected)
        );
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            session.abandon();
            break;
        };

        match parse_command(&line?) {
            Some(Command::Place { x, y }) => {
                let mover = session.current_player;
                let outcome = session.attempt_place(x, y, selected);
                if !outcome.accepted {
                    println!("illegal move");
                    continue;
                }

                info!(
                    player = player_name(mover),
                    x,
                    y,
                    rank = rank_name(selected),
                    pushed = outcome.pushed.len(),
                    eliminated = outcome.eliminated.len(),
                    "piece placed"
                );

                for moved in &outcome.pushed {
                    println!(
                        "pushed {} from ({}, {}) to ({}, {})",
                        rank_name(moved.piece.rank),
                        moved.from.x,
                        moved.from.y,
                        moved.to.x,
                        moved.to.y
                    );
                }
                for removed in &outcome.eliminated {
                    println!(
                        "eliminated {} {} at ({}, {})",
                        player_name(removed.piece.owner),
                        rank_name(removed.piece.rank),
                        removed.at.x,
                        removed.at.y
                    );
                }

                if let Some(winner) = outcome.winner {
                    println!("{}", board_to_string(&session));
                    println!("{} wins!", player_name(winner));
                    info!(winner = player_name(winner), "session finished");
                    break;
                }
            }
            Some(Command::Pick(rank)) => {
                selected = rank;
            }
            Some(Command::Hint) => {
                let cells = session.valid_positions(selected);
                if cells.is_empty() {
                    println!("no legal cells for {}", rank_name(selected));
                } else {
                    let list: Vec<String> =
                        cells.iter().map(|sq| format!("({}, {})", sq.x, sq.y)).collect();
                    println!("{}", list.join(" "));
                }
            }
            Some(Command::Json) => {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            }
            Some(Command::Help) => print_help(),
            Some(Command::Quit) => {
                session.abandon();
                info!("session abandoned");
                break;
            }
            None => {
                println!("unrecognized command ('help' for commands)");
            }
        }
    }

    Ok(())
}
